#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::peripherals;
use embassy_nrf::{bind_interrupts, twim};
use embassy_seesaw_neopixel::registers::DEFAULT_ADDRESS;
use embassy_seesaw_neopixel::{
    ChannelMask, DeviceConfig, Error, I2cTransport, Passes, Pulser, RGB8, SeesawNeoPixel, Tracer,
};
use embassy_time::{Delay, Duration};
use static_cell::ConstStaticCell;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

const NUM_LEDS: u8 = 12;

const BREATHE: Pulser = Pulser {
    channels: ChannelMask::BLUE,
    min: 0x15,
    max: 0x40,
    step: 0x02,
    step_delay: Duration::from_millis(50),
    passes: Passes::Count(10),
    clear_first: true,
};

const CHASE: Tracer = Tracer {
    color: RGB8 {
        r: 0x00,
        g: 0x30,
        b: 0x00,
    },
    step_delay: Duration::from_millis(75),
    lit_len: 2,
    passes: Passes::Count(4),
    clear_first: false,
};

/// Halt on an aborted transfer, otherwise log and carry on.
fn check<E: defmt::Format>(what: &str, result: Result<(), Error<E>>) {
    match result {
        Ok(()) => {}
        Err(err) if err.is_fatal() => defmt::panic!("{}: {}", what, err),
        Err(err) => defmt::warn!("{}: {}", what, err),
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());

    // Green LED pin on the Makerdiary nRF52840 connect kit
    // used to indicate firmware is running
    let mut led = Output::new(p.P1_11, Level::High, OutputDrive::Standard);
    led.set_low();

    static RAM_BUFFER: ConstStaticCell<[u8; 32]> = ConstStaticCell::new([0; 32]);
    let sda = p.P1_01;
    let scl = p.P1_02;
    let i2c = twim::Twim::new(
        p.TWISPI0,
        Irqs,
        sda,
        scl,
        twim::Config::default(),
        RAM_BUFFER.take(),
    );

    let config = DeviceConfig::new(DEFAULT_ADDRESS, NUM_LEDS);
    let mut ring = SeesawNeoPixel::new(I2cTransport::new(i2c), Delay, config);

    match ring.init().await {
        Ok(report) => {
            for (step, err) in report.failures() {
                defmt::warn!("bring-up step {} failed: {}", step, err);
            }
        }
        Err(err) => defmt::panic!("bring-up aborted: {}", err),
    }

    check("clear", ring.clear().await);
    check("pulser", ring.play_pulser(&BREATHE).await);
    check("tracer", ring.play_tracer(&CHASE).await);

    let forever = Pulser {
        passes: Passes::Forever,
        clear_first: false,
        ..BREATHE
    };
    loop {
        // Only returns on a failed transfer.
        check("pulser", ring.play_pulser(&forever).await);
    }
}
