//! Test doubles: a scripted bus, a recording delay and a model of the
//! device's pixel memory.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::{pending, poll_fn};
use std::rc::Rc;
use std::task::Poll;

use embassy_futures::yield_now;
use embassy_seesaw_neopixel::{DeviceConfig, SeesawNeoPixel, TransferEvent, Transport};
use embedded_hal_async::delay::DelayNs;

pub use embassy_futures::block_on;

pub const ADDRESS: u8 = 0x60;
pub const SHOW: [u8; 2] = [0x0E, 0x05];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Open,
    Bind(u8),
    Write(Vec<u8>),
    /// Microseconds.
    Delay(u64),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// What the bus does with a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Complete,
    Abort,
    /// Report completion once the delay has run this many times.
    After(usize),
    /// Accept the write but never report completion.
    Silent,
    /// Refuse to start the write.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected;

pub struct FakeBus {
    log: Log,
    replies: VecDeque<Reply>,
    default_reply: Reply,
    fail_open: bool,
    fail_bind: bool,
}

impl FakeBus {
    pub fn new(log: &Log) -> Self {
        Self {
            log: Rc::clone(log),
            replies: VecDeque::new(),
            default_reply: Reply::Complete,
            fail_open: false,
            fail_bind: false,
        }
    }

    /// Reply used once the scripted replies run out.
    pub fn always(mut self, reply: Reply) -> Self {
        self.default_reply = reply;
        self
    }

    /// Script the reply to the next unscripted write.
    pub fn then(mut self, reply: Reply) -> Self {
        self.replies.push_back(reply);
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn failing_bind(mut self) -> Self {
        self.fail_bind = true;
        self
    }
}

impl Transport for FakeBus {
    type Error = Rejected;

    fn open(&mut self) -> Result<(), Rejected> {
        self.log.borrow_mut().push(Event::Open);
        if self.fail_open { Err(Rejected) } else { Ok(()) }
    }

    fn bind_address(&mut self, address: u8) -> Result<(), Rejected> {
        self.log.borrow_mut().push(Event::Bind(address));
        if self.fail_bind { Err(Rejected) } else { Ok(()) }
    }

    async fn write(&mut self, bytes: &[u8], _restart: bool) -> Result<TransferEvent, Rejected> {
        let reply = self.replies.pop_front().unwrap_or(self.default_reply);
        if reply == Reply::Reject {
            return Err(Rejected);
        }

        self.log.borrow_mut().push(Event::Write(bytes.to_vec()));
        match reply {
            Reply::Complete => Ok(TransferEvent::Complete),
            Reply::Abort => Ok(TransferEvent::Aborted),
            Reply::After(ticks) => {
                let start = delay_count(&self.log);
                poll_fn(|_| {
                    if delay_count(&self.log) - start >= ticks {
                        Poll::Ready(())
                    } else {
                        Poll::Pending
                    }
                })
                .await;
                Ok(TransferEvent::Complete)
            }
            Reply::Silent | Reply::Reject => pending().await,
        }
    }
}

pub struct FakeDelay {
    log: Log,
}

impl FakeDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: Rc::clone(log) }
    }
}

impl FakeDelay {
    // Like a real timer, give other futures a turn before returning.
    async fn record(&mut self, us: u64) {
        self.log.borrow_mut().push(Event::Delay(us));
        yield_now().await;
    }
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.record(u64::from(ns) / 1000).await;
    }

    async fn delay_us(&mut self, us: u32) {
        self.record(u64::from(us)).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.record(u64::from(ms) * 1000).await;
    }
}

pub type Ring = SeesawNeoPixel<FakeBus, FakeDelay>;

pub fn ring(pixel_count: u8, bus: FakeBus, log: &Log) -> Ring {
    SeesawNeoPixel::new(bus, FakeDelay::new(log), DeviceConfig::new(ADDRESS, pixel_count))
}

/// Every frame that went out, in order.
pub fn writes(log: &Log) -> Vec<Vec<u8>> {
    log.borrow()
        .iter()
        .filter_map(|event| match event {
            Event::Write(bytes) => Some(bytes.clone()),
            _ => None,
        })
        .collect()
}

/// Number of delays so far.
pub fn delay_count(log: &Log) -> usize {
    log.borrow()
        .iter()
        .filter(|event| matches!(event, Event::Delay(_)))
        .count()
}

/// Total time spent in delays, in microseconds.
pub fn delayed_us(log: &Log) -> u64 {
    log.borrow()
        .iter()
        .map(|event| match event {
            Event::Delay(us) => *us,
            _ => 0,
        })
        .sum()
}

pub fn is_pixel_write(frame: &[u8]) -> bool {
    frame.len() >= 4 && frame[0] == 0x0E && frame[1] == 0x04
}

pub fn offset_of(frame: &[u8]) -> usize {
    usize::from(u16::from_be_bytes([frame[2], frame[3]]))
}

/// Replays pixel buffer writes into a copy of the device's pixel memory.
pub struct PixelMemory {
    bytes: Vec<u8>,
    pub shows: usize,
}

impl PixelMemory {
    /// Memory filled with `0xAA` so untouched bytes stand out.
    pub fn replay(pixel_count: usize, frames: &[Vec<u8>]) -> Self {
        let mut memory = Self {
            bytes: vec![0xAA; pixel_count * 3],
            shows: 0,
        };
        for frame in frames {
            if frame.as_slice() == SHOW {
                memory.shows += 1;
            } else if is_pixel_write(frame) {
                let offset = offset_of(frame);
                let payload = &frame[4..];
                assert!(
                    offset + payload.len() <= memory.bytes.len(),
                    "write past pixel memory: {frame:02x?}"
                );
                memory.bytes[offset..offset + payload.len()].copy_from_slice(payload);
            }
        }
        memory
    }

    /// Wire bytes of one pixel.
    pub fn pixel(&self, index: usize) -> [u8; 3] {
        let start = index * 3;
        [self.bytes[start], self.bytes[start + 1], self.bytes[start + 2]]
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        (0..self.bytes.len() / 3).map(|index| self.pixel(index))
    }
}
