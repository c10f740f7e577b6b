//! Shared fakes for exercising the accessory against its platform seams.

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::rc::Rc;

use lightstrip_core::{
    Duration, EventQueue, Fault, KeyValueStore, Lightstrip, Rgb, StripDriver, TickTimer,
    TimerStart, TimerStop,
};

pub const LED_COUNT: usize = 8;

pub type TestStrip<'a> = Lightstrip<'a, FakeStrip, FakeStore, FakeTimer, LED_COUNT>;

// ============================================================================
// Recording strip driver
// ============================================================================

/// Everything the accessory told the LED hardware.
#[derive(Default)]
pub struct StripLog {
    /// History of global brightness settings, oldest first.
    pub brightness: Vec<u8>,
    /// The most recently written frame.
    pub last_frame: Vec<Rgb>,
    /// Number of frames written.
    pub writes: usize,
}

pub struct FakeStrip(pub Rc<RefCell<StripLog>>);

impl StripDriver for FakeStrip {
    fn set_brightness(&mut self, value: u8) {
        self.0.borrow_mut().brightness.push(value);
    }

    fn write(&mut self, colors: &[Rgb]) {
        let mut log = self.0.borrow_mut();
        log.last_frame = colors.to_vec();
        log.writes += 1;
    }
}

// ============================================================================
// Fake periodic timer
// ============================================================================

#[derive(Default)]
pub struct TimerLog {
    pub running: bool,
    /// Start requests, including ones answered with `AlreadyRunning`.
    pub starts: usize,
    /// Stop requests, including ones answered with `AlreadyStopped`.
    pub stops: usize,
    pub interval: Option<Duration>,
    /// When set, the next start request fails with a platform fault.
    pub fail: bool,
}

pub struct FakeTimer(pub Rc<RefCell<TimerLog>>);

impl TickTimer for FakeTimer {
    fn start_periodic(&mut self, interval: Duration) -> Result<TimerStart, Fault> {
        let mut log = self.0.borrow_mut();
        log.starts += 1;
        if log.fail {
            return Err(Fault::Timer);
        }
        if log.running {
            return Ok(TimerStart::AlreadyRunning);
        }
        log.running = true;
        log.interval = Some(interval);
        Ok(TimerStart::Started)
    }

    fn stop(&mut self) -> TimerStop {
        let mut log = self.0.borrow_mut();
        log.stops += 1;
        if log.running {
            log.running = false;
            TimerStop::Stopped
        } else {
            TimerStop::AlreadyStopped
        }
    }
}

// ============================================================================
// In-memory key-value store
// ============================================================================

#[derive(Default)]
pub struct StoreLog {
    /// The single record under the accessory's domain/key.
    pub record: Option<Vec<u8>>,
    /// Number of committed writes.
    pub writes: usize,
    /// When set, every operation fails with a platform fault.
    pub fail: bool,
}

pub struct FakeStore(pub Rc<RefCell<StoreLog>>);

impl KeyValueStore for FakeStore {
    fn get(&mut self, _domain: u8, _key: u8, buf: &mut [u8]) -> Result<Option<usize>, Fault> {
        let log = self.0.borrow();
        if log.fail {
            return Err(Fault::Store);
        }
        match &log.record {
            Some(record) => {
                let len = record.len().min(buf.len());
                buf[..len].copy_from_slice(&record[..len]);
                Ok(Some(len))
            }
            None => Ok(None),
        }
    }

    fn set(&mut self, _domain: u8, _key: u8, value: &[u8]) -> Result<(), Fault> {
        let mut log = self.0.borrow_mut();
        if log.fail {
            return Err(Fault::Store);
        }
        log.record = Some(value.to_vec());
        log.writes += 1;
        Ok(())
    }
}

// ============================================================================
// Fixture
// ============================================================================

/// Observation handles for the three platform fakes.
pub struct Platform {
    pub strip: Rc<RefCell<StripLog>>,
    pub timer: Rc<RefCell<TimerLog>>,
    pub store: Rc<RefCell<StoreLog>>,
}

/// Boot an accessory with an empty store (factory defaults).
pub fn boot(events: &EventQueue) -> (TestStrip<'_>, Platform) {
    boot_with_record(events, None)
}

/// Boot an accessory with a pre-seeded store record.
pub fn boot_with_record(events: &EventQueue, record: Option<Vec<u8>>) -> (TestStrip<'_>, Platform) {
    let platform = Platform {
        strip: Rc::new(RefCell::new(StripLog::default())),
        timer: Rc::new(RefCell::new(TimerLog::default())),
        store: Rc::new(RefCell::new(StoreLog {
            record,
            ..StoreLog::default()
        })),
    };
    let strip = Lightstrip::new(
        FakeStrip(platform.strip.clone()),
        FakeStore(platform.store.clone()),
        FakeTimer(platform.timer.clone()),
        events.sender(),
    )
    .expect("boot failed");
    (strip, platform)
}

/// Drive ticks while the platform timer is running.
///
/// Returns the number of ticks taken; panics if the transition does not
/// converge within a generous bound.
pub fn run_to_idle(strip: &mut TestStrip<'_>, platform: &Platform) -> usize {
    let mut ticks = 0;
    while platform.timer.borrow().running {
        strip.tick();
        ticks += 1;
        assert!(ticks <= 600, "transition did not converge");
    }
    ticks
}
