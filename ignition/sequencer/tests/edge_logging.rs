//! Edge handlers run in interrupt context and must stay below the levels a
//! host logger prints synchronously.

use std::sync::Mutex;

use ignition_core::{Command, IgnitionConfig, Tick};
use ignition_hal::Level;
use ignition_sequencer::{EdgeOutcome, InputSource, Sequencer, STACK_CAPACITY};
use log::{LevelFilter, Log, Metadata, Record};

struct Capture {
    levels: Mutex<Vec<log::Level>>,
}

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut levels) = self.levels.lock() {
            levels.push(record.level());
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    levels: Mutex::new(Vec::new()),
};

#[test]
fn edge_handlers_log_at_trace_only() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let seq = Sequencer::from_config(&IgnitionConfig::default());
    for _ in 0..STACK_CAPACITY {
        seq.push(Command::Increase).unwrap();
    }

    assert_eq!(
        seq.on_edge(InputSource::Button, Tick::new(100), Level::High),
        EdgeOutcome::Dropped(Command::ToggleOutput)
    );
    assert_eq!(
        seq.on_edge(InputSource::Button, Tick::new(105), Level::High),
        EdgeOutcome::Debounced
    );

    let levels = CAPTURE.levels.lock().unwrap();
    assert_eq!(levels.len(), 2);
    assert!(levels.iter().all(|level| *level == log::Level::Trace));
}
