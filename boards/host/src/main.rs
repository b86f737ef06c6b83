//! Ignition-coil controller on the host
//!
//! Replays an operator script against the controller running on the
//! simulated port, then prints the status screen, the LEDs and what the
//! coil output did.
//!
//! ```text
//! ignition-host press wait:200 up*5 switch wait:50 switch wait:500
//! ```

mod bench;
mod config;
mod script;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ignition_core::TickSource;
use ignition_sequencer::{EdgeOutcome, Sequencer};
use ignition_sim::logger;
use ignition_sim::ticker::{Ticker, TICK_PERIOD};

use crate::bench::Bench;

/// Millisecond counter fed by the ticker thread
static TICKS: TickSource = TickSource::new();

#[derive(Parser, Debug)]
#[command(author, version, about = "Ignition-coil pulse driver on a simulated board")]
struct Opts {
    /// JSON controller configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start-up RPM, overriding the configuration
    #[arg(long)]
    rpm: Option<u32>,

    /// error, warn, info, debug or trace
    #[arg(long = "log-level", default_value = "info", value_name = "LEVEL")]
    log_level: String,

    /// Pause after each control action, in milliseconds
    #[arg(long = "gap", default_value_t = 20, value_name = "MS")]
    gap_ms: u64,

    /// Operator actions: up, down, press, switch, wait:<ms>; `<word>*<n>` repeats
    #[arg(value_name = "STEP")]
    script: Vec<String>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    logger::init(logger::parse_level(&opts.log_level)?)?;

    let config = config::finish(config::load(opts.config.as_deref())?, opts.rpm)?;
    let steps = script::parse(&opts.script)?;

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .context("cannot install Ctrl-C handler")?;
    }

    let mut ticker = Ticker::start(&TICKS, TICK_PERIOD)?;

    let sequencer = Sequencer::from_config(&config);
    let mut bench = Bench::new(config, &sequencer, &TICKS).context("controller failed to start")?;
    let gap = Duration::from_millis(opts.gap_ms);

    for step in steps {
        if interrupted.load(Ordering::SeqCst) {
            log::warn!("interrupted, stopping script");
            break;
        }
        if let Some(outcome) = bench.apply(step)? {
            match outcome {
                EdgeOutcome::Dropped(command) => {
                    log::warn!("{:?}: command stack full, {} dropped", step, command)
                }
                _ => log::info!("{:?} -> {:?}", step, outcome),
            }
            bench.wait(gap);
        }
    }

    ticker.stop();
    report(&bench);
    Ok(())
}

fn report(bench: &Bench<'_>) {
    let state = bench.state();
    println!("{}", bench.display());
    println!("leds:      {}", bench.leds());
    println!(
        "rpm:       commanded {} / applied {} ({})",
        state.commanded,
        state.applied,
        if state.is_matched() { "match" } else { "mismatch" }
    );
    println!(
        "output:    {} (counter {})",
        if state.output_enabled { "enabled" } else { "disabled" },
        if bench.timer_running() { "running" } else { "stopped" }
    );
    match bench.pulse_summary() {
        Ok(summary) => println!("waveform:  {}", summary),
        Err(err) => println!("waveform:  {}", err),
    }
}
