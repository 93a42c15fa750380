use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use align_probe::output::{format_result, to_json_pretty};
use align_probe::{AlignmentProbe, ConfigError, Mode, MonotonicClock, RunConfig};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::prelude::*;

/// Check block device alignment by timing I/O at offsets within one physical interval.
#[derive(Parser, Debug)]
#[command(name = "align-probe", version, about)]
struct Cli {
    /// Read one block per repetition
    #[arg(short, long)]
    read: bool,

    /// Write one block per repetition (DESTROYS DEVICE CONTENTS)
    #[arg(short, long)]
    write: bool,

    /// Bytes per I/O operation [default: 512]
    #[arg(short = 'b', long, value_name = "BYTES")]
    block_size: Option<u64>,

    /// Size of the physical unit to probe, e.g. erase block or stripe
    #[arg(short = 'i', long, value_name = "BYTES")]
    interval_size: Option<u64>,

    /// Distance between candidate offsets [default: 512]
    #[arg(short = 's', long, value_name = "BYTES")]
    offset_step: Option<u64>,

    /// Strided repetitions per offset [default: 64]
    #[arg(short = 'c', long, value_name = "N")]
    count: Option<u64>,

    /// Interval-sized strides to skip before the timed range
    #[arg(short = 'k', long, value_name = "N")]
    skip_count: Option<u64>,

    /// Confirm that write mode may destroy data on FILE
    #[arg(long)]
    yes: bool,

    /// Seconds to wait before writing, so the run can still be cancelled
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    delay: u64,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Do not print the progress line
    #[arg(short, long)]
    quiet: bool,

    /// Device or file to probe
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

impl Cli {
    /// Defaults, then `ALIGN_PROBE_*` environment, then flags.
    fn run_config(&self) -> Result<RunConfig, ConfigError> {
        let mut config = RunConfig::default().merge_env();
        config.mode = Mode::from_flags(self.read, self.write)?;
        if let Some(v) = self.block_size {
            config.block_size = v;
        }
        if let Some(v) = self.interval_size {
            config.interval_size = v;
        }
        if let Some(v) = self.offset_step {
            config.offset_step = v;
        }
        if let Some(v) = self.count {
            config.repeat_count = v;
        }
        if let Some(v) = self.skip_count {
            config.skip_count = v;
        }
        if config.mode.writes() && !self.yes {
            return Err(ConfigError::WriteNotConfirmed);
        }
        config.validated()
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("align-probe: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = cli.run_config()?;
    let mut file = align_probe::device::open(&cli.file, config.mode)?;

    if config.mode.writes() {
        eprintln!(
            "WARNING! {} mode, disk contents will be destroyed!",
            config.mode.label()
        );
        eprintln!("Hit Ctrl+C now to cancel");
        thread::sleep(Duration::from_secs(cli.delay));
    }

    let quiet = cli.quiet;
    let mut result = AlignmentProbe::with_config(config).run_with(
        &mut file,
        MonotonicClock::new(),
        |p| {
            if !quiet {
                eprint!(
                    "test {}/{} (offset {})...\r",
                    p.index + 1,
                    p.total,
                    p.base_offset
                );
            }
        },
    );
    if !quiet {
        eprintln!();
    }
    if let Ok(result) = result.as_mut() {
        result.metadata.device = Some(cli.file.display().to_string());
    }
    let result = result.with_context(|| format!("probing {}", cli.file.display()))?;

    if cli.json {
        println!("{}", to_json_pretty(&result)?);
    } else {
        print!("{}", format_result(&result));
    }

    Ok(ExitCode::from(result.verdict.exit_code()))
}
