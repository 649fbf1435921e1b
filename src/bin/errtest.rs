use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use vfpu_difftest::{logging, oracle};

/// VFPU assembling errors validator.
///
/// Validates that `as` produces the documented diagnostics on invalid
/// inputs: bad register names, register conflicts, out-of-range
/// immediates and illegal prefixes. Failures are printed; the exit
/// status does not reflect them.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Args {
    /// Path (or executable within PATH) to invoke for `as`
    #[arg(long)]
    assembler: PathBuf,

    #[command(flatten)]
    verbose: Verbosity,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::logging_setup(logging::verbose_level_to_trace(args.verbose.log_level()));

    let failures = oracle::run(&args.assembler)?;
    if failures > 0 {
        tracing::warn!("{} of {} oracle entries failed", failures, oracle::TABLE.len());
    } else {
        tracing::info!("all {} oracle entries passed", oracle::TABLE.len());
    }
    Ok(())
}
