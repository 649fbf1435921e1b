use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use vfpu_difftest::{corpus, logging, pool::WorkerPool, TestCase, Toolchain, Verdict};

// Isolated-mode concurrency: worker threads and the pending-queue
// high-water mark that backpressures submission.
const WORKERS: usize = 64;
const BACKLOG: usize = 2048;

/// VFPU assembly compare test tool.
///
/// Pairs two `as` executables (a reference model and an executable under
/// test), assembles a generated instruction corpus with both and
/// compares their binary outputs. Mismatches are printed; the exit
/// status does not reflect them.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Args {
    /// Path (or executable within PATH) to invoke the reference `as`
    #[arg(long)]
    reference: PathBuf,

    /// Path (or executable within PATH) to invoke the `as` under test
    #[arg(long)]
    undertest: PathBuf,

    /// Path (or executable within PATH) to invoke objcopy
    #[arg(long)]
    objcopy: PathBuf,

    #[command(flatten)]
    verbose: Verbosity,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::logging_setup(logging::verbose_level_to_trace(args.verbose.log_level()));

    let tools = Arc::new(Toolchain {
        reference: args.reference,
        undertest: args.undertest,
        objcopy: args.objcopy,
    });

    let cases = corpus::isolated_corpus();
    tracing::info!("running {} isolated cases", cases.len());

    let pool = WorkerPool::new(WORKERS, BACKLOG);
    for case in cases {
        let tools = Arc::clone(&tools);
        pool.submit(move || match tools.run_case(&case) {
            Ok(verdict) => report(&case, &verdict),
            Err(e) => tracing::error!("case `{}`: {:#}", case, e),
        });
    }
    pool.join();

    let bulk = corpus::bulk_corpus();
    tracing::info!("running bulk corpus of {} cases", bulk.len());
    match tools.run_bulk(&bulk)? {
        Verdict::Agree => {}
        Verdict::ExitMismatch { .. } => {
            // a single bad instruction fails the whole unit; bulk mode
            // cannot attribute it
            println!(
                "{}",
                ansi_term::Colour::Red
                    .bold()
                    .paint("failed assembly of the bulk corpus")
            );
        }
        Verdict::BinaryMismatch => {
            println!(
                "{}",
                ansi_term::Colour::Red
                    .bold()
                    .paint("binary output mismatch in the bulk corpus")
            );
        }
    }
    Ok(())
}

fn report(case: &TestCase, verdict: &Verdict) {
    let red = ansi_term::Colour::Red.bold();
    match verdict {
        Verdict::Agree => {}
        Verdict::ExitMismatch {
            reference,
            undertest,
        } => println!(
            "{}",
            red.paint(format!(
                "exit status mismatch for test `{}` (reference {}, undertest {})",
                case, reference, undertest
            ))
        ),
        Verdict::BinaryMismatch => println!(
            "{}",
            red.paint(format!("binary output mismatch for test `{}`", case))
        ),
    }
}
