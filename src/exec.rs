//! Differential execution of assembler pairs and binary comparison.
//!
//! Both assemblers receive the source text over stdin and write their
//! object to a caller-chosen path. When both exit zero, the external
//! extractor strips the `.text` section of each object to a raw file and
//! the two byte streams are compared exactly. Temporary files come from
//! `tempfile`, so concurrent workers never collide and cleanup happens
//! on drop.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::corpus::TestCase;

/// Paths of the external tools the harness drives.
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub reference: PathBuf,
    pub undertest: PathBuf,
    pub objcopy: PathBuf,
}

/// Captured result of one assembler invocation.
#[derive(Debug)]
pub struct Invocation {
    pub status: ExitStatus,
    pub stderr: Vec<u8>,
}

/// Outcome of comparing one case (or one whole bulk corpus).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Same exit code, and byte-identical code sections if both
    /// succeeded. Two equal non-zero exits count as agreement without
    /// further inspection.
    Agree,
    ExitMismatch {
        reference: ExitStatus,
        undertest: ExitStatus,
    },
    BinaryMismatch,
}

/// Feed `source` to an assembler over stdin and wait for it. `obj` is
/// passed as the `-o` output path when present (the error oracle runs
/// without one). The trailing newline the protocol requires is appended
/// here.
pub fn run_assembler(exec: &Path, obj: Option<&Path>, source: &str) -> Result<Invocation> {
    let mut cmd = Command::new(exec);
    if let Some(obj) = obj {
        cmd.arg("-o").arg(obj);
    }
    let child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawn assembler `{}`", exec.display()))?;
    complete(child, source)
}

fn complete(mut child: Child, source: &str) -> Result<Invocation> {
    let mut stdin = child.stdin.take().context("assembler stdin not piped")?;
    let text = format!("{}\n", source);
    let output = std::thread::scope(|scope| {
        // the assembler may exit before reading all of its input, so
        // write errors are not meaningful on their own
        scope.spawn(move || {
            let _ = stdin.write_all(text.as_bytes());
        });
        child.wait_with_output()
    })
    .context("wait for assembler")?;
    Ok(Invocation {
        status: output.status,
        stderr: output.stderr,
    })
}

/// Exit-status half of the decision table. `None` means both sides
/// succeeded and the byte comparison must decide. The full wait status
/// is compared, so two deaths by different signals still mismatch.
pub fn compare_exits(reference: ExitStatus, undertest: ExitStatus) -> Option<Verdict> {
    if reference != undertest {
        Some(Verdict::ExitMismatch {
            reference,
            undertest,
        })
    } else if !reference.success() {
        Some(Verdict::Agree)
    } else {
        None
    }
}

impl Toolchain {
    /// Run one case in isolation on fresh temporary files.
    pub fn run_case(&self, case: &TestCase) -> Result<Verdict> {
        self.run_sources(case.reference_text(), case.undertest_text())
    }

    /// Run a whole corpus as one assembly unit per side.
    pub fn run_bulk(&self, cases: &[TestCase]) -> Result<Verdict> {
        let (reference, undertest) = crate::corpus::bulk_sources(cases);
        tracing::info!(
            "bulk corpus: {} cases, {} KB of assembly",
            cases.len(),
            reference.len() / 1024
        );
        self.run_sources(reference.trim_end_matches('\n'), undertest.trim_end_matches('\n'))
    }

    fn run_sources(&self, reference_src: &str, undertest_src: &str) -> Result<Verdict> {
        let ref_obj = temp_path()?;
        let tst_obj = temp_path()?;

        // spawn both before waiting on either, so the pair runs
        // concurrently
        let ref_child = self.spawn_assembler(&self.reference, ref_obj.path())?;
        let tst_child = self.spawn_assembler(&self.undertest, tst_obj.path())?;
        let reference = complete(ref_child, reference_src)?;
        let undertest = complete(tst_child, undertest_src)?;

        if let Some(verdict) = compare_exits(reference.status, undertest.status) {
            return Ok(verdict);
        }

        let ref_bin = temp_path()?;
        let tst_bin = temp_path()?;
        self.extract_text_section(ref_obj.path(), ref_bin.path())?;
        self.extract_text_section(tst_obj.path(), tst_bin.path())?;

        let ref_bytes = std::fs::read(ref_bin.path()).context("read reference code section")?;
        let tst_bytes = std::fs::read(tst_bin.path()).context("read undertest code section")?;
        if ref_bytes != tst_bytes {
            return Ok(Verdict::BinaryMismatch);
        }
        Ok(Verdict::Agree)
    }

    fn spawn_assembler(&self, exec: &Path, obj: &Path) -> Result<Child> {
        Command::new(exec)
            .arg("-o")
            .arg(obj)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawn assembler `{}`", exec.display()))
    }

    /// Strip the executable section of `obj` into a raw binary at `out`.
    /// The extractor's exit code is deliberately not inspected; the byte
    /// comparison of its outputs is the only oracle.
    fn extract_text_section(&self, obj: &Path, out: &Path) -> Result<()> {
        Command::new(&self.objcopy)
            .args(["-O", "binary", "--only-section=.text"])
            .arg(obj)
            .arg(out)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("spawn objcopy `{}`", self.objcopy.display()))?;
        Ok(())
    }
}

fn temp_path() -> Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix("as-test-")
        .tempfile()
        .context("create temporary file")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::os::unix::process::ExitStatusExt;

    // raw wait status: exit code `n` is `n << 8`, signal `s` is `s`
    fn exited(code: i32) -> ExitStatus {
        ExitStatus::from_raw(code << 8)
    }

    fn signaled(signal: i32) -> ExitStatus {
        ExitStatus::from_raw(signal)
    }

    #[test]
    fn test_exit_decision_table() {
        // both zero: byte comparison decides
        assert_eq!(compare_exits(exited(0), exited(0)), None);
        // one side rejects
        assert_eq!(
            compare_exits(exited(0), exited(1)),
            Some(Verdict::ExitMismatch {
                reference: exited(0),
                undertest: exited(1)
            })
        );
        assert_eq!(
            compare_exits(exited(1), exited(0)),
            Some(Verdict::ExitMismatch {
                reference: exited(1),
                undertest: exited(0)
            })
        );
        // both reject identically: agreement, nothing further checked
        assert_eq!(compare_exits(exited(1), exited(1)), Some(Verdict::Agree));
        // differing failure codes are still a mismatch
        assert_eq!(
            compare_exits(exited(1), exited(2)),
            Some(Verdict::ExitMismatch {
                reference: exited(1),
                undertest: exited(2)
            })
        );
        // death by signal on one side can never be agreement with success
        assert_eq!(
            compare_exits(signaled(11), exited(0)),
            Some(Verdict::ExitMismatch {
                reference: signaled(11),
                undertest: exited(0)
            })
        );
    }

    #[test]
    fn test_distinct_signal_deaths_mismatch() {
        // SIGSEGV vs SIGKILL have no exit code, but they are not the
        // same outcome
        assert_eq!(
            compare_exits(signaled(11), signaled(9)),
            Some(Verdict::ExitMismatch {
                reference: signaled(11),
                undertest: signaled(9)
            })
        );
        // the same signal on both sides is agreement, like equal
        // non-zero exit codes
        assert_eq!(compare_exits(signaled(11), signaled(11)), Some(Verdict::Agree));
    }

    #[test]
    fn test_temp_paths_are_unique() {
        let a = temp_path().unwrap();
        let b = temp_path().unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("as-test-"));
    }
}
