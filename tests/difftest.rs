// End-to-end runs of the differential executor and the error oracle
// against stub shell-script tools.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use anyhow::Result;
use vfpu_difftest::{oracle, TestCase, Toolchain, Verdict};

/// Write an executable shell script into `dir`.
fn stub(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}", body))?;
    let mut perms = std::fs::metadata(&path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms)?;
    Ok(path)
}

// An "assembler" that copies its input to the -o path; with it on both
// sides every case must agree.
const AS_OK: &str = "cat > \"$2\"\n";
// Extraction stub: `objcopy -O binary --only-section=.text IN OUT`.
const OBJCOPY: &str = "cp \"$4\" \"$5\"\n";

#[test]
fn test_identical_stubs_agree() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let asm = stub(dir.path(), "as-ok", AS_OK)?;
    let tools = Toolchain {
        reference: asm.clone(),
        undertest: asm,
        objcopy: stub(dir.path(), "objcopy", OBJCOPY)?,
    };
    let case = TestCase::uniform("vadd.s S000.s, S000.s, S000.s");
    assert_eq!(tools.run_case(&case)?, Verdict::Agree);
    Ok(())
}

#[test]
fn test_diverging_output_is_reported() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tools = Toolchain {
        reference: stub(dir.path(), "as-ok", AS_OK)?,
        undertest: stub(dir.path(), "as-extra", "cat > \"$2\"\necho extra >> \"$2\"\n")?,
        objcopy: stub(dir.path(), "objcopy", OBJCOPY)?,
    };
    let case = TestCase::uniform("vflush");
    assert_eq!(tools.run_case(&case)?, Verdict::BinaryMismatch);
    Ok(())
}

#[test]
fn test_rejection_disagreement_is_reported() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tools = Toolchain {
        reference: stub(dir.path(), "as-ok", AS_OK)?,
        undertest: stub(dir.path(), "as-reject", "cat > /dev/null\nexit 1\n")?,
        objcopy: stub(dir.path(), "objcopy", OBJCOPY)?,
    };
    let case = TestCase::uniform("vflush");
    // raw wait status: exit code `n` is `n << 8`
    assert_eq!(
        tools.run_case(&case)?,
        Verdict::ExitMismatch {
            reference: ExitStatus::from_raw(0),
            undertest: ExitStatus::from_raw(1 << 8),
        }
    );
    Ok(())
}

#[test]
fn test_distinct_signal_deaths_are_reported() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tools = Toolchain {
        reference: stub(dir.path(), "as-segv", "cat > /dev/null\nkill -SEGV $$\n")?,
        undertest: stub(dir.path(), "as-kill", "cat > /dev/null\nkill -KILL $$\n")?,
        objcopy: stub(dir.path(), "objcopy", OBJCOPY)?,
    };
    let case = TestCase::uniform("vflush");
    // neither side has an exit code, but dying of different signals is
    // not agreement
    match tools.run_case(&case)? {
        Verdict::ExitMismatch {
            reference,
            undertest,
        } => {
            assert_eq!(reference.signal(), Some(11));
            assert_eq!(undertest.signal(), Some(9));
        }
        other => panic!("expected an exit mismatch, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_agreeing_rejection_needs_no_extraction() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let reject = stub(dir.path(), "as-reject", "cat > /dev/null\nexit 1\n")?;
    let tools = Toolchain {
        reference: reject.clone(),
        undertest: reject,
        // an objcopy that would fail the test if it ever ran
        objcopy: stub(dir.path(), "objcopy", "exit 99\n")?,
    };
    let case = TestCase::uniform("vflush");
    assert_eq!(tools.run_case(&case)?, Verdict::Agree);
    Ok(())
}

#[test]
fn test_bulk_corpus_with_divergent_syntax() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let asm = stub(dir.path(), "as-ok", AS_OK)?;
    let tools = Toolchain {
        reference: asm.clone(),
        undertest: asm,
        objcopy: stub(dir.path(), "objcopy", OBJCOPY)?,
    };
    // the two sides see different bytes, and the stub propagates them
    // verbatim, so a divergent case must show up as a binary mismatch
    let cases = vec![
        TestCase::uniform("vflush"),
        TestCase::divergent("vpfxs x,y,z,w", "vpfxs [x,y,z,w]"),
    ];
    assert_eq!(tools.run_bulk(&cases)?, Verdict::BinaryMismatch);

    let uniform = vec![TestCase::uniform("vflush"), TestCase::uniform("vsync")];
    assert_eq!(tools.run_bulk(&uniform)?, Verdict::Agree);
    Ok(())
}

#[test]
fn test_oracle_counts_unexpected_successes() -> Result<()> {
    let dir = tempfile::tempdir()?;
    // an assembler that accepts everything fails exactly the entries
    // that expect a diagnostic
    let accept = stub(dir.path(), "as-accept", "cat > /dev/null\n")?;
    let expected = oracle::TABLE
        .iter()
        .filter(|(_, expect)| matches!(expect, oracle::Expect::Err(_)))
        .count();
    assert_eq!(oracle::run(&accept)?, expected);
    Ok(())
}

#[test]
fn test_oracle_counts_unexpected_errors() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let reject = stub(dir.path(), "as-reject", "cat > /dev/null\nexit 1\n")?;
    // an assembler that rejects everything with no diagnostic fails the
    // whole table: success entries see an error, error entries see no
    // matching pattern
    assert_eq!(oracle::run(&reject)?, oracle::TABLE.len());
    Ok(())
}
