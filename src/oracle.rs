//! Error-oracle validation of a single assembler's diagnostics.
//!
//! The table below is executable documentation of the assembler's
//! semantic rules: each entry pairs an instruction with either "must
//! assemble" or a pattern its diagnostic must match. Patterns are
//! regular expressions searched (not anchored) against the full stderr
//! text, so wildcards can stand in for operand spellings.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::exec::{run_assembler, Invocation};

/// Expected outcome for one oracle entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Exit code must be zero.
    Ok,
    /// Exit code must be non-zero and stderr must match this pattern.
    Err(&'static str),
}

/// Why an oracle entry failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleFailure {
    /// An error was raised where none was expected.
    UnexpectedError { stderr: String },
    /// Exit code was zero where an error was expected.
    UnexpectedSuccess,
    /// An error was raised but its text does not match the pattern.
    PatternMismatch { stderr: String },
}

/// The oracle table, in execution order.
pub const TABLE: &[(&str, Expect)] = &[
    ("vadd.s W000, W000, W000", Expect::Err("invalid operand")),
    ("vadd.s $4, $4, $4", Expect::Err("invalid operand")),
    (
        "vadd.q S000, S000, S000",
        Expect::Err("register type mismatch.*vector.*required"),
    ),
    (
        "vadd.s R000, R000, R000",
        Expect::Err("register type mismatch.*single.*required"),
    ),
    ("vadd.t R010, R000, R000", Expect::Ok),
    (
        "vadd.t R020, R000, R000",
        Expect::Err("register type mismatch.*triple.*required"),
    ),
    ("vadd.t R020.t, R000, R000", Expect::Err("invalid operand")),
    (
        "vadd.q R020, R000, R000",
        Expect::Err("register type mismatch.*quad.*required"),
    ),
    (
        "vadd.q R000.t, R000, R000",
        Expect::Err("register type mismatch.*quad.*required"),
    ),
    // register overlap: two operands conflict when they share a matrix,
    // unless the destination slice is disjoint from the source
    ("vcos.q R000, R000", Expect::Ok),
    ("vcos.q R000, C000", Expect::Err("register conflict..R000")),
    ("vcos.q R003, C010", Expect::Err("register conflict..R003")),
    ("vcos.q R001, C020", Expect::Err("register conflict..R001")),
    ("vcos.p R000, C000", Expect::Err("register conflict..R000")),
    ("vcos.p R001, C000", Expect::Err("register conflict..R001")),
    ("vcos.p R022, C022", Expect::Err("register conflict..R022")),
    ("vcos.p R002, C000", Expect::Ok),
    ("vcos.p R000, C020", Expect::Ok),
    ("vcos.p R000, C030", Expect::Ok),
    ("vcos.t R000, C030", Expect::Ok),
    ("vcos.t R000, C031", Expect::Ok),
    ("vcos.t R001, C031", Expect::Ok),
    ("vcos.t R010, C030", Expect::Err("register conflict..R010")),
    ("vcos.t R000, R000", Expect::Ok),
    ("vcos.t R000, R010", Expect::Err("register conflict..R000")),
    ("vcos.t R010, R000", Expect::Err("register conflict..R010")),
    ("vmmul.q M000, M100, M100", Expect::Ok),
    ("vmmul.q E000, M100, M100", Expect::Ok),
    ("vmmul.q E100, M100, M100", Expect::Err("register conflict..E100")),
    ("vmmul.p M000, M022, M020", Expect::Ok),
    ("vmmul.p M000, M022, M002", Expect::Ok),
    ("vmmul.p M000, M022, M000", Expect::Err("register conflict..M000")),
    ("vmmul.p M022, M020, M022", Expect::Err("register conflict..M022")),
    ("vmmul.p E022, M020, M022", Expect::Err("register conflict..E022")),
    ("vmmul.t M000, M001, M010", Expect::Err("register conflict..M000")),
    ("vtfm2.p R000, M000, R020", Expect::Err("register conflict..R000")),
    ("vtfm2.p R000, M002, R020", Expect::Ok),
    ("vtfm2.p R000, M002, C020", Expect::Ok),
    // compare condition codes take two, one or zero operands
    ("vcmp.q NE, R000, R002", Expect::Ok),
    ("vcmp.q NZ, R000", Expect::Ok),
    ("vcmp.q NN, R000", Expect::Ok),
    ("vcmp.q NS, R000", Expect::Ok),
    ("vcmp.q EZ, R000", Expect::Ok),
    ("vcmp.q FL", Expect::Ok),
    ("vcmp.q TR", Expect::Ok),
    ("vcmp.q NE, R000", Expect::Err("invalid")),
    ("vcmp.q NE", Expect::Err("invalid")),
    // signed 16-bit immediate bounds
    ("viim.s S123, 32000", Expect::Ok),
    ("viim.s S123, -32000", Expect::Ok),
    ("viim.s S123, 65536", Expect::Err("out of range")),
    ("viim.s S123, -32769", Expect::Err("out of range")),
    ("viim.s S123, 128000", Expect::Err("out of range")),
    ("vrot.q R000,S100,[0,0,0,0]", Expect::Err("invalid")),
    // prefix legality
    ("vpfxs [0,0,0,0]", Expect::Ok),
    ("vpfxd [m,0,0,0]", Expect::Err("cannot contain.*constant")),
    ("vpfxs [,,,]", Expect::Ok),
    ("vpfxd [,,,]", Expect::Ok),
    ("vpfxd [x,,,]", Expect::Err("cannot contain.*swizzle")),
    ("vpfxd ,,,,", Expect::Err("invalid operands")),
    ("vpfxd ,,,", Expect::Err("invalid operands")),
    ("vpfxd ,,", Expect::Err("invalid operands")),
    ("vadd.p R000, R100, R200[x,x]", Expect::Ok),
    ("vadd.p R000, R100, R200[y,y]", Expect::Ok),
    (
        "vadd.p R000, R100, R200[x,x,x]",
        Expect::Err("mismatched prefix size.*too many"),
    ),
    (
        "vadd.p R000, R100, R200[y]",
        Expect::Err("mismatched prefix size.*too few"),
    ),
    ("vadd.s S000, S100, S200[x]", Expect::Ok),
    ("vadd.s S000, S100, S200[y]", Expect::Err("swizzle.*out of range")),
    ("vadd.p R000, R100, R200[z,z]", Expect::Err("swizzle.*out of range")),
    ("vadd.p R000, R100, R200[w,w]", Expect::Err("swizzle.*out of range")),
    ("vadd.t R000, R100, R200[z,z,z]", Expect::Ok),
    ("vadd.t R000, R100, R200[w,w,w]", Expect::Err("swizzle.*out of range")),
    (
        "vf2id.q R000[-1:1,,,], R100, 12",
        Expect::Err("can only do masking in destination"),
    ),
    (
        "vi2f.q R000, R100[1,x,x,y], 12",
        Expect::Err("can only perform swizzle in source prefix"),
    ),
];

/// Classify one invocation against its expectation.
pub fn check(expect: Expect, exit_ok: bool, stderr: &str) -> Result<Option<OracleFailure>> {
    match expect {
        Expect::Ok if exit_ok => Ok(None),
        Expect::Ok => Ok(Some(OracleFailure::UnexpectedError {
            stderr: stderr.to_string(),
        })),
        Expect::Err(_) if exit_ok => Ok(Some(OracleFailure::UnexpectedSuccess)),
        Expect::Err(pattern) => {
            let re = Regex::new(pattern)
                .with_context(|| format!("bad oracle pattern `{}`", pattern))?;
            if re.is_match(stderr) {
                Ok(None)
            } else {
                Ok(Some(OracleFailure::PatternMismatch {
                    stderr: stderr.to_string(),
                }))
            }
        }
    }
}

/// Run the whole table against one assembler, printing each failure as
/// it happens. Returns the number of failed entries; the run never stops
/// early and never sets the process exit status.
pub fn run(assembler: &Path) -> Result<usize> {
    let mut failures = 0;
    for &(inst, expect) in TABLE {
        let Invocation { status, stderr } = run_assembler(assembler, None, inst)?;
        let stderr = String::from_utf8_lossy(&stderr);
        if let Some(failure) = check(expect, status.success(), &stderr)? {
            failures += 1;
            report(inst, &failure);
        }
    }
    Ok(failures)
}

fn report(inst: &str, failure: &OracleFailure) {
    let red = ansi_term::Colour::Red.bold();
    match failure {
        OracleFailure::UnexpectedError { stderr } => {
            println!(
                "{}",
                red.paint(format!(
                    "test `{}` failed: unexpected error when none was expected",
                    inst
                ))
            );
            println!("{}", stderr);
        }
        OracleFailure::UnexpectedSuccess => {
            println!(
                "{}",
                red.paint(format!(
                    "test `{}` failed: expected an error but exit code is zero",
                    inst
                ))
            );
        }
        OracleFailure::PatternMismatch { stderr } => {
            println!("{}", red.paint(format!("output mismatch in test `{}`", inst)));
            println!("{}", stderr);
        }
    }
}
