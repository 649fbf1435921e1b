//! Differential conformance harness for VFPU assemblers.
//!
//! Two `as` executables (a trusted reference and a candidate under
//! test) are driven over the same generated instruction corpus; their
//! exit codes must agree, and when both accept an input the `.text`
//! sections of their objects must be byte-identical. A separate oracle
//! checks that a single assembler raises the documented diagnostics on
//! invalid inputs.

pub mod corpus;
pub mod exec;
pub mod isa;
pub mod logging;
pub mod oracle;
pub mod pool;
pub mod rotation;

pub use corpus::TestCase;
pub use exec::{Toolchain, Verdict};
