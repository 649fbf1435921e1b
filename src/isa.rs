//! VFPU register naming and instruction-set tables.
//!
//! The VFPU register file is 8 matrices of 4x4 single-precision cells.
//! An operand names a block of cells: a single cell (`S`), a column or
//! row slice (`C`/`R`), or a whole matrix in column- or row-major order
//! (`M`/`E`). The three digits in a register name are matrix, column and
//! row; the optional `.s/.p/.t/.q` suffix repeats the operand width.

use std::fmt;

/// Operand size class, determining the register-encoding layout and the
/// mnemonic suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Single,
    Pair,
    Triple,
    Quad,
}

impl Width {
    pub const ALL: [Width; 4] = [Width::Single, Width::Pair, Width::Triple, Width::Quad];

    /// Widths that have column/row slice registers (everything but single).
    pub const VECTOR: [Width; 3] = [Width::Pair, Width::Triple, Width::Quad];

    pub fn lanes(self) -> usize {
        match self {
            Width::Single => 1,
            Width::Pair => 2,
            Width::Triple => 3,
            Width::Quad => 4,
        }
    }

    pub fn suffix(self) -> char {
        match self {
            Width::Single => 's',
            Width::Pair => 'p',
            Width::Triple => 't',
            Width::Quad => 'q',
        }
    }

    /// Column/row start indices that keep a block of this width inside
    /// the 4-cell range. A pair may start at 0 or 2, a triple at 0 or 1,
    /// a quad only at 0.
    pub fn block_starts(self) -> &'static [u32] {
        match self {
            Width::Single => &[0, 1, 2, 3],
            Width::Pair => &[0, 2],
            Width::Triple => &[0, 1],
            Width::Quad => &[0],
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Names of the VFPU constant registers accepted by `vcst`.
pub const CONSTANTS: [&str; 19] = [
    "VFPU_HUGE",
    "VFPU_SQRT2",
    "VFPU_SQRT1_2",
    "VFPU_2_SQRTPI",
    "VFPU_2_PI",
    "VFPU_1_PI",
    "VFPU_PI_4",
    "VFPU_PI_2",
    "VFPU_PI",
    "VFPU_E",
    "VFPU_LOG2E",
    "VFPU_LOG10E",
    "VFPU_LN2",
    "VFPU_LN10",
    "VFPU_2PI",
    "VFPU_PI_6",
    "VFPU_LOG10TWO",
    "VFPU_LOG2TEN",
    "VFPU_SQRT3_2",
];

/// `vcmp` condition codes taking two register operands.
pub const CMP_TWO_OPERAND: [&str; 8] = ["FL", "EQ", "NE", "GT", "fl", "eq", "ne", "gt"];
/// `vcmp` condition codes taking one register operand.
pub const CMP_ONE_OPERAND: [&str; 4] = ["NN", "NZ", "nn", "nz"];
/// `vcmp` condition codes taking no operand.
pub const CMP_ZERO_OPERAND: [&str; 4] = ["FL", "TR", "fl", "tr"];

/// Vector register names (`S`, or `C`/`R` slices) for a width, suffixed,
/// in the order the bulk sweeps enumerate them. Single-cell names only
/// span matrices 0-3 so the name stays within the `0123` digit sweep.
pub fn vector_regs(width: Width) -> Vec<String> {
    let mut out = Vec::new();
    if width == Width::Single {
        for mtx in 0..4 {
            for col in 0..4 {
                for row in 0..4 {
                    out.push(format!("S{}{}{}.s", mtx, col, row));
                }
            }
        }
        return out;
    }
    for mtx in 0..8 {
        for &col in width.block_starts() {
            for &row in width.block_starts() {
                for kind in ['R', 'C'] {
                    out.push(format!("{}{}{}{}.{}", kind, mtx, col, row, width.suffix()));
                }
            }
        }
    }
    out
}

/// Matrix register names (`M` column-major, `E` row-major) for a width.
pub fn matrix_regs(width: Width) -> Vec<String> {
    let mut out = Vec::new();
    for mtx in 0..8 {
        for &col in width.block_starts() {
            for &row in width.block_starts() {
                for kind in ['M', 'E'] {
                    out.push(format!("{}{}{}{}.{}", kind, mtx, col, row, width.suffix()));
                }
            }
        }
    }
    out
}

/// Ordered pairs of matrix registers with distinct underlying matrices,
/// for instructions whose destination must not alias a source.
pub fn matrix_reg_pairs(width: Width) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let suffix = width.suffix();
    for mtx1 in 0..7 {
        for &col1 in width.block_starts() {
            for &row1 in width.block_starts() {
                for kind1 in ['M', 'E'] {
                    for mtx2 in 0..8 {
                        if mtx1 == mtx2 {
                            continue;
                        }
                        for &col2 in width.block_starts() {
                            for &row2 in width.block_starts() {
                                for kind2 in ['M', 'E'] {
                                    out.push((
                                        format!("{}{}{}{}.{}", kind1, mtx1, col1, row1, suffix),
                                        format!("{}{}{}{}.{}", kind2, mtx2, col2, row2, suffix),
                                    ));
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    out
}

/// Whether two register names share the same underlying matrix. The
/// matrix index is the digit right after the kind letter; overlap at any
/// column/row offset within one matrix is a conflict for the multiply
/// family, so only the matrix digit matters here.
pub fn same_matrix(a: &str, b: &str) -> bool {
    a.as_bytes().get(1) == b.as_bytes().get(1)
}

/// General-purpose register names usable in interlock transfers.
pub fn gpr_names() -> Vec<String> {
    (0..28).map(|i| format!("${}", i)).collect()
}

/// Control/condition register names (`$128`-`$142`).
pub fn control_reg_names() -> Vec<String> {
    (128..143).map(|i| format!("${}", i)).collect()
}
