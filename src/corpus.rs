//! Test corpus generation.
//!
//! Every sweep here is a pure, deterministic enumeration: calling a
//! generator twice yields the same cases in the same order. Exclusion
//! rules (erratum denylist, meaningless prefix combinations, aliasing
//! operands) are applied while enumerating, never by filtering an
//! already-built list.
//!
//! The corpus is split in two. The *isolated* corpus is run one process
//! pair per case so a failure names the exact instruction; it covers
//! register naming, rotation immediates and register collisions. The
//! *bulk* corpus covers the much larger opcode/prefix/immediate space in
//! a single assembly unit per side, trading failure attribution for
//! throughput.

use std::fmt;

use crate::isa::{self, Width};
use crate::rotation;

/// One differential test case.
///
/// Most cases are a single source line fed verbatim to both assemblers.
/// Where the two grammars accept different surface syntax for the same
/// encoding (the prefix instructions), a case carries one text per side;
/// both sides must still emit identical machine code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestCase {
    Uniform(String),
    Divergent { reference: String, undertest: String },
}

impl TestCase {
    pub fn uniform(text: impl Into<String>) -> Self {
        TestCase::Uniform(text.into())
    }

    pub fn divergent(reference: impl Into<String>, undertest: impl Into<String>) -> Self {
        TestCase::Divergent {
            reference: reference.into(),
            undertest: undertest.into(),
        }
    }

    pub fn reference_text(&self) -> &str {
        match self {
            TestCase::Uniform(text) => text,
            TestCase::Divergent { reference, .. } => reference,
        }
    }

    pub fn undertest_text(&self) -> &str {
        match self {
            TestCase::Uniform(text) => text,
            TestCase::Divergent { undertest, .. } => undertest,
        }
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestCase::Uniform(text) => write!(f, "{}", text),
            TestCase::Divergent {
                reference,
                undertest,
            } => write!(f, "{} / {}", reference, undertest),
        }
    }
}

/// Cartesian product of `items` over `n` positions, last position
/// varying fastest.
fn product<'a>(items: &[&'a str], n: usize) -> Vec<Vec<&'a str>> {
    let mut out = vec![Vec::new()];
    for _ in 0..n {
        let mut next = Vec::with_capacity(out.len() * items.len());
        for prefix in &out {
            for &item in items {
                let mut combo = prefix.clone();
                combo.push(item);
                next.push(combo);
            }
        }
        out = next;
    }
    out
}

// ---------------------------------------------------------------------
// Isolated corpus
// ---------------------------------------------------------------------

/// Rotation-immediate sweep: the full lane-pattern space for `vrot.q`
/// and `vrot.t`, minus the arguments the reference toolchain is known to
/// mis-encode (see [`rotation::REFERENCE_ERRATA`]).
pub fn rotation_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    let tokens = ["0", "s", "c", "-s"];
    for com in product(&tokens, 4) {
        let arg = com.join(",");
        if rotation::REFERENCE_ERRATA.contains(&arg.as_str()) {
            continue;
        }
        out.push(TestCase::uniform(format!(
            "vrot.q R000.q, S100.s, [{}]",
            arg
        )));
    }
    for com in product(&tokens, 3) {
        out.push(TestCase::uniform(format!(
            "vrot.t R000.t, S100.s, [{}]",
            com.join(",")
        )));
    }
    out
}

/// Exhaustive register-naming sweep: every matrix/column/row digit in
/// every namespace and operand position, to prove the name-to-encoding
/// mapping agrees on both sides.
pub fn register_naming_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    for mtx in 0..8 {
        for col in 0..4 {
            for row in 0..4 {
                out.push(TestCase::uniform(format!(
                    "vadd.s S{}{}{}.s, S000.s, S000.s",
                    mtx, col, row
                )));
            }
        }
    }
    for width in Width::VECTOR {
        let w = width.suffix();
        for mtx in 0..8 {
            for col in 0..4 {
                for row in 0..4 {
                    for kind in ['C', 'R'] {
                        out.push(TestCase::uniform(format!(
                            "vadd.{} {k}{}{}{}.{}, {k}000.{}, {k}000.{}",
                            w,
                            mtx,
                            col,
                            row,
                            w,
                            w,
                            w,
                            k = kind
                        )));
                    }
                }
            }
        }
    }
    for width in Width::VECTOR {
        let w = width.suffix();
        for mtx in 0..8 {
            for col in 0..4 {
                for row in 0..4 {
                    for kind in ['M', 'E'] {
                        out.push(TestCase::uniform(format!(
                            "vmmov.{} {k}{}{}{}.{}, {k}100.{}",
                            w,
                            mtx,
                            col,
                            row,
                            w,
                            w,
                            k = kind
                        )));
                        // vmmul transposes its first source operand, so
                        // sweep the name through both source positions
                        out.push(TestCase::uniform(format!(
                            "vmmul.{} {k}200.{}, {k}{}{}{}.{}, {k}100.{}",
                            w,
                            w,
                            mtx,
                            col,
                            row,
                            w,
                            w,
                            k = kind
                        )));
                        out.push(TestCase::uniform(format!(
                            "vmmul.{} {k}200.{}, {k}100.{}, {k}{}{}{}.{}",
                            w,
                            w,
                            w,
                            mtx,
                            col,
                            row,
                            w,
                            k = kind
                        )));
                    }
                }
            }
        }
    }
    out
}

/// Register-collision sweep: `vmmul` operand pairs over the full slice
/// namespace, with the varying register in either source position. The
/// harness only checks that both assemblers agree on accept/reject, not
/// which answer is right.
pub fn register_collision_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    for width in Width::VECTOR {
        let w = width.suffix();
        for mtx1 in 0..8 {
            for col1 in 0..4 {
                for row1 in 0..4 {
                    for kind1 in ['C', 'R'] {
                        for mtx2 in 0..8 {
                            for col2 in 0..4 {
                                for row2 in 0..4 {
                                    for kind2 in ['C', 'R'] {
                                        let rd =
                                            format!("{}{}{}{}.{}", kind1, mtx1, col1, row1, w);
                                        let rs =
                                            format!("{}{}{}{}.{}", kind2, mtx2, col2, row2, w);
                                        out.push(TestCase::uniform(format!(
                                            "vmmul.{} {}, {}, C000.{}",
                                            w, rd, rs, w
                                        )));
                                        out.push(TestCase::uniform(format!(
                                            "vmmul.{} {}, C000.{}, {}",
                                            w, rd, w, rs
                                        )));
                                    }
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

/// All cases that run one process pair per case.
pub fn isolated_corpus() -> Vec<TestCase> {
    let mut out = rotation_sweep();
    out.extend(register_naming_sweep());
    out.extend(register_collision_sweep());
    out
}

// ---------------------------------------------------------------------
// Bulk corpus
// ---------------------------------------------------------------------

/// Directives prepended to each bulk assembly unit: disable strict
/// register-usage diagnostics and instruction reordering, since the
/// concatenated cases share no intended register state.
pub const BULK_PREAMBLE: &str = ".set noat\n.set noreorder\n";

/// Branch instructions over condition-code bit, true/false sense and the
/// likely suffix.
pub fn branch_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    for i in 0..6 {
        for cond in ["f", "t"] {
            for lik in ["l", " "] {
                out.push(TestCase::uniform(format!("bv{}{} {}, 1f\n1:", cond, lik, i)));
            }
        }
    }
    out
}

/// Load/store over widths, register kinds, the signed offset range and
/// the writeback suffixes (quad only).
pub fn load_store_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    for mtx in 0..8 {
        for (op, wb) in [("l", ""), ("s", ""), ("s", ", wb"), ("s", ", wt")] {
            for (width, kind) in [
                (Width::Single, 'S'),
                (Width::Quad, 'R'),
                (Width::Quad, 'C'),
            ] {
                let wbm = if width == Width::Quad { wb } else { "" };
                for offset in (0..4096u32).step_by(4) {
                    out.push(TestCase::uniform(format!(
                        "{}v.{} {}{}00, {}($4) {}",
                        op,
                        width.suffix(),
                        kind,
                        mtx,
                        offset,
                        wbm
                    )));
                    out.push(TestCase::uniform(format!(
                        "{}v.{} {}{}00, -{}($4) {}",
                        op,
                        width.suffix(),
                        kind,
                        mtx,
                        offset,
                        wbm
                    )));
                }
            }
        }
    }
    out
}

/// Source swizzle/prefix sweep: lane selector x negate x absolute-value
/// bar per lane. An absent selector cannot carry a bar or a negate sign,
/// so those combinations are skipped during enumeration. The 4-lane
/// `vpfxs`/`vpfxt` forms are emitted in both the compact and the
/// bracketed grammar.
pub fn source_prefix_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    let lanes = ["x", "y", "z", "w"];
    for (width, kind) in [
        (Width::Quad, 'R'),
        (Width::Triple, 'R'),
        (Width::Pair, 'R'),
        (Width::Single, 'S'),
    ] {
        let n = width.lanes();
        let w = width.suffix();
        let mut choices: Vec<&str> = lanes[..n].to_vec();
        choices.push("");
        for chs in product(&choices, n) {
            for ab in product(&["|", " "], n) {
                if (0..n).any(|i| chs[i].is_empty() && ab[i] == "|") {
                    continue;
                }
                for neg in product(&["-", " "], n) {
                    if (0..n).any(|i| chs[i].is_empty() && neg[i] == "-") {
                        continue;
                    }
                    for pfx in ["s", "t"] {
                        let exp = (0..n)
                            .map(|i| format!("{}{}{}{}", neg[i], ab[i], chs[i], ab[i]))
                            .collect::<Vec<_>>()
                            .join(",");
                        if n == 4 {
                            out.push(TestCase::divergent(
                                format!("vpfx{} {}", pfx, exp),
                                format!("vpfx{} [{}]", pfx, exp),
                            ));
                        }
                        out.push(TestCase::uniform(format!(
                            "vadd.{} {k}000, {k}100, {k}200[{}]",
                            w,
                            exp,
                            k = kind
                        )));
                        out.push(TestCase::uniform(format!(
                            "vadd.{} {k}000, {k}100[{}], {k}200",
                            w,
                            exp,
                            k = kind
                        )));
                    }
                }
            }
        }
    }
    out
}

/// Prefix constants: every lane takes a selector, a constant or nothing,
/// in both grammars.
pub fn constant_prefix_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    let tokens = [
        "x", "y", "z", "w", "", "0", "1", "2", "1/2", "3", "1/3", "1/4", "1/6",
    ];
    for com in product(&tokens, 4) {
        for pfx in ["s", "t"] {
            out.push(TestCase::divergent(
                format!("vpfx{} {}, {}, {}, {}", pfx, com[0], com[1], com[2], com[3]),
                format!(
                    "vpfx{} [{}, {}, {}, {}]",
                    pfx, com[0], com[1], com[2], com[3]
                ),
            ));
        }
    }
    out
}

/// Destination mask/range prefixes: the standalone `vpfxd` forms in both
/// grammars, plus inline destination prefixes on `vadd` for every width.
pub fn dest_prefix_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    let tokens = ["", "m", "-1:1", "[-1:1]", "0:1", "[0:1]"];
    for com in product(&tokens, 4) {
        out.push(TestCase::divergent(
            format!("vpfxd {},{},{},{}", com[0], com[1], com[2], com[3]),
            format!("vpfxd [{},{},{},{}]", com[0], com[1], com[2], com[3]),
        ));
    }
    let masks = ["", "m", "-1:1", "0:1"];
    for com in product(&masks, 4) {
        out.push(TestCase::uniform(format!(
            "vadd.q R000[{},{},{},{}], R000, R200",
            com[0], com[1], com[2], com[3]
        )));
    }
    for (width, kind) in [
        (Width::Quad, 'R'),
        (Width::Triple, 'R'),
        (Width::Pair, 'R'),
        (Width::Single, 'S'),
    ] {
        let w = width.suffix();
        for com in product(&masks, width.lanes()) {
            out.push(TestCase::uniform(format!(
                "vadd.{} {k}000[{}], {k}100, {k}200",
                w,
                com.join(","),
                k = kind
            )));
        }
    }
    out
}

/// `vrot` over every destination register and the 32 selector-derived
/// lane patterns. The pair encoding is ambiguous in the reference
/// grammar, so only triple and quad are swept.
pub fn rotation_register_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    for (lanes, width) in [(3, Width::Triple), (4, Width::Quad)] {
        for perm in rotation::sweep_patterns() {
            for regd in isa::vector_regs(width) {
                out.push(TestCase::uniform(format!(
                    "vrot.{} {}, S733.s, [{}]",
                    width.suffix(),
                    regd,
                    perm[..lanes].join(",")
                )));
            }
        }
    }
    out
}

/// Three-operand opcode families: arithmetic, scaled arithmetic,
/// quaternion and matrix multiplies, transforms, conditional moves and
/// int/float conversions with a scale operand.
pub fn ternary_op_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    for op in [
        "add", "sub", "div", "mul", "min", "max", "sge", "slt", "scmp",
    ] {
        for width in Width::ALL {
            for reg in isa::vector_regs(width) {
                out.push(TestCase::uniform(format!(
                    "v{}.{} {reg}, {reg}, {reg}",
                    op,
                    width.suffix()
                )));
            }
        }
    }

    for regd in isa::vector_regs(Width::Single) {
        for regs in isa::vector_regs(Width::Single) {
            out.push(TestCase::uniform(format!("vsbn.s {}, {}, {}", regd, regs, regs)));
        }
        for regs in isa::vector_regs(Width::Single) {
            for imm in (0..256).step_by(17) {
                out.push(TestCase::uniform(format!("vwbn.s {}, {}, {}", regd, regs, imm)));
                out.push(TestCase::uniform(format!(
                    "vwbn.s {}, {}, {:#x}",
                    regd, regs, imm
                )));
            }
        }
    }

    // quaternion multiply rejects a destination aliasing either source
    for regd in isa::vector_regs(Width::Quad) {
        for regs in isa::vector_regs(Width::Quad) {
            if isa::same_matrix(&regd, &regs) {
                continue;
            }
            out.push(TestCase::uniform(format!("vqmul.q {}, {regs}, {regs}", regd)));
        }
    }

    for op in ["dot", "hdp"] {
        for width in Width::VECTOR {
            for regs in isa::vector_regs(width) {
                for regd in isa::vector_regs(Width::Single) {
                    out.push(TestCase::uniform(format!(
                        "v{}.{} {}, {regs}, {regs}",
                        op,
                        width.suffix(),
                        regd
                    )));
                }
            }
        }
    }

    for op in ["crs", "crsp"] {
        for reg in isa::vector_regs(Width::Triple) {
            out.push(TestCase::uniform(format!("v{}.t {reg}, {reg}, {reg}", op)));
        }
    }

    for width in Width::VECTOR {
        let w = width.suffix();
        for (regd, regs) in isa::matrix_reg_pairs(width) {
            out.push(TestCase::uniform(format!("vmmul.{} {}, {regs}, {regs}", w, regd)));
        }
        for (regd, regs) in isa::matrix_reg_pairs(width) {
            for regt in ["S700.s", "S712.s", "S732.s", "S720.s", "S733.s"] {
                out.push(TestCase::uniform(format!(
                    "vmscl.{} {}, {}, {}",
                    w, regd, regs, regt
                )));
            }
        }
        for regd in isa::vector_regs(width) {
            for regt in isa::vector_regs(Width::Single) {
                out.push(TestCase::uniform(format!(
                    "vscl.{} {regd}, {regd}, {}",
                    w, regt
                )));
            }
        }
    }

    // transforms reject a destination aliasing either the matrix or the
    // vector source, so both operands enumerate away from it
    for (lanes, width) in [(4, Width::Quad), (3, Width::Triple), (2, Width::Pair)] {
        let w = width.suffix();
        for regd in isa::vector_regs(width) {
            for regt in isa::vector_regs(width) {
                if isa::same_matrix(&regd, &regt) {
                    continue;
                }
                for regs in isa::matrix_regs(width) {
                    if isa::same_matrix(&regd, &regs) {
                        continue;
                    }
                    out.push(TestCase::uniform(format!(
                        "vtfm{}.{} {}, {}, {}",
                        lanes, w, regd, regs, regt
                    )));
                    out.push(TestCase::uniform(format!(
                        "vhtfm{}.{} {}, {}, {}",
                        lanes, w, regd, regs, regt
                    )));
                }
            }
        }
    }

    for width in Width::ALL {
        let w = width.suffix();
        for regd in isa::vector_regs(width) {
            for op in ["cmov", "cmovt", "cmovf"] {
                for code in 0..7 {
                    out.push(TestCase::uniform(format!(
                        "v{}.{} {regd}, {regd}, {}",
                        op, w, code
                    )));
                }
            }
        }
        for regd in isa::vector_regs(width) {
            for op in ["f2in", "f2iz", "f2iu", "f2id", "i2f"] {
                for code in 0..32 {
                    out.push(TestCase::uniform(format!(
                        "v{}.{} {regd}, {regd}, {}",
                        op, w, code
                    )));
                }
            }
        }
    }

    out
}

/// Two-operand opcode families, including the width-changing
/// conversions, colour packing and the reduction ops.
pub fn binary_op_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    for op in [
        "mov", "abs", "neg", "sgn", "rcp", "rsq", "sin", "cos", "exp2", "log2", "sqrt", "asin",
        "nrcp", "nsin", "rexp2", "ocp", "sat0", "sat1",
    ] {
        for width in Width::ALL {
            for reg in isa::vector_regs(width) {
                out.push(TestCase::uniform(format!(
                    "v{}.{} {reg}, {reg}",
                    op,
                    width.suffix()
                )));
            }
        }
    }

    for op in ["bfy1"] {
        for width in [Width::Pair, Width::Quad] {
            for reg in isa::vector_regs(width) {
                out.push(TestCase::uniform(format!(
                    "v{}.{} {reg}, {reg}",
                    op,
                    width.suffix()
                )));
            }
        }
    }

    // conversions halving/doubling the width take the destination in the
    // narrow width and the source in the wide one (or the reverse)
    for (dwidth, swidth) in [(Width::Pair, Width::Quad), (Width::Single, Width::Pair)] {
        for regd in isa::vector_regs(dwidth) {
            for regs in isa::vector_regs(swidth) {
                for op in ["i2us", "i2s", "f2h"] {
                    out.push(TestCase::uniform(format!(
                        "v{}.{} {}, {}",
                        op,
                        swidth.suffix(),
                        regd,
                        regs
                    )));
                }
                for op in ["us2i", "s2i", "socp", "h2f"] {
                    out.push(TestCase::uniform(format!(
                        "v{}.{} {}, {}",
                        op,
                        dwidth.suffix(),
                        regs,
                        regd
                    )));
                }
            }
        }
    }

    for regd in isa::vector_regs(Width::Single) {
        for regs in isa::vector_regs(Width::Pair) {
            out.push(TestCase::uniform(format!("vdet.p {}, {regs}, {regs}", regd)));
        }
    }

    for op in ["i2uc", "i2c"] {
        for regd in isa::vector_regs(Width::Single) {
            for regs in isa::vector_regs(Width::Quad) {
                out.push(TestCase::uniform(format!("v{}.q {}, {}", op, regd, regs)));
            }
        }
    }

    for op in ["t4444", "t5551", "t5650"] {
        for regd in isa::vector_regs(Width::Pair) {
            for regs in isa::vector_regs(Width::Quad) {
                out.push(TestCase::uniform(format!("v{}.q {}, {}", op, regd, regs)));
            }
        }
    }

    for op in ["srt1", "srt2", "srt3", "srt4", "bfy2"] {
        for reg in isa::vector_regs(Width::Quad) {
            out.push(TestCase::uniform(format!("v{}.q {reg}, {reg}", op)));
        }
    }

    for op in ["avg", "fad"] {
        for width in Width::VECTOR {
            for regs in isa::vector_regs(width) {
                for regd in isa::vector_regs(Width::Single) {
                    out.push(TestCase::uniform(format!(
                        "v{}.{} {}, {}",
                        op,
                        width.suffix(),
                        regd,
                        regs
                    )));
                }
            }
        }
    }

    for op in ["sbz", "lgb"] {
        for reg in isa::vector_regs(Width::Single) {
            out.push(TestCase::uniform(format!("v{}.s {reg}, {reg}", op)));
        }
    }

    for width in Width::VECTOR {
        for (regd, regs) in isa::matrix_reg_pairs(width) {
            out.push(TestCase::uniform(format!(
                "vmmov.{} {}, {}",
                width.suffix(),
                regd,
                regs
            )));
        }
    }

    out
}

/// Destination-only opcodes: fills, identity and their matrix forms.
pub fn unary_op_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    for op in ["zero", "one", "rndi", "rndf1", "rndf2"] {
        for width in Width::ALL {
            for reg in isa::vector_regs(width) {
                out.push(TestCase::uniform(format!(
                    "v{}.{} {}",
                    op,
                    width.suffix(),
                    reg
                )));
            }
        }
    }
    for width in [Width::Pair, Width::Quad] {
        for reg in isa::vector_regs(width) {
            out.push(TestCase::uniform(format!("vidt.{} {}", width.suffix(), reg)));
        }
    }
    for op in ["zero", "one", "idt"] {
        for width in Width::VECTOR {
            for reg in isa::matrix_regs(width) {
                out.push(TestCase::uniform(format!(
                    "vm{}.{} {}",
                    op,
                    width.suffix(),
                    reg
                )));
            }
        }
    }
    out
}

/// Constant loads and the compare instruction, whose condition codes
/// take two, one or zero register operands.
pub fn special_op_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    for width in Width::ALL {
        for reg in isa::vector_regs(width) {
            for constant in isa::CONSTANTS {
                out.push(TestCase::uniform(format!(
                    "vcst.{} {}, {}",
                    width.suffix(),
                    reg,
                    constant
                )));
            }
        }
    }
    for width in Width::ALL {
        let w = width.suffix();
        for reg in isa::vector_regs(width) {
            for cc in isa::CMP_TWO_OPERAND {
                out.push(TestCase::uniform(format!("vcmp.{} {}, {reg}, {reg}", w, cc)));
            }
            for cc in isa::CMP_ONE_OPERAND {
                out.push(TestCase::uniform(format!("vcmp.{} {}, {}", w, cc, reg)));
            }
            for cc in isa::CMP_ZERO_OPERAND {
                out.push(TestCase::uniform(format!("vcmp.{} {}", w, cc)));
            }
        }
    }
    out
}

/// Half-precision float immediate spellings: signed specials plus an
/// exponent/mantissa amplitude grid.
fn half_float_immediates() -> Vec<String> {
    let mut out = Vec::new();
    for sign in ["-", "+", " "] {
        for special in ["NaN", "Inf", "inf", "0"] {
            out.push(format!("{}{}", sign, special));
        }
    }
    for i in 0..12 {
        for j in 0..8u64 {
            out.push(format!("{:.6}", ((1u64 << i) * (j + 1)) as f64));
        }
    }
    for i in 0..8 {
        for j in (0..256u64).step_by(13) {
            out.push(format!("{:.6}", ((1u64 << i) * (j + 1)) as f64 * 0.015625));
        }
    }
    out
}

/// Immediate-load sweep: integer immediates across the 16-bit range in
/// decimal, and half-float immediates in their textual spellings.
pub fn immediate_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    for regd in isa::vector_regs(Width::Single) {
        for imm in half_float_immediates() {
            out.push(TestCase::uniform(format!("vfim.s {}, {}", regd, imm)));
        }
        for imm in (0..1 << 16).step_by(13 * 17) {
            out.push(TestCase::uniform(format!("viim.s {}, {}", regd, imm)));
        }
    }
    out
}

/// Interlock transfers between the CPU, the VFPU control registers and
/// the vector register file, plus the sync/flush barriers.
pub fn interlock_sweep() -> Vec<TestCase> {
    let mut out = Vec::new();
    for cpu in isa::gpr_names() {
        for cc in isa::control_reg_names() {
            out.push(TestCase::uniform(format!("mtvc {}, {}", cpu, cc)));
            out.push(TestCase::uniform(format!("mfvc {}, {}", cpu, cc)));
        }
        for vreg in isa::vector_regs(Width::Single) {
            out.push(TestCase::uniform(format!("mtv {}, {}", cpu, vreg)));
            out.push(TestCase::uniform(format!("mfv {}, {}", cpu, vreg)));
        }
    }
    for cc in isa::control_reg_names() {
        for vreg in isa::vector_regs(Width::Single) {
            out.push(TestCase::uniform(format!("vmtvc {}, {}", cc, vreg)));
            out.push(TestCase::uniform(format!("vmfvc {}, {}", vreg, cc)));
        }
    }
    for i in (0..1000).step_by(13) {
        out.push(TestCase::uniform(format!("vsync {}", i)));
    }
    out.push(TestCase::uniform("vflush"));
    out.push(TestCase::uniform("vsync"));
    out
}

/// All cases assembled as one unit per side.
pub fn bulk_corpus() -> Vec<TestCase> {
    let mut out = branch_sweep();
    out.extend(load_store_sweep());
    out.extend(source_prefix_sweep());
    out.extend(constant_prefix_sweep());
    out.extend(dest_prefix_sweep());
    out.extend(rotation_register_sweep());
    out.extend(ternary_op_sweep());
    out.extend(binary_op_sweep());
    out.extend(unary_op_sweep());
    out.extend(special_op_sweep());
    out.extend(immediate_sweep());
    out.extend(interlock_sweep());
    out
}

/// Concatenate a corpus into one newline-terminated assembly unit per
/// side, picking the per-side text of divergent cases. Case order is
/// preserved; it determines the emitted code offsets.
pub fn bulk_sources(cases: &[TestCase]) -> (String, String) {
    let mut reference = String::from(BULK_PREAMBLE);
    let mut undertest = String::from(BULK_PREAMBLE);
    for case in cases {
        reference.push_str(case.reference_text());
        reference.push('\n');
        undertest.push_str(case.undertest_text());
        undertest.push('\n');
    }
    (reference, undertest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_sweep_excludes_errata() {
        let cases = rotation_sweep();
        assert_eq!(cases.len(), 256 - 12 + 64);
        for case in &cases {
            let text = case.undertest_text();
            if let Some(arg) = text.strip_prefix("vrot.q R000.q, S100.s, [") {
                let arg = arg.trim_end_matches(']');
                assert!(
                    !rotation::REFERENCE_ERRATA.contains(&arg),
                    "erratum pattern `{}` emitted",
                    arg
                );
            }
        }
    }

    #[test]
    fn test_register_naming_sweep_count() {
        // 8*4*4 single names, plus C/R names for three widths, plus
        // M/E names through three instructions for three widths
        let expected = 128 + 3 * 128 * 2 + 3 * 128 * 2 * 3;
        assert_eq!(register_naming_sweep().len(), expected);
    }

    #[test]
    fn test_collision_sweep_count() {
        let names = 8 * 4 * 4 * 2;
        assert_eq!(register_collision_sweep().len(), 3 * names * names * 2);
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(isolated_corpus(), isolated_corpus());
        assert_eq!(branch_sweep(), branch_sweep());
        assert_eq!(source_prefix_sweep(), source_prefix_sweep());
    }

    #[test]
    fn test_branch_sweep() {
        let cases = branch_sweep();
        assert_eq!(cases.len(), 6 * 2 * 2);
        assert_eq!(cases[0].undertest_text(), "bvfl 0, 1f\n1:");
    }

    #[test]
    fn test_load_store_sweep_count() {
        // 8 matrices x 4 op/writeback combos x 3 register kinds x 1024
        // offsets x 2 signs
        assert_eq!(load_store_sweep().len(), 8 * 4 * 3 * 1024 * 2);
    }

    #[test]
    fn test_prefix_sweep_skips_meaningless_lanes() {
        // a lane with no selector must carry neither a bar nor a sign
        for case in source_prefix_sweep() {
            let text = case.undertest_text();
            let Some(open) = text.find('[') else { continue };
            let close = text[open..].find(']').unwrap() + open;
            let exp = &text[open + 1..close];
            for lane in exp.split(',') {
                if lane.contains('|') || lane.contains('-') {
                    assert!(
                        lane.contains(['x', 'y', 'z', 'w']),
                        "modifier without selector in `{}`",
                        text
                    );
                }
            }
        }
    }

    #[test]
    fn test_prefix_dual_syntax_differs_only_in_brackets() {
        for case in constant_prefix_sweep() {
            let TestCase::Divergent {
                reference,
                undertest,
            } = &case
            else {
                panic!("constant prefix cases must be divergent");
            };
            let (mnemonic, operands) = reference.split_once(' ').unwrap();
            assert_eq!(*undertest, format!("{} [{}]", mnemonic, operands));
        }
    }

    #[test]
    fn test_qmul_never_aliases_destination() {
        for case in ternary_op_sweep() {
            let text = case.undertest_text();
            if let Some(rest) = text.strip_prefix("vqmul.q ") {
                let mut ops = rest.split(", ");
                let regd = ops.next().unwrap();
                let regs = ops.next().unwrap();
                assert!(!isa::same_matrix(regd, regs), "aliasing case `{}`", text);
            }
        }
    }

    #[test]
    fn test_transform_never_aliases_destination() {
        let mut transforms = 0;
        let mut distinct_vector_source = 0;
        for case in ternary_op_sweep() {
            let text = case.undertest_text();
            if text.starts_with("vtfm") || text.starts_with("vhtfm") {
                transforms += 1;
                let rest = text.split_once(' ').unwrap().1;
                let mut ops = rest.split(", ");
                let regd = ops.next().unwrap();
                let regs = ops.next().unwrap();
                let regt = ops.next().unwrap();
                assert!(!isa::same_matrix(regd, regs), "aliasing case `{}`", text);
                assert!(!isa::same_matrix(regd, regt), "aliasing case `{}`", text);
                if regt != regd {
                    distinct_vector_source += 1;
                }
            }
        }
        // the vector source enumerates independently of the destination;
        // under the exclusions that makes every emitted pair distinct
        assert!(transforms > 0);
        assert_eq!(distinct_vector_source, transforms);
    }

    #[test]
    fn test_immediate_sweep_spellings() {
        let cases = immediate_sweep();
        let texts: Vec<&str> = cases.iter().map(|c| c.undertest_text()).collect();
        assert!(texts.contains(&"vfim.s S000.s, -NaN"));
        assert!(texts.contains(&"vfim.s S000.s, +Inf"));
        assert!(texts.contains(&"vfim.s S000.s, 1.000000"));
        assert!(texts.contains(&"viim.s S000.s, 0"));
        // stride 221 over the 16-bit range
        assert!(texts.contains(&"viim.s S000.s, 65416"));
    }

    #[test]
    fn test_bulk_sources_split_divergent_sides() {
        let cases = vec![
            TestCase::uniform("vflush"),
            TestCase::divergent("vpfxs x", "vpfxs [x]"),
        ];
        let (reference, undertest) = bulk_sources(&cases);
        assert_eq!(reference, ".set noat\n.set noreorder\nvflush\nvpfxs x\n");
        assert_eq!(undertest, ".set noat\n.set noreorder\nvflush\nvpfxs [x]\n");
    }

    #[test]
    fn test_product_order() {
        let combos = product(&["a", "b"], 2);
        assert_eq!(
            combos,
            [["a", "a"], ["a", "b"], ["b", "a"], ["b", "b"]]
        );
    }
}
