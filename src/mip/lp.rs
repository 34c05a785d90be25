//! LP-format model export.
//!
//! Writes the full variable/constraint set as a textual LP document for
//! audit and debugging. Output is byte-reproducible for a fixed
//! instance: variables appear in creation order, rows in emission order,
//! and numbers print through one shared formatter.

use std::fmt::Write as _;

use super::constraints::{LinearRow, RowSense};
use super::variables::{VarDomain, VariableIndex};

/// Terms printed per line before wrapping.
const TERMS_PER_LINE: usize = 8;

/// Names printed per line in the Binaries/Generals sections.
const NAMES_PER_LINE: usize = 8;

/// Renders the model as an LP-format document.
pub fn write_lp(name: &str, index: &VariableIndex, rows: &[LinearRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\\ Problem: {name}");

    out.push_str("Maximize\n obj:");
    let mut written = 0usize;
    for spec in index.specs() {
        if spec.objective == 0.0 {
            continue;
        }
        append_term(&mut out, written, spec.objective, &spec.name);
        written += 1;
    }
    if written == 0 {
        out.push_str(" 0");
    }
    out.push('\n');

    out.push_str("Subject To\n");
    for (row_idx, row) in rows.iter().enumerate() {
        let _ = write!(out, " c{row_idx}:");
        for (term_idx, (id, coeff)) in row.terms.iter().enumerate() {
            append_term(&mut out, term_idx, *coeff, &index.spec(*id).name);
        }
        let sense = match row.sense {
            RowSense::Le => "<=",
            RowSense::Eq => "=",
            RowSense::Ge => ">=",
        };
        let _ = writeln!(out, " {} {}", sense, format_number(row.rhs));
    }

    out.push_str("Bounds\n");
    for spec in index.specs() {
        if let VarDomain::Integer { min, max } = spec.domain {
            let _ = writeln!(out, " {} <= {} <= {}", min, spec.name, max);
        }
    }

    out.push_str("Binaries\n");
    write_name_block(&mut out, index, |domain| matches!(domain, VarDomain::Binary));

    out.push_str("Generals\n");
    write_name_block(&mut out, index, |domain| {
        matches!(domain, VarDomain::Integer { .. })
    });

    out.push_str("End\n");
    out
}

/// Appends one `+/- coeff name` term, wrapping long expressions.
fn append_term(out: &mut String, position: usize, coeff: f64, name: &str) {
    if position > 0 && position % TERMS_PER_LINE == 0 {
        out.push_str("\n   ");
    }
    let magnitude = coeff.abs();
    if coeff < 0.0 {
        out.push_str(" -");
    } else if position > 0 {
        out.push_str(" +");
    }
    if magnitude == 1.0 {
        let _ = write!(out, " {name}");
    } else {
        let _ = write!(out, " {} {name}", format_number(magnitude));
    }
}

/// Writes the names of all variables matching `predicate`.
fn write_name_block(
    out: &mut String,
    index: &VariableIndex,
    predicate: impl Fn(&VarDomain) -> bool,
) {
    let mut written = 0usize;
    for spec in index.specs() {
        if !predicate(&spec.domain) {
            continue;
        }
        if written > 0 && written % NAMES_PER_LINE == 0 {
            out.push('\n');
        }
        let _ = write!(out, " {}", spec.name);
        written += 1;
    }
    if written > 0 {
        out.push('\n');
    }
}

/// Prints integers without a trailing `.0`; everything else uses the
/// shortest round-trip form.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
