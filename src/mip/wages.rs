//! Piecewise wage linearization.
//!
//! Wages follow a convex increasing step-rate schedule: a worker's first
//! 5 task-units are paid at 1000 each, the next 4 at 1200, the next 4 at
//! 1400, and every further unit at 1500. The model encodes this with
//! per-tier bracket counters `x^n_t` and tier-opening indicators `w^n_t`
//! chained so that a tier only accepts units once all lower tiers are
//! saturated:
//!
//! - chain: `w^n_2 <= w^n_1 <= w^n_0`
//! - tier 0: `5*w^n_0 <= x^n_0 <= 5`
//! - tier 1: `4*w^n_1 <= x^n_1 <= 4*w^n_0`
//! - tier 2: `4*w^n_2 <= x^n_2 <= 4*w^n_1`
//! - tier 3: `0 <= x^n_3 <= gate*w^n_2`
//!
//! The ladder is emitted here, separate from the rest of the constraint
//! assembly, so it can be exercised in isolation.
//!
//! # Reference
//! Williams (2013), "Model Building in Mathematical Programming", Ch. 9
//! (separable programming / piecewise-linear costs)

use super::constraints::{LinearRow, RowSense};
use super::variables::VariableIndex;

/// Number of wage tiers.
pub const TIER_COUNT: usize = 4;

/// Pay rate per task-unit in each tier.
pub const TIER_RATES: [f64; TIER_COUNT] = [1000.0, 1200.0, 1400.0, 1500.0];

/// Unit capacity of each bounded tier; the last tier is unbounded.
pub const TIER_CAPACITY: [i32; TIER_COUNT - 1] = [5, 4, 4];

/// Emits the bracket ladder for one worker: two chain rows plus two
/// sandwich rows per tier, ten rows total.
///
/// `gate` must exceed any task count a worker can accumulate over the
/// horizon so the last tier is unconstrained whenever it is open.
pub fn ladder_rows(worker: usize, index: &VariableIndex, gate: f64) -> Vec<LinearRow> {
    let x = |tier: usize| index.bracket(worker, tier);
    let w = |tier: usize| index.bracket_open(worker, tier);
    let cap = |tier: usize| f64::from(TIER_CAPACITY[tier]);

    let mut rows = Vec::with_capacity(10);

    // Opening chain: a tier cannot open before the one below it.
    rows.push(LinearRow::new(
        vec![(w(2), 1.0), (w(1), -1.0)],
        RowSense::Le,
        0.0,
    ));
    rows.push(LinearRow::new(
        vec![(w(1), 1.0), (w(0), -1.0)],
        RowSense::Le,
        0.0,
    ));

    // Tier 0: saturated as soon as tier 1 opens, capped unconditionally.
    rows.push(LinearRow::new(
        vec![(w(0), cap(0)), (x(0), -1.0)],
        RowSense::Le,
        0.0,
    ));
    rows.push(LinearRow::new(vec![(x(0), 1.0)], RowSense::Le, cap(0)));

    // Tiers 1 and 2: sandwiched between their own opener and the one below.
    for tier in 1..=2 {
        rows.push(LinearRow::new(
            vec![(w(tier), cap(tier)), (x(tier), -1.0)],
            RowSense::Le,
            0.0,
        ));
        rows.push(LinearRow::new(
            vec![(x(tier), 1.0), (w(tier - 1), -cap(tier))],
            RowSense::Le,
            0.0,
        ));
    }

    // Tier 3: open-ended, gated by the tier-2 opener.
    rows.push(LinearRow::new(vec![(x(3), 1.0)], RowSense::Ge, 0.0));
    rows.push(LinearRow::new(
        vec![(x(3), 1.0), (w(2), -gate)],
        RowSense::Le,
        0.0,
    ));

    rows
}

/// Reference wage curve: the exact pay owed for a given task-unit count.
///
/// Any feasible bracket split the ladder admits for `units` task-units
/// prices to this value, so decoded `Payment` variables can be checked
/// against it directly.
pub fn piecewise_wage(units: u32) -> f64 {
    let mut remaining = u64::from(units);
    let mut total = 0.0;
    for tier in 0..TIER_COUNT - 1 {
        let take = remaining.min(TIER_CAPACITY[tier] as u64);
        total += take as f64 * TIER_RATES[tier];
        remaining -= take;
    }
    total + remaining as f64 * TIER_RATES[TIER_COUNT - 1]
}
