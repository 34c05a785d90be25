//! Constraint generation.
//!
//! Expands an instance into the full constraint set of the integer
//! program: sparse linear rows with a relational sense and a right-hand
//! side. Every business rule becomes one constraint family; emission
//! order is fixed so the exported model is reproducible.
//!
//! Families, in emission order:
//! 1. Order uniqueness — an order runs at most once over the horizon
//! 2. Crew coverage — staffing exists iff the order is assigned, at the
//!    exact required headcount
//! 3. Worker exclusivity — one order per worker per slot
//! 4. Daily shift cap — at most 4 shifts worked per day
//! 5. Load balance — pairwise assignment skew bounded by 10
//! 6. Day-off accounting — worked-day indicators with their big-M and
//!    lower-bound links, at most 5 worked days
//! 7. Wages — payment definition, task-unit conservation, and the
//!    piecewise bracket ladder from [`super::wages`]
//! 8. Non-consecutive pairs — same worker, back-to-back shifts
//! 9. Sequential pairs — crew-fraction flow into the next shift
//! 10. Conflicting workers — never share an order slot
//! 11. Repetitive pairs — same row shape as family 8, separate table
//!
//! Relation tables are validated against instance cardinalities before
//! any row is emitted; a malformed instance never yields a partial model.

use tracing::debug;

use crate::models::Instance;
use crate::validation::{validate_instance, ValidationError};

use super::variables::{VarId, VariableIndex};
use super::wages::{ladder_rows, TIER_COUNT, TIER_RATES};

/// Relational sense of a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSense {
    /// Left-hand side <= right-hand side.
    Le,
    /// Left-hand side == right-hand side.
    Eq,
    /// Left-hand side >= right-hand side.
    Ge,
}

/// One sparse constraint row.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRow {
    /// Variable-coefficient terms; each variable appears at most once.
    pub terms: Vec<(VarId, f64)>,
    /// Relational sense.
    pub sense: RowSense,
    /// Right-hand side.
    pub rhs: f64,
}

impl LinearRow {
    /// Creates a row.
    pub fn new(terms: Vec<(VarId, f64)>, sense: RowSense, rhs: f64) -> Self {
        Self { terms, sense, rhs }
    }
}

/// At most 4 of a day's shifts may be worked.
const DAILY_SHIFT_CAP: f64 = 4.0;

/// At most 5 worked days per horizon (one full day off).
const MAX_WORKED_DAYS: f64 = 5.0;

/// Maximum assignment-count skew between any two workers.
const LOAD_BALANCE_SKEW: f64 = 10.0;

/// Emits every constraint row for `instance` against `index`.
///
/// Validates the instance first and returns all configuration errors
/// without emitting anything if it is malformed.
pub fn build_rows(
    instance: &Instance,
    index: &VariableIndex,
) -> Result<Vec<LinearRow>, Vec<ValidationError>> {
    validate_instance(instance)?;

    let mut rows = Vec::new();
    order_uniqueness(instance, index, &mut rows);
    crew_coverage(instance, index, &mut rows);
    worker_exclusivity(instance, index, &mut rows);
    daily_shift_cap(instance, index, &mut rows);
    load_balance(instance, index, &mut rows);
    day_off(instance, index, &mut rows);
    wages(instance, index, &mut rows);
    back_to_back(instance, index, &instance.non_consecutive_pairs, &mut rows);
    sequential(instance, index, &mut rows);
    conflicting_workers(instance, index, &mut rows);
    back_to_back(instance, index, &instance.repetitive_pairs, &mut rows);

    debug!(
        rows = rows.len(),
        variables = index.len(),
        "constraint generation complete"
    );
    Ok(rows)
}

/// All staffing variables of one worker, in scan order.
fn worker_staff_vars(instance: &Instance, index: &VariableIndex, worker: usize) -> Vec<VarId> {
    let mut vars = Vec::with_capacity(instance.order_count() * instance.slot_count());
    for order in 0..instance.order_count() {
        for day in 0..instance.days {
            for shift in 0..instance.shifts {
                vars.push(index.staff(worker, order, day, shift));
            }
        }
    }
    vars
}

/// Staffing variables of one worker on one day, across orders and shifts.
fn worker_day_vars(instance: &Instance, index: &VariableIndex, worker: usize, day: usize) -> Vec<VarId> {
    let mut vars = Vec::with_capacity(instance.order_count() * instance.shifts);
    for order in 0..instance.order_count() {
        for shift in 0..instance.shifts {
            vars.push(index.staff(worker, order, day, shift));
        }
    }
    vars
}

/// Family 1: each order is scheduled at most once across the horizon.
fn order_uniqueness(instance: &Instance, index: &VariableIndex, rows: &mut Vec<LinearRow>) {
    for order in 0..instance.order_count() {
        let mut terms = Vec::with_capacity(instance.slot_count());
        for day in 0..instance.days {
            for shift in 0..instance.shifts {
                terms.push((index.assign(order, day, shift), 1.0));
            }
        }
        rows.push(LinearRow::new(terms, RowSense::Le, 1.0));
    }
}

/// Family 2: staffing count equals crew size exactly when assigned.
fn crew_coverage(instance: &Instance, index: &VariableIndex, rows: &mut Vec<LinearRow>) {
    for order in 0..instance.order_count() {
        let crew = f64::from(instance.workers_needed(order));
        for day in 0..instance.days {
            for shift in 0..instance.shifts {
                let mut terms = Vec::with_capacity(instance.workers + 1);
                for worker in 0..instance.workers {
                    terms.push((index.staff(worker, order, day, shift), 1.0));
                }
                terms.push((index.assign(order, day, shift), -crew));
                rows.push(LinearRow::new(terms, RowSense::Eq, 0.0));
            }
        }
    }
}

/// Family 3: a worker occupies at most one order per slot.
fn worker_exclusivity(instance: &Instance, index: &VariableIndex, rows: &mut Vec<LinearRow>) {
    for worker in 0..instance.workers {
        for day in 0..instance.days {
            for shift in 0..instance.shifts {
                let terms = (0..instance.order_count())
                    .map(|order| (index.staff(worker, order, day, shift), 1.0))
                    .collect();
                rows.push(LinearRow::new(terms, RowSense::Le, 1.0));
            }
        }
    }
}

/// Family 4: at most 4 shifts worked on any day.
fn daily_shift_cap(instance: &Instance, index: &VariableIndex, rows: &mut Vec<LinearRow>) {
    for worker in 0..instance.workers {
        for day in 0..instance.days {
            let terms = worker_day_vars(instance, index, worker, day)
                .into_iter()
                .map(|id| (id, 1.0))
                .collect();
            rows.push(LinearRow::new(terms, RowSense::Le, DAILY_SHIFT_CAP));
        }
    }
}

/// Family 5: assignment-count skew between every ordered worker pair.
///
/// Emitted for both orderings of each pair, which makes the bound
/// two-sided.
fn load_balance(instance: &Instance, index: &VariableIndex, rows: &mut Vec<LinearRow>) {
    let totals: Vec<Vec<VarId>> = (0..instance.workers)
        .map(|worker| worker_staff_vars(instance, index, worker))
        .collect();

    for n in 0..instance.workers {
        for m in 0..instance.workers {
            if n == m {
                continue;
            }
            let mut terms = Vec::with_capacity(totals[n].len() + totals[m].len());
            terms.extend(totals[n].iter().map(|id| (*id, 1.0)));
            terms.extend(totals[m].iter().map(|id| (*id, -1.0)));
            rows.push(LinearRow::new(terms, RowSense::Le, LOAD_BALANCE_SKEW));
        }
    }
}

/// Family 6: worked-day accounting.
///
/// (a) at most 5 worked days; (b) a worked day forces its indicator via
/// big-M; (c) the indicator cannot fire without actual work. Together
/// (b) and (c) make `alpha` an exact indicator.
fn day_off(instance: &Instance, index: &VariableIndex, rows: &mut Vec<LinearRow>) {
    for worker in 0..instance.workers {
        let terms = (0..instance.days)
            .map(|day| (index.worked_day(worker, day), 1.0))
            .collect();
        rows.push(LinearRow::new(terms, RowSense::Le, MAX_WORKED_DAYS));
    }

    let big_m = 2.0 * instance.order_count().max(instance.shifts) as f64;
    for worker in 0..instance.workers {
        for day in 0..instance.days {
            let mut terms: Vec<(VarId, f64)> = worker_day_vars(instance, index, worker, day)
                .into_iter()
                .map(|id| (id, 1.0))
                .collect();
            terms.push((index.worked_day(worker, day), -big_m));
            rows.push(LinearRow::new(terms, RowSense::Le, 0.0));
        }
    }

    for worker in 0..instance.workers {
        for day in 0..instance.days {
            let mut terms: Vec<(VarId, f64)> = worker_day_vars(instance, index, worker, day)
                .into_iter()
                .map(|id| (id, 1.0))
                .collect();
            terms.push((index.worked_day(worker, day), -1.0));
            rows.push(LinearRow::new(terms, RowSense::Ge, 0.0));
        }
    }
}

/// Family 7: wage definition, task-unit conservation, and the bracket
/// ladder.
fn wages(instance: &Instance, index: &VariableIndex, rows: &mut Vec<LinearRow>) {
    // Payment equals the rate-weighted sum of bracket counters.
    for worker in 0..instance.workers {
        let mut terms: Vec<(VarId, f64)> = (0..TIER_COUNT)
            .map(|tier| (index.bracket(worker, tier), TIER_RATES[tier]))
            .collect();
        terms.push((index.payment(worker), -1.0));
        rows.push(LinearRow::new(terms, RowSense::Eq, 0.0));
    }

    // Bracket counters partition the worker's total task count.
    for worker in 0..instance.workers {
        let mut terms: Vec<(VarId, f64)> = worker_staff_vars(instance, index, worker)
            .into_iter()
            .map(|id| (id, 1.0))
            .collect();
        for tier in 0..TIER_COUNT {
            terms.push((index.bracket(worker, tier), -1.0));
        }
        rows.push(LinearRow::new(terms, RowSense::Eq, 0.0));
    }

    let gate = instance.slot_count() as f64;
    for worker in 0..instance.workers {
        rows.extend(ladder_rows(worker, index, gate));
    }
}

/// Families 8 and 11: the same worker must not run `second` in the shift
/// immediately after `first`. Both relation tables share this row shape.
fn back_to_back(
    instance: &Instance,
    index: &VariableIndex,
    pairs: &[crate::models::OrderPair],
    rows: &mut Vec<LinearRow>,
) {
    for worker in 0..instance.workers {
        for day in 0..instance.days {
            for shift in 0..instance.shifts.saturating_sub(1) {
                for pair in pairs {
                    rows.push(LinearRow::new(
                        vec![
                            (index.staff(worker, pair.first, day, shift), 1.0),
                            (index.staff(worker, pair.second, day, shift + 1), 1.0),
                        ],
                        RowSense::Le,
                        1.0,
                    ));
                }
            }
        }
    }
}

/// Family 9: order `second` runs in the shift right after `first`,
/// staffed by any crew.
///
/// Each side is divided by its crew size, so the sums act as fractional
/// "is this order running" signals that must match. At the last shift of
/// a day there is no next shift, and the left side alone is forced to 0.
fn sequential(instance: &Instance, index: &VariableIndex, rows: &mut Vec<LinearRow>) {
    for day in 0..instance.days {
        for shift in 0..instance.shifts {
            for pair in &instance.sequential_pairs {
                let first_fraction = 1.0 / f64::from(instance.workers_needed(pair.first));
                let mut terms: Vec<(VarId, f64)> = (0..instance.workers)
                    .map(|worker| (index.staff(worker, pair.first, day, shift), first_fraction))
                    .collect();

                if shift + 1 < instance.shifts {
                    let second_fraction =
                        1.0 / f64::from(instance.workers_needed(pair.second));
                    terms.extend((0..instance.workers).map(|worker| {
                        (
                            index.staff(worker, pair.second, day, shift + 1),
                            -second_fraction,
                        )
                    }));
                }
                rows.push(LinearRow::new(terms, RowSense::Eq, 0.0));
            }
        }
    }
}

/// Family 10: conflicting workers never share an order slot.
fn conflicting_workers(instance: &Instance, index: &VariableIndex, rows: &mut Vec<LinearRow>) {
    for order in 0..instance.order_count() {
        for day in 0..instance.days {
            for shift in 0..instance.shifts {
                for pair in &instance.conflicting_workers {
                    // A self-pair collapses to a single doubled term,
                    // which pins that worker off the order entirely.
                    let terms = if pair.first == pair.second {
                        vec![(index.staff(pair.first, order, day, shift), 2.0)]
                    } else {
                        vec![
                            (index.staff(pair.first, order, day, shift), 1.0),
                            (index.staff(pair.second, order, day, shift), 1.0),
                        ]
                    };
                    rows.push(LinearRow::new(terms, RowSense::Le, 1.0));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Order, OrderPair, WorkerPair};

    fn fixture() -> (Instance, VariableIndex) {
        let instance = Instance::new(
            vec![Order::new(0, 100.0).with_crew(2), Order::new(1, 150.0)],
            2,
        )
        .with_horizon(2, 2)
        .with_sequential_pairs(vec![OrderPair::new(0, 1)])
        .with_non_consecutive_pairs(vec![OrderPair::new(1, 0)])
        .with_repetitive_pairs(vec![OrderPair::new(0, 0)])
        .with_conflicting_workers(vec![WorkerPair::new(0, 1)]);
        let index = VariableIndex::build(&instance);
        (instance, index)
    }

    #[test]
    fn test_total_row_count() {
        let (instance, index) = fixture();
        let rows = build_rows(&instance, &index).unwrap();

        // uniqueness 2, coverage 8, exclusivity 8, daily cap 4,
        // load balance 2, day-off 2 + 4 + 4, wages 2 + 2 + 20,
        // non-consecutive 4, sequential 4, conflicts 8, repetitive 4.
        assert_eq!(rows.len(), 2 + 8 + 8 + 4 + 2 + 10 + 24 + 4 + 4 + 8 + 4);
    }

    #[test]
    fn test_rows_are_deterministic() {
        let (instance, index) = fixture();
        let a = build_rows(&instance, &index).unwrap();
        let b = build_rows(&instance, &index).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_instance_emits_nothing() {
        let (instance, index) = fixture();
        let broken = instance.with_sequential_pairs(vec![OrderPair::new(0, 9)]);
        assert!(build_rows(&broken, &index).is_err());
    }

    #[test]
    fn test_order_uniqueness_shape() {
        let (instance, index) = fixture();
        let rows = build_rows(&instance, &index).unwrap();

        let row = &rows[0];
        assert_eq!(row.sense, RowSense::Le);
        assert_eq!(row.rhs, 1.0);
        assert_eq!(row.terms.len(), instance.slot_count());
        assert!(row.terms.contains(&(index.assign(0, 1, 1), 1.0)));
    }

    #[test]
    fn test_crew_coverage_shape() {
        let (instance, index) = fixture();
        let rows = build_rows(&instance, &index).unwrap();

        // First coverage row: order 0 (crew 2) at slot (0, 0).
        let row = &rows[2];
        assert_eq!(row.sense, RowSense::Eq);
        assert_eq!(row.rhs, 0.0);
        assert!(row.terms.contains(&(index.staff(0, 0, 0, 0), 1.0)));
        assert!(row.terms.contains(&(index.staff(1, 0, 0, 0), 1.0)));
        assert!(row.terms.contains(&(index.assign(0, 0, 0), -2.0)));
    }

    #[test]
    fn test_load_balance_is_two_sided() {
        let (instance, index) = fixture();
        let rows = build_rows(&instance, &index).unwrap();

        let skew_rows: Vec<&LinearRow> = rows
            .iter()
            .filter(|r| r.rhs == 10.0 && r.sense == RowSense::Le)
            .collect();
        assert_eq!(skew_rows.len(), 2);

        // One row per ordering of the pair.
        let first = skew_rows[0];
        let second = skew_rows[1];
        assert!(first.terms.contains(&(index.staff(0, 0, 0, 0), 1.0)));
        assert!(first.terms.contains(&(index.staff(1, 0, 0, 0), -1.0)));
        assert!(second.terms.contains(&(index.staff(1, 0, 0, 0), 1.0)));
        assert!(second.terms.contains(&(index.staff(0, 0, 0, 0), -1.0)));
    }

    #[test]
    fn test_day_off_big_m() {
        let (instance, index) = fixture();
        let rows = build_rows(&instance, &index).unwrap();

        // M = 2 * max(orders, shifts) = 4 for this fixture.
        let m_row = rows
            .iter()
            .find(|r| r.terms.contains(&(index.worked_day(0, 0), -4.0)))
            .unwrap();
        assert_eq!(m_row.sense, RowSense::Le);
        assert_eq!(m_row.rhs, 0.0);

        // Lower link: day total >= indicator.
        let link_row = rows
            .iter()
            .find(|r| r.terms.contains(&(index.worked_day(0, 0), -1.0)) && r.sense == RowSense::Ge)
            .unwrap();
        assert_eq!(link_row.rhs, 0.0);
    }

    #[test]
    fn test_wage_payment_definition() {
        let (instance, index) = fixture();
        let rows = build_rows(&instance, &index).unwrap();

        let row = rows
            .iter()
            .find(|r| r.terms.contains(&(index.payment(0), -1.0)))
            .unwrap();
        assert_eq!(row.sense, RowSense::Eq);
        assert!(row.terms.contains(&(index.bracket(0, 0), 1000.0)));
        assert!(row.terms.contains(&(index.bracket(0, 1), 1200.0)));
        assert!(row.terms.contains(&(index.bracket(0, 2), 1400.0)));
        assert!(row.terms.contains(&(index.bracket(0, 3), 1500.0)));
    }

    #[test]
    fn test_sequential_fractions() {
        let (instance, index) = fixture();
        let rows = build_rows(&instance, &index).unwrap();

        // Shift 0 row pairs order 0 (crew 2) with order 1 (crew 1) in
        // shift 1: coefficients 1/2 and -1.
        let flow_row = rows
            .iter()
            .find(|r| r.terms.contains(&(index.staff(0, 0, 0, 0), 0.5)))
            .unwrap();
        assert_eq!(flow_row.sense, RowSense::Eq);
        assert_eq!(flow_row.terms.len(), 4);
        assert!(flow_row.terms.contains(&(index.staff(0, 1, 0, 1), -1.0)));

        // Last shift of the day: the left side alone, forced to zero.
        let closing_row = rows
            .iter()
            .find(|r| {
                r.sense == RowSense::Eq
                    && r.terms.len() == 2
                    && r.terms.contains(&(index.staff(0, 0, 0, 1), 0.5))
                    && r.terms.contains(&(index.staff(1, 0, 0, 1), 0.5))
            })
            .unwrap();
        assert_eq!(closing_row.rhs, 0.0);
    }

    #[test]
    fn test_conflicting_workers_shape() {
        let (instance, index) = fixture();
        let rows = build_rows(&instance, &index).unwrap();

        let row = rows
            .iter()
            .find(|r| {
                r.terms.len() == 2
                    && r.terms.contains(&(index.staff(0, 1, 1, 1), 1.0))
                    && r.terms.contains(&(index.staff(1, 1, 1, 1), 1.0))
            })
            .unwrap();
        assert_eq!(row.sense, RowSense::Le);
        assert_eq!(row.rhs, 1.0);
    }

    #[test]
    fn test_conflicting_self_pair_collapses() {
        let instance = Instance::new(vec![Order::new(0, 10.0)], 2)
            .with_horizon(1, 1)
            .with_conflicting_workers(vec![WorkerPair::new(1, 1)]);
        let index = VariableIndex::build(&instance);
        let rows = build_rows(&instance, &index).unwrap();

        let row = rows
            .iter()
            .find(|r| r.terms.contains(&(index.staff(1, 0, 0, 0), 2.0)))
            .unwrap();
        assert_eq!(row.terms.len(), 1);
        assert_eq!(row.rhs, 1.0);
    }

    #[test]
    fn test_single_shift_horizon_drops_back_to_back() {
        let instance = Instance::new(vec![Order::new(0, 10.0), Order::new(1, 20.0)], 2)
            .with_horizon(2, 1)
            .with_non_consecutive_pairs(vec![OrderPair::new(0, 1)])
            .with_sequential_pairs(vec![OrderPair::new(0, 1)]);
        let index = VariableIndex::build(&instance);
        let rows = build_rows(&instance, &index).unwrap();

        // No k+1 exists, so every sequential row forces the first order's
        // crew fraction to zero and no back-to-back row is emitted.
        let seq_rows: Vec<&LinearRow> = rows
            .iter()
            .filter(|r| r.sense == RowSense::Eq && r.terms.iter().all(|(_, c)| *c == 1.0))
            .collect();
        assert_eq!(seq_rows.len(), 2);
        for row in seq_rows {
            assert_eq!(row.terms.len(), 2);
            assert_eq!(row.rhs, 0.0);
        }
    }
}
