//! Decision-variable factory and typed index.
//!
//! Allocates every decision variable of the model exactly once, with
//! bounds, integrality, and objective coefficient fixed at creation.
//! Lookups go through a typed multi-dimensional index (flat vectors with
//! stride arithmetic) keyed by semantic role, so each role is addressed
//! by its natural index tuple rather than by name.
//!
//! Variable roles and names:
//! - `O_{i}_{j}_{k}` — order i scheduled on day j, shift k (binary)
//! - `T^{n}_{i}_{j}_{k}` — worker n staffs order i at (j, k) (binary)
//! - `alpha^{n}_{j}` — worker n worked at least one shift on day j (binary)
//! - `P^{n}` — total wage owed to worker n (integer)
//! - `x^{n}_{t}` — task-units of worker n priced in wage tier t (integer)
//! - `w^{n}_{t}` — wage tier t+1 of worker n is open (binary)

use crate::models::Instance;

use super::wages::{TIER_CAPACITY, TIER_COUNT};

/// Upper bound on a single worker's total wage.
const PAYMENT_UPPER_BOUND: i32 = 10_000_000;

/// Handle to one decision variable; indexes the submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    /// Position of the variable in the submission order, which is also
    /// its position in the solved value vector.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Variable integrality and bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarDomain {
    /// Binary 0/1 variable.
    Binary,
    /// Bounded integer variable.
    Integer {
        /// Inclusive lower bound.
        min: i32,
        /// Inclusive upper bound.
        max: i32,
    },
}

/// One variable: stable name, domain, and objective coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct VarSpec {
    /// Stable name used in the LP export and the value-map artifact.
    pub name: String,
    /// Integrality and bounds.
    pub domain: VarDomain,
    /// Coefficient in the (maximized) objective.
    pub objective: f64,
}

/// Typed index over all decision variables of one model.
///
/// Built once per instance; read-only afterwards. Two builds from the
/// same instance yield identical structure.
#[derive(Debug, Clone)]
pub struct VariableIndex {
    specs: Vec<VarSpec>,
    orders: usize,
    workers: usize,
    days: usize,
    shifts: usize,
    assign: Vec<VarId>,
    staff: Vec<VarId>,
    worked_day: Vec<VarId>,
    payment: Vec<VarId>,
    bracket: Vec<VarId>,
    bracket_open: Vec<VarId>,
}

impl VariableIndex {
    /// Allocates every variable for `instance`.
    ///
    /// Creation order is fixed: assignment variables, staffing variables,
    /// worked-day indicators, payments, then the per-worker wage brackets
    /// with their openers interleaved. The solved value vector follows
    /// this order.
    pub fn build(instance: &Instance) -> Self {
        let orders = instance.order_count();
        let workers = instance.workers;
        let days = instance.days;
        let shifts = instance.shifts;

        let mut specs = Vec::new();
        let push = |specs: &mut Vec<VarSpec>, spec: VarSpec| -> VarId {
            let id = VarId(specs.len());
            specs.push(spec);
            id
        };

        let mut assign = Vec::with_capacity(orders * days * shifts);
        for order in &instance.orders {
            for day in 0..days {
                for shift in 0..shifts {
                    assign.push(push(
                        &mut specs,
                        VarSpec {
                            name: format!("O_{}_{}_{}", order.id, day, shift),
                            domain: VarDomain::Binary,
                            objective: order.profit,
                        },
                    ));
                }
            }
        }

        let mut staff = Vec::with_capacity(workers * orders * days * shifts);
        for worker in 0..workers {
            for order in 0..orders {
                for day in 0..days {
                    for shift in 0..shifts {
                        staff.push(push(
                            &mut specs,
                            VarSpec {
                                name: format!("T^{}_{}_{}_{}", worker, order, day, shift),
                                domain: VarDomain::Binary,
                                objective: 0.0,
                            },
                        ));
                    }
                }
            }
        }

        let mut worked_day = Vec::with_capacity(workers * days);
        for worker in 0..workers {
            for day in 0..days {
                worked_day.push(push(
                    &mut specs,
                    VarSpec {
                        name: format!("alpha^{}_{}", worker, day),
                        domain: VarDomain::Binary,
                        objective: 0.0,
                    },
                ));
            }
        }

        let mut payment = Vec::with_capacity(workers);
        for worker in 0..workers {
            payment.push(push(
                &mut specs,
                VarSpec {
                    name: format!("P^{}", worker),
                    domain: VarDomain::Integer {
                        min: 0,
                        max: PAYMENT_UPPER_BOUND,
                    },
                    objective: -1.0,
                },
            ));
        }

        // The last tier has no intrinsic capacity; it is bounded by the
        // slot count of the horizon, the most any worker can accumulate.
        let horizon_units = (days * shifts) as i32;
        let mut bracket = Vec::with_capacity(workers * TIER_COUNT);
        let mut bracket_open = Vec::with_capacity(workers * (TIER_COUNT - 1));
        for worker in 0..workers {
            for tier in 0..TIER_COUNT {
                let max = if tier < TIER_COUNT - 1 {
                    TIER_CAPACITY[tier]
                } else {
                    horizon_units
                };
                bracket.push(push(
                    &mut specs,
                    VarSpec {
                        name: format!("x^{}_{}", worker, tier),
                        domain: VarDomain::Integer { min: 0, max },
                        objective: 0.0,
                    },
                ));
                if tier < TIER_COUNT - 1 {
                    bracket_open.push(push(
                        &mut specs,
                        VarSpec {
                            name: format!("w^{}_{}", worker, tier),
                            domain: VarDomain::Binary,
                            objective: 0.0,
                        },
                    ));
                }
            }
        }

        Self {
            specs,
            orders,
            workers,
            days,
            shifts,
            assign,
            staff,
            worked_day,
            payment,
            bracket,
            bracket_open,
        }
    }

    /// Assignment variable for (order, day, shift).
    pub fn assign(&self, order: usize, day: usize, shift: usize) -> VarId {
        self.assign[(order * self.days + day) * self.shifts + shift]
    }

    /// Staffing variable for (worker, order, day, shift).
    pub fn staff(&self, worker: usize, order: usize, day: usize, shift: usize) -> VarId {
        self.staff[((worker * self.orders + order) * self.days + day) * self.shifts + shift]
    }

    /// Worked-day indicator for (worker, day).
    pub fn worked_day(&self, worker: usize, day: usize) -> VarId {
        self.worked_day[worker * self.days + day]
    }

    /// Payment variable for a worker.
    pub fn payment(&self, worker: usize) -> VarId {
        self.payment[worker]
    }

    /// Bracket counter for (worker, tier), tier in 0..4.
    pub fn bracket(&self, worker: usize, tier: usize) -> VarId {
        self.bracket[worker * TIER_COUNT + tier]
    }

    /// Tier-opening indicator for (worker, tier), tier in 0..3.
    pub fn bracket_open(&self, worker: usize, tier: usize) -> VarId {
        self.bracket_open[worker * (TIER_COUNT - 1) + tier]
    }

    /// All variables in submission order.
    pub fn specs(&self) -> &[VarSpec] {
        &self.specs
    }

    /// Spec of one variable.
    pub fn spec(&self, id: VarId) -> &VarSpec {
        &self.specs[id.0]
    }

    /// Total number of variables.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the model has no variables.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Number of orders the index was built for.
    pub fn order_count(&self) -> usize {
        self.orders
    }

    /// Number of workers the index was built for.
    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// Days in the horizon.
    pub fn days(&self) -> usize {
        self.days
    }

    /// Shifts per day.
    pub fn shifts(&self) -> usize {
        self.shifts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Order;

    fn sample_instance() -> Instance {
        Instance::new(
            vec![Order::new(0, 100.0).with_crew(2), Order::new(1, 150.0)],
            3,
        )
        .with_horizon(2, 2)
    }

    #[test]
    fn test_variable_counts() {
        let instance = sample_instance();
        let index = VariableIndex::build(&instance);

        // 2 orders x 2 days x 2 shifts assignment vars,
        // 3 workers x 2 x 2 x 2 staffing vars,
        // 3 x 2 worked-day, 3 payments, 3 x 4 brackets, 3 x 3 openers.
        assert_eq!(
            index.len(),
            2 * 2 * 2 + 3 * 2 * 2 * 2 + 3 * 2 + 3 + 3 * 4 + 3 * 3
        );
    }

    #[test]
    fn test_objective_coefficients() {
        let instance = sample_instance();
        let index = VariableIndex::build(&instance);

        assert_eq!(index.spec(index.assign(0, 1, 0)).objective, 100.0);
        assert_eq!(index.spec(index.assign(1, 0, 1)).objective, 150.0);
        assert_eq!(index.spec(index.payment(2)).objective, -1.0);
        assert_eq!(index.spec(index.staff(1, 0, 1, 1)).objective, 0.0);
        assert_eq!(index.spec(index.worked_day(0, 0)).objective, 0.0);
        assert_eq!(index.spec(index.bracket(1, 2)).objective, 0.0);
    }

    #[test]
    fn test_domains() {
        let instance = sample_instance();
        let index = VariableIndex::build(&instance);

        assert_eq!(index.spec(index.assign(0, 0, 0)).domain, VarDomain::Binary);
        assert_eq!(
            index.spec(index.staff(2, 1, 1, 1)).domain,
            VarDomain::Binary
        );
        assert_eq!(
            index.spec(index.bracket(0, 0)).domain,
            VarDomain::Integer { min: 0, max: 5 }
        );
        assert_eq!(
            index.spec(index.bracket(0, 1)).domain,
            VarDomain::Integer { min: 0, max: 4 }
        );
        // Last tier is bounded only by the horizon slot count.
        assert_eq!(
            index.spec(index.bracket(0, 3)).domain,
            VarDomain::Integer { min: 0, max: 4 }
        );
        assert_eq!(
            index.spec(index.bracket_open(0, 2)).domain,
            VarDomain::Binary
        );
    }

    #[test]
    fn test_names_are_stable() {
        let instance = sample_instance();
        let index = VariableIndex::build(&instance);

        assert_eq!(index.spec(index.assign(1, 0, 1)).name, "O_1_0_1");
        assert_eq!(index.spec(index.staff(2, 1, 0, 1)).name, "T^2_1_0_1");
        assert_eq!(index.spec(index.worked_day(1, 1)).name, "alpha^1_1");
        assert_eq!(index.spec(index.payment(0)).name, "P^0");
        assert_eq!(index.spec(index.bracket(2, 3)).name, "x^2_3");
        assert_eq!(index.spec(index.bracket_open(2, 1)).name, "w^2_1");
    }

    #[test]
    fn test_build_is_deterministic() {
        let instance = sample_instance();
        let a = VariableIndex::build(&instance);
        let b = VariableIndex::build(&instance);
        assert_eq!(a.specs(), b.specs());
    }

    #[test]
    fn test_ids_cover_all_slots_once() {
        let instance = sample_instance();
        let index = VariableIndex::build(&instance);

        let mut seen = vec![false; index.len()];
        for n in 0..3 {
            for i in 0..2 {
                for j in 0..2 {
                    for k in 0..2 {
                        let id = index.staff(n, i, j, k);
                        assert!(!seen[id.index()]);
                        seen[id.index()] = true;
                    }
                }
            }
        }
        assert_eq!(seen.iter().filter(|s| **s).count(), 24);
    }
}
