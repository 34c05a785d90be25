//! Model submission to the MILP engine.
//!
//! Translates a built [`MipModel`] into the engine's form, triggers one
//! deterministic solve, and returns the outcome: a status, the objective
//! value, and a dense value vector aligned to the variable index. The
//! engine runs pure branch-and-bound over exact LP-relaxation bounds,
//! with no cut generation and no primal heuristics, so identical input
//! yields an identical search.
//!
//! Infeasible and unbounded outcomes are reported as statuses, never as
//! panics; their variable values are meaningless and are not returned.

use microlp::{ComparisonOp, Error as EngineError, OptimizationDirection, Problem};
use tracing::info;

use crate::mip::{MipModel, RowSense, VarDomain};

/// Terminal state of one solve.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    /// An optimal integer solution was found.
    Optimal,
    /// The constraints cannot all be satisfied.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
    /// The engine failed internally.
    Error(String),
}

impl SolveStatus {
    /// Whether the outcome carries a decodable solution.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Unbounded => write!(f, "unbounded"),
            SolveStatus::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// Result of one submission.
///
/// `objective` and `values` are present only for an optimal outcome;
/// `values` is ordered identically to the submitted variable list.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Terminal status.
    pub status: SolveStatus,
    /// Objective value at the optimum.
    pub objective: Option<f64>,
    /// Dense variable values, aligned to the variable index.
    pub values: Option<Vec<f64>>,
}

/// Submits the model and waits for the solve to finish.
pub fn submit(model: &MipModel) -> SolveOutcome {
    let mut problem = Problem::new(OptimizationDirection::Maximize);

    let engine_vars: Vec<microlp::Variable> = model
        .index
        .specs()
        .iter()
        .map(|spec| match spec.domain {
            VarDomain::Binary => problem.add_binary_var(spec.objective),
            VarDomain::Integer { min, max } => problem.add_integer_var(spec.objective, (min, max)),
        })
        .collect();

    for row in &model.rows {
        let terms: Vec<(microlp::Variable, f64)> = row
            .terms
            .iter()
            .map(|(id, coeff)| (engine_vars[id.index()], *coeff))
            .collect();
        let op = match row.sense {
            RowSense::Le => ComparisonOp::Le,
            RowSense::Eq => ComparisonOp::Eq,
            RowSense::Ge => ComparisonOp::Ge,
        };
        problem.add_constraint(terms.as_slice(), op, row.rhs);
    }

    match problem.solve() {
        Ok(solution) => {
            let values: Vec<f64> = engine_vars
                .iter()
                .map(|var| *solution.var_value(*var))
                .collect();
            let objective = solution.objective();
            info!(objective, status = "optimal", "solve finished");
            SolveOutcome {
                status: SolveStatus::Optimal,
                objective: Some(objective),
                values: Some(values),
            }
        }
        Err(EngineError::Infeasible) => {
            info!(status = "infeasible", "solve finished");
            SolveOutcome {
                status: SolveStatus::Infeasible,
                objective: None,
                values: None,
            }
        }
        Err(EngineError::Unbounded) => {
            info!(status = "unbounded", "solve finished");
            SolveOutcome {
                status: SolveStatus::Unbounded,
                objective: None,
                values: None,
            }
        }
        Err(err) => SolveOutcome {
            status: SolveStatus::Error(err.to_string()),
            objective: None,
            values: None,
        },
    }
}
