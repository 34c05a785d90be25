//! Mixed-integer model formulation.
//!
//! Expands an [`Instance`] into the complete variable and constraint set
//! of the scheduling integer program, ready for submission to a MILP
//! engine:
//!
//! - [`variables`]: the variable factory and its typed index
//! - [`constraints`]: the eleven business-rule constraint families
//! - [`wages`]: the piecewise wage linearization ladder
//! - [`lp`]: the reproducible LP-format export
//!
//! # Reference
//! - Wolsey (2020), "Integer Programming", Ch. 1 (modeling with binary
//!   variables and big-M indicators)

pub mod constraints;
pub mod lp;
pub mod variables;
pub mod wages;

pub use constraints::{build_rows, LinearRow, RowSense};
pub use variables::{VarDomain, VarId, VarSpec, VariableIndex};
pub use wages::piecewise_wage;

use tracing::info;

use crate::models::Instance;
use crate::validation::ValidationError;

/// A complete model: the variable index plus every constraint row.
///
/// The objective lives on the variables (maximize profit minus wages);
/// rows carry only structural coefficients.
#[derive(Debug, Clone)]
pub struct MipModel {
    /// All decision variables in submission order.
    pub index: VariableIndex,
    /// All constraint rows in emission order.
    pub rows: Vec<LinearRow>,
}

impl MipModel {
    /// Number of variables.
    pub fn variable_count(&self) -> usize {
        self.index.len()
    }

    /// Number of constraint rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Renders the model as an LP-format document.
    pub fn to_lp_string(&self, name: &str) -> String {
        lp::write_lp(name, &self.index, &self.rows)
    }
}

/// Builds the full model for an instance.
///
/// Fails with every detected configuration error if the instance is
/// malformed; no partial model is produced.
pub fn build_model(instance: &Instance) -> Result<MipModel, Vec<ValidationError>> {
    let index = VariableIndex::build(instance);
    let rows = constraints::build_rows(instance, &index)?;
    info!(
        variables = index.len(),
        rows = rows.len(),
        orders = instance.order_count(),
        workers = instance.workers,
        "model built"
    );
    Ok(MipModel { index, rows })
}
