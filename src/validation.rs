//! Input validation for problem instances.
//!
//! Checks structural integrity of an instance before any model is built.
//! Detects:
//! - Degenerate horizons (zero days or shifts) and empty worker pools
//! - Non-contiguous or duplicate order ids
//! - Invalid crew sizes and negative profits
//! - Relation-table entries referencing orders or workers out of range
//!
//! All problems are collected and reported together; a single malformed
//! pair should not hide the rest.

use crate::models::Instance;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The horizon has zero days or zero shifts.
    EmptyHorizon,
    /// The instance has no workers.
    NoWorkers,
    /// Order ids are not the contiguous range 0..N-1.
    NonContiguousOrderId,
    /// An order requires a crew of zero.
    InvalidCrewSize,
    /// An order has a negative profit.
    NegativeProfit,
    /// A relation pair references an order outside 0..N-1.
    OrderIndexOutOfRange,
    /// A relation pair references a worker outside 0..W-1.
    WorkerIndexOutOfRange,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Joins error messages into a single line for log and error output.
pub fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates a problem instance.
///
/// Checks:
/// 1. Horizon dimensions are at least 1x1 and the worker pool is non-empty
/// 2. Order ids form the contiguous range 0..N-1
/// 3. Every order needs at least one worker and has non-negative profit
/// 4. Every order pair in the three order-relation tables is in range
/// 5. Every conflicting-worker pair is in range
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();

    if instance.days == 0 || instance.shifts == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyHorizon,
            format!(
                "Horizon must be at least 1x1, got {} day(s) x {} shift(s)",
                instance.days, instance.shifts
            ),
        ));
    }

    if instance.workers == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoWorkers,
            "Instance has no workers",
        ));
    }

    for (position, order) in instance.orders.iter().enumerate() {
        if order.id != position {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonContiguousOrderId,
                format!("Order at position {} has id {}", position, order.id),
            ));
        }
        if order.workers_needed == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCrewSize,
                format!("Order {} requires a crew of zero", order.id),
            ));
        }
        if order.profit < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeProfit,
                format!("Order {} has negative profit {}", order.id, order.profit),
            ));
        }
    }

    let order_count = instance.order_count();
    let order_tables = [
        ("sequential_orders", &instance.sequential_pairs),
        ("non_seq_orders", &instance.non_consecutive_pairs),
        ("repetitive_orders", &instance.repetitive_pairs),
    ];
    for (table, pairs) in order_tables {
        for pair in pairs.iter() {
            for order in [pair.first, pair.second] {
                if order >= order_count {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::OrderIndexOutOfRange,
                        format!(
                            "Table '{}' references order {} but only {} order(s) exist",
                            table, order, order_count
                        ),
                    ));
                }
            }
        }
    }

    for pair in &instance.conflicting_workers {
        for worker in [pair.first, pair.second] {
            if worker >= instance.workers {
                errors.push(ValidationError::new(
                    ValidationErrorKind::WorkerIndexOutOfRange,
                    format!(
                        "Table 'conflictive_workers' references worker {} but only {} worker(s) exist",
                        worker, instance.workers
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
