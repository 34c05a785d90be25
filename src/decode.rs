//! Result decoding.
//!
//! Maps a solved value vector back into the two schedule views. On/off
//! detection is tolerance-based because optimizer output is floating
//! point: relaxation artifacts can leave values like 1e-9 or -0.0 on
//! variables that are logically zero.
//!
//! The decoder scans every (worker, order, day, shift) combination
//! exactly once and collects crew membership during that scan; it never
//! goes back to the solver for individual cells.

use std::collections::BTreeMap;

use tracing::warn;

use crate::mip::VariableIndex;
use crate::models::{
    worker_label, Instance, OrderPlacement, OrderSchedule, SlotRef, WorkerSchedule,
};

/// Absolute tolerance separating "on" from "off" variable values.
pub const VALUE_TOLERANCE: f64 = 1e-5;

/// Whether a solved binary value counts as on. Both +0.0 and -0.0 are
/// off.
fn is_on(value: f64) -> bool {
    value.abs() > VALUE_TOLERANCE
}

/// Decodes the solved values into per-worker and per-order schedules.
///
/// A staffed slot whose assignment variable is off should be impossible
/// under the constraint model; if tolerance blur produces one anyway it
/// is logged and the worker entries are kept.
pub fn decode_schedules(
    instance: &Instance,
    index: &VariableIndex,
    values: &[f64],
) -> (WorkerSchedule, OrderSchedule) {
    debug_assert_eq!(values.len(), index.len());

    let mut worker_schedule = WorkerSchedule::new();
    let mut crews: Vec<Vec<String>> =
        vec![Vec::new(); instance.order_count() * instance.slot_count()];

    for worker in 0..instance.workers {
        for order in 0..instance.order_count() {
            for day in 0..instance.days {
                for shift in 0..instance.shifts {
                    let value = values[index.staff(worker, order, day, shift).index()];
                    if is_on(value) {
                        worker_schedule.add_entry(worker, order, SlotRef::new(day, shift));
                        crews[(order * instance.days + day) * instance.shifts + shift]
                            .push(worker_label(worker));
                    }
                }
            }
        }
    }

    let mut order_schedule = OrderSchedule::new();
    for order in 0..instance.order_count() {
        for day in 0..instance.days {
            for shift in 0..instance.shifts {
                let slot = (order * instance.days + day) * instance.shifts + shift;
                let crew = std::mem::take(&mut crews[slot]);
                if is_on(values[index.assign(order, day, shift).index()]) {
                    order_schedule.add_placement(
                        order,
                        OrderPlacement {
                            day,
                            shift,
                            workers_needed: instance.workers_needed(order),
                            workers_involved: crew,
                        },
                    );
                } else if !crew.is_empty() {
                    warn!(
                        order,
                        day,
                        shift,
                        staffed = crew.len(),
                        "staffed slot without an assigned order; keeping worker entries"
                    );
                }
            }
        }
    }

    (worker_schedule, order_schedule)
}

/// Flat name-to-value map of every solved variable, for the result
/// artifact.
pub fn variable_values(index: &VariableIndex, values: &[f64]) -> BTreeMap<String, f64> {
    index
        .specs()
        .iter()
        .zip(values)
        .map(|(spec, value)| (spec.name.clone(), *value))
        .collect()
}
