//! Decoded schedule models.
//!
//! A solved model decodes into two complementary views: the
//! [`WorkerSchedule`] (what each worker does and when) and the
//! [`OrderSchedule`] (when each order runs and which crew staffs it).
//! Both use sorted maps so serialized artifacts are deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A (day, shift) position in the planning horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRef {
    /// Day index (0-based).
    pub day: usize,
    /// Shift index within the day (0-based).
    pub shift: usize,
}

impl SlotRef {
    /// Creates a slot reference.
    pub fn new(day: usize, shift: usize) -> Self {
        Self { day, shift }
    }
}

/// Stable textual label for an order, used as a key in decoded artifacts.
pub fn order_label(order: usize) -> String {
    format!("order_{order}")
}

/// Stable textual label for a worker.
pub fn worker_label(worker: usize) -> String {
    format!("worker_{worker}")
}

/// One worker's decoded agenda: order label -> slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerAgenda {
    /// Orders this worker staffs, keyed by order label.
    pub orders: BTreeMap<String, SlotRef>,
}

/// Per-worker view of a solved schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerSchedule {
    /// Agendas keyed by worker index; workers with no work are absent.
    pub agendas: BTreeMap<usize, WorkerAgenda>,
}

impl WorkerSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `worker` staffs `order` at `slot`.
    pub fn add_entry(&mut self, worker: usize, order: usize, slot: SlotRef) {
        self.agendas
            .entry(worker)
            .or_default()
            .orders
            .insert(order_label(order), slot);
    }

    /// Agenda for a worker, if they have any work.
    pub fn agenda(&self, worker: usize) -> Option<&WorkerAgenda> {
        self.agendas.get(&worker)
    }

    /// Number of workers with at least one assignment.
    pub fn worker_count(&self) -> usize {
        self.agendas.len()
    }

    /// Total number of (worker, order) assignments.
    pub fn assignment_count(&self) -> usize {
        self.agendas.values().map(|a| a.orders.len()).sum()
    }

    /// Whether no worker has any assignment.
    pub fn is_empty(&self) -> bool {
        self.agendas.is_empty()
    }
}

/// Where an order runs and who staffs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlacement {
    /// Day the order runs.
    pub day: usize,
    /// Shift the order runs.
    pub shift: usize,
    /// Required crew size, copied from the instance.
    pub workers_needed: u32,
    /// Labels of the workers staffing the order.
    pub workers_involved: Vec<String>,
}

/// Per-order view of a solved schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderSchedule {
    /// Placements keyed by order label; unscheduled orders are absent.
    pub placements: BTreeMap<String, OrderPlacement>,
}

impl OrderSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a placement for `order`.
    pub fn add_placement(&mut self, order: usize, placement: OrderPlacement) {
        self.placements.insert(order_label(order), placement);
    }

    /// Placement for an order, if it was scheduled.
    pub fn placement(&self, order: usize) -> Option<&OrderPlacement> {
        self.placements.get(&order_label(order))
    }

    /// Number of scheduled orders.
    pub fn scheduled_count(&self) -> usize {
        self.placements.len()
    }

    /// Whether no order was scheduled.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_schedule_entries() {
        let mut ws = WorkerSchedule::new();
        ws.add_entry(0, 2, SlotRef::new(1, 3));
        ws.add_entry(0, 5, SlotRef::new(2, 0));
        ws.add_entry(3, 2, SlotRef::new(1, 3));

        assert_eq!(ws.worker_count(), 2);
        assert_eq!(ws.assignment_count(), 3);
        assert_eq!(
            ws.agenda(0).unwrap().orders.get("order_2"),
            Some(&SlotRef::new(1, 3))
        );
        assert!(ws.agenda(1).is_none());
    }

    #[test]
    fn test_order_schedule_placements() {
        let mut os = OrderSchedule::new();
        os.add_placement(
            1,
            OrderPlacement {
                day: 0,
                shift: 4,
                workers_needed: 2,
                workers_involved: vec![worker_label(0), worker_label(3)],
            },
        );

        let placement = os.placement(1).unwrap();
        assert_eq!(placement.day, 0);
        assert_eq!(placement.shift, 4);
        assert_eq!(placement.workers_involved.len(), 2);
        assert!(os.placement(0).is_none());
        assert_eq!(os.scheduled_count(), 1);
    }

    #[test]
    fn test_labels() {
        assert_eq!(order_label(7), "order_7");
        assert_eq!(worker_label(0), "worker_0");
    }

    #[test]
    fn test_empty_schedules() {
        assert!(WorkerSchedule::new().is_empty());
        assert!(OrderSchedule::new().is_empty());
    }
}
