//! Problem instance model.
//!
//! An `Instance` is the immutable in-memory representation of one
//! workforce-scheduling problem: the planning horizon (days x shifts),
//! the orders to fulfill, the pool of interchangeable workers, and the
//! relation tables carrying sequencing and conflict rules.
//!
//! Construction is builder-style; after that the instance is read-only.
//! Structural integrity (index ranges, crew sizes, horizon bounds) is
//! checked by [`crate::validation::validate_instance`] before any model
//! is built from it.

use serde::{Deserialize, Serialize};

use super::{Order, OrderPair, WorkerPair};

/// Default planning horizon: 6 days of 5 shifts each.
pub const DEFAULT_DAYS: usize = 6;
/// Default number of shifts per day.
pub const DEFAULT_SHIFTS: usize = 5;

/// An immutable workforce-scheduling problem instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// Orders to fulfill, ids contiguous 0..N-1.
    pub orders: Vec<Order>,
    /// Number of interchangeable worker slots, indexed 0..W-1.
    pub workers: usize,
    /// Days in the planning horizon.
    pub days: usize,
    /// Shifts per day.
    pub shifts: usize,
    /// (a, b): order b must run in the very next shift after a, staffed by
    /// any crew, with flow tied proportionally to crew sizes.
    pub sequential_pairs: Vec<OrderPair>,
    /// (a, b): a worker doing a in shift k must not do b in shift k+1.
    pub non_consecutive_pairs: Vec<OrderPair>,
    /// (a, b): back-to-back repetition rule, same row shape as
    /// `non_consecutive_pairs` but a distinct business rule and table.
    pub repetitive_pairs: Vec<OrderPair>,
    /// Workers that must never share an order/day/shift.
    pub conflicting_workers: Vec<WorkerPair>,
}

impl Instance {
    /// Creates an instance over the default 6x5 horizon with no relation
    /// pairs.
    pub fn new(orders: Vec<Order>, workers: usize) -> Self {
        Self {
            orders,
            workers,
            days: DEFAULT_DAYS,
            shifts: DEFAULT_SHIFTS,
            sequential_pairs: Vec::new(),
            non_consecutive_pairs: Vec::new(),
            repetitive_pairs: Vec::new(),
            conflicting_workers: Vec::new(),
        }
    }

    /// Sets the planning horizon.
    pub fn with_horizon(mut self, days: usize, shifts: usize) -> Self {
        self.days = days;
        self.shifts = shifts;
        self
    }

    /// Sets the sequential-order pairs.
    pub fn with_sequential_pairs(mut self, pairs: Vec<OrderPair>) -> Self {
        self.sequential_pairs = pairs;
        self
    }

    /// Sets the non-consecutive-order pairs.
    pub fn with_non_consecutive_pairs(mut self, pairs: Vec<OrderPair>) -> Self {
        self.non_consecutive_pairs = pairs;
        self
    }

    /// Sets the repetitive-order pairs.
    pub fn with_repetitive_pairs(mut self, pairs: Vec<OrderPair>) -> Self {
        self.repetitive_pairs = pairs;
        self
    }

    /// Sets the conflicting-worker pairs.
    pub fn with_conflicting_workers(mut self, pairs: Vec<WorkerPair>) -> Self {
        self.conflicting_workers = pairs;
        self
    }

    /// Number of orders.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of (day, shift) slots in the horizon.
    pub fn slot_count(&self) -> usize {
        self.days * self.shifts
    }

    /// Required crew size of an order.
    pub fn workers_needed(&self, order: usize) -> u32 {
        self.orders[order].workers_needed
    }

    /// Total profit available if every order were completed.
    pub fn total_profit(&self) -> f64 {
        self.orders.iter().map(|o| o.profit).sum()
    }
}
