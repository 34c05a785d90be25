//! Order and relation-pair models.
//!
//! An order is a schedulable job: it yields a profit when completed and
//! requires a fixed crew size. Relation pairs express business rules
//! between two orders (sequencing, separation) or two workers (conflict).
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use serde::{Deserialize, Serialize};

/// A schedulable job with a completion profit and a required crew size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order index, contiguous within the instance (0..N-1).
    pub id: usize,
    /// Profit earned if the order is completed (non-negative).
    pub profit: f64,
    /// Number of workers that must staff the order simultaneously (>= 1).
    pub workers_needed: u32,
}

impl Order {
    /// Creates an order with a crew size of 1.
    pub fn new(id: usize, profit: f64) -> Self {
        Self {
            id,
            profit,
            workers_needed: 1,
        }
    }

    /// Sets the required crew size.
    pub fn with_crew(mut self, workers_needed: u32) -> Self {
        self.workers_needed = workers_needed;
        self
    }
}

/// A directed pair of orders participating in a sequencing rule.
///
/// The meaning depends on which relation table the pair belongs to:
/// sequential (second must run in the very next shift), non-consecutive
/// (the same worker must not do second right after first), or repetitive
/// (no worker may do second right after first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPair {
    /// The earlier order of the pair.
    pub first: usize,
    /// The later order of the pair.
    pub second: usize,
}

impl OrderPair {
    /// Creates an order pair.
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }
}

/// An unordered pair of workers that must never share an order slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPair {
    /// One worker of the pair.
    pub first: usize,
    /// The other worker of the pair.
    pub second: usize,
}

impl WorkerPair {
    /// Creates a worker pair.
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }
}
