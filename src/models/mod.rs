//! Workforce-scheduling domain models.
//!
//! Provides the core data types for representing problem instances
//! and decoded solutions. The instance side is immutable input; the
//! schedule side is produced by decoding a solved model.
//!
//! # Domain Mappings
//!
//! | u-workforce | Field Service | Healthcare | Logistics |
//! |-------------|---------------|------------|-----------|
//! | Order | Service Call | Procedure | Delivery |
//! | Worker | Technician | Nurse | Driver |
//! | Slot | Day x Shift | Shift Block | Route Window |

mod instance;
mod order;
mod schedule;

pub use instance::{Instance, DEFAULT_DAYS, DEFAULT_SHIFTS};
pub use order::{Order, OrderPair, WorkerPair};
pub use schedule::{
    order_label, worker_label, OrderPlacement, OrderSchedule, SlotRef, WorkerAgenda,
    WorkerSchedule,
};
