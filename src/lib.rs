//! Workforce shift scheduling via mixed-integer programming.
//!
//! Formulates a days-x-shifts workforce-scheduling problem as an integer
//! program, submits it to a MILP engine, and decodes the solved variable
//! vector back into per-worker and per-order schedules. Orders yield a
//! profit and require a crew; workers are interchangeable but bound by
//! fairness, rest, sequencing, and conflict rules; wages follow a
//! piecewise step-rate schedule linearized with indicator variables.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Instance`, `Order`, relation pairs,
//!   and the decoded `WorkerSchedule`/`OrderSchedule`
//! - **`validation`**: Input integrity checks (index ranges, crew sizes,
//!   horizon bounds)
//! - **`mip`**: Variable factory, constraint families, wage ladder, and
//!   the LP-format export
//! - **`solver`**: Submission to the branch-and-bound MILP engine
//! - **`decode`**: Tolerance-based reconstruction of schedules from the
//!   solved value vector
//! - **`io`**: Instance file format, loading, and random generation
//!
//! # Architecture
//!
//! Data flows strictly forward: `Instance` → `VariableIndex` →
//! constraint rows → `MipModel` → solve → decoded schedules. Every stage
//! is built once by a single owner and read-only afterwards; the only
//! long-running call is the solve itself.
//!
//! # References
//!
//! - Wolsey (2020), "Integer Programming"
//! - Williams (2013), "Model Building in Mathematical Programming"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod decode;
pub mod io;
pub mod mip;
pub mod models;
pub mod solver;
pub mod validation;
