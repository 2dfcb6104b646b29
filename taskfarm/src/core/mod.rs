//! Deterministic, pure logic shared by the task engine.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! catalogs and return deterministic outputs suitable for tests.

pub mod classifier;
pub mod invariants;
pub mod report;
pub mod types;
pub mod walk;
