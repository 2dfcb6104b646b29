//! Automated completion of a remote "earn tasks" catalog.
//!
//! The crate walks a nested catalog of task groupings, decides for every task
//! what the service still needs (nothing, a claim, or a start followed by a
//! claim), performs it, and reports each task's fate. The architecture keeps
//! a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (classification, traversal order,
//!   catalog checks, report aggregation). No I/O.
//! - **[`io`]**: Side-effecting adapters (HTTP gateways, session, config).
//!   Hidden behind traits so tests can script the remote service.
//!
//! Orchestration modules ([`execute`], [`run`], [`farm`], [`game`]) coordinate
//! core logic with I/O to implement CLI commands.

pub mod catalog;
pub mod core;
pub mod execute;
pub mod exit_codes;
pub mod farm;
pub mod game;
pub mod io;
pub mod logging;
pub mod render;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
