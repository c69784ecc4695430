//! Domain model for tasks, categories and filtered views.
//!
//! # Responsibility
//! - Define canonical data structures used by the task store.
//! - Keep category normalization and view filtering as pure functions.
//!
//! # Invariants
//! - Every task is identified by a stable, non-empty `TaskId`.
//! - `completed` is the only task field that changes after creation.

pub mod category;
pub mod filter;
pub mod task;
