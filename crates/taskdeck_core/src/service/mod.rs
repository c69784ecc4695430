//! Core use-case services.
//!
//! # Responsibility
//! - Own the task/category collections and their persistence (`TaskStore`).
//! - Hold UI view state and derive visible tasks (`TaskView`).
//! - Keep FFI/CLI front ends decoupled from storage details.

pub mod task_store;
pub mod task_view;
