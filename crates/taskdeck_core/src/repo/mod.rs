//! Key-value persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the backend contract (`KvRepository`) for string values.
//! - Provide the write-through adapter (`WriteThroughStore`) the task store
//!   persists through.
//!
//! # Invariants
//! - Writes replace the whole value stored under a key.
//! - Adapter writes never block the caller on backend I/O.

pub mod kv_repo;
pub mod write_through;
