//! Domain types and storage-agnostic query engine for job execution logs.
//!
//! This crate has no database dependency: it defines the [`store::LogStore`]
//! capability, the in-process [`memory::MemoryLogStore`] backend and the
//! [`service::QueryService`] that callers talk to. The relational backend
//! lives in `jobwatch-db`.

pub mod error;
pub mod memory;
pub mod monitor;
pub mod page;
pub mod query;
pub mod record;
pub mod service;
pub mod store;
pub mod types;
