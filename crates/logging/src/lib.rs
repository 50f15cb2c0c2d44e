#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` defines the immutable operation record emitted by the mirror
//! engine ([`SyncEvent`]) and the dual sink that persists it ([`EventLog`]).
//! Each completed (or failed) filesystem operation is rendered once as a
//! timestamped human-readable line and appended to two destinations: an
//! append-only durable log file and a console stream.
//!
//! Diagnostic output — per-directory name sets, computed diff sets, pass
//! summaries — does not go through this crate. It is emitted with `tracing`
//! macros at the call sites and reaches the console only, never the durable
//! file.
//!
//! # Invariants
//!
//! - A [`SyncEvent`] is created at the moment an operation completes and is
//!   never mutated afterwards.
//! - The same rendered line is written to both sinks.
//! - A sink write failure never panics and never aborts a synchronization
//!   pass; it is reported as a `tracing` warning and the pass continues.

mod event;
mod sink;
mod timestamp;

pub use event::{OpKind, Outcome, SyncEvent};
pub use sink::EventLog;
