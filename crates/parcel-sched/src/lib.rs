//! `parcel-sched` — the wake-time priority queue.
//!
//! # Crate layout
//!
//! | Module   | Contents                                          |
//! |----------|---------------------------------------------------|
//! | [`heap`] | `WakeHeap<T>`, the `Wake` trait                   |
//!
//! One `WakeHeap` per worker; never shared.  The heap decides *which*
//! tracker runs next within a worker's partition — the worker loop decides
//! what to do with it.

pub mod heap;


pub use heap::{Wake, WakeHeap};
