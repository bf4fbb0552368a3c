#![warn(clippy::pedantic)]
#![warn(missing_docs)]
//! wavefront is a single-threaded functional-reactive-programming runtime:
//! signals, event streams, and observers wired together over the
//! level-scheduled propagation graph implemented by `wavefront-core`.
//!
//! A [`Context`] owns one such graph. Reading or writing the handle types
//! below (`Signal`, `VarSignal`, `Events`, `EventSource`, `Observer`) drives
//! the graph underneath; [`Context::transaction`] batches a run of writes
//! into a single propagation turn.
//!
//! The [`raw`] module exposes the node-construction primitives that back
//! these handles, for crates (like `wavefront-ops`) building their own
//! adaptors on top of the same [`wavefront_core::Node`] contract.

mod context;
mod event_source;
mod events;
pub mod raw;
mod signal;
mod transaction;
mod var_signal;

pub use context::{default_context, Context};
pub use event_source::EventSource;
pub use events::Events;
pub use raw::observer_node::ObserverAction;
pub use signal::Signal;
pub use transaction::Transaction;
pub use var_signal::VarSignal;

mod observer;
pub use observer::Observer;
