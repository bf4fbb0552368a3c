#![warn(clippy::pedantic)]
#![warn(missing_docs)]
//! wavefront-core is the propagation engine backing wavefront.
//!
//! This crate owns the reactive graph representation and the level-based
//! topological scheduler: a dense slot map of node metadata, a queue that
//! yields nodes one topological level at a time, and the single-threaded
//! turn-by-turn propagation algorithm that drives them. It has no opinion on
//! ergonomics — the `wavefront` crate builds the user-facing handle types on
//! top of the [`Node`] contract defined here.
//!
//! # Threading notes
//!
//! A [`Graph`] is confined to the thread that created it: nothing in this
//! crate takes a lock, and [`GraphHandle`] is neither [`Send`] nor [`Sync`].

pub mod calm;
pub mod graph;
pub mod node;
pub mod slot_map;
pub mod topo_queue;

pub use calm::{AlwaysChanged, Calm};
pub use graph::{Graph, GraphHandle};
pub use node::{Node, Update};
pub use slot_map::{NodeId, SlotMap};
pub use topo_queue::TopoQueue;
