//! Node-construction primitives (`spec.md` §4.4-§4.8).
//!
//! Everything here implements [`wavefront_core::Node`] directly and is
//! public so that other crates — `wavefront-ops` among them — can build
//! their own adaptors against the same contract the built-in signal/event/
//! observer node types use, rather than needing privileged access to this
//! crate's internals.

/// Derived event-stream node and the [`event_node::EventsLike`] contract.
pub mod event_node;
/// Externally-fed event-stream node.
pub mod event_source_node;
/// Observer node kinds and [`observer_node::ObserverAction`].
pub mod observer_node;
/// Derived signal node and the [`signal_node::SignalLike`] contract.
pub mod signal_node;
/// Externally-writable signal node.
pub mod var_node;

use std::rc::{Rc, Weak};

use wavefront_core::{GraphHandle, Node, NodeId};

pub use event_node::EventsLike;
pub use signal_node::SignalLike;

/// Registers a fresh node and returns it together with its id, wiring the
/// node up via `Rc::new_cyclic` so it can capture a [`Weak`] reference to
/// itself during construction (`spec.md` §4.4: "Construct a derived node
/// type by passing (context, predecessors…, user-config) to the node
/// base.").
///
/// A self-weak-reference is only needed by node kinds that must schedule
/// work against themselves later (an observer's deferred self-detach, a
/// flatten node's deferred re-level); `build` is free to ignore the second
/// argument otherwise.
pub fn construct<N: Node + 'static>(
	graph: &GraphHandle,
	build: impl FnOnce(NodeId, Weak<N>) -> N,
) -> (Rc<N>, NodeId) {
	let mut id_slot = None;
	let node = Rc::new_cyclic(|weak: &Weak<N>| {
		let id = graph.register_node(weak.clone());
		id_slot = Some(id);
		build(id, weak.clone())
	});
	(
		node,
		id_slot.expect("Rc::new_cyclic always invokes its closure"),
	)
}
