use std::cell::{Ref, RefCell};

use wavefront_core::{GraphHandle, Node, NodeId, Update};

/// What an [`crate::Events`] handle needs from whatever node backs it
/// (`spec.md` §4.7): an identity in the graph and read access to this turn's
/// batch of values.
pub trait EventsLike<E> {
	/// This node's identity in its graph.
	fn node_id(&self) -> NodeId;
	/// The graph this node belongs to.
	fn graph(&self) -> &GraphHandle;
	/// This turn's batch, valid for the turn in which it was produced; empty
	/// before the first turn and after `finalize` runs.
	fn current(&self) -> Ref<'_, [E]>;
}

/// A derived event stream (`spec.md` §4.7): `derive` appends zero or more
/// values into the shared buffer (reading whatever predecessor streams it
/// closed over), and the node reports [`Update::Changed`] iff the buffer is
/// non-empty afterwards. The buffer is cleared in `finalize`, which only
/// runs on nodes that reported `Changed`, so it's already empty the next
/// time `update` runs.
pub struct EventNode<E, F> {
	graph: GraphHandle,
	id: NodeId,
	events: RefCell<Vec<E>>,
	derive: F,
	predecessors: Vec<NodeId>,
}

impl<E, F> EventNode<E, F>
where
	F: Fn(&RefCell<Vec<E>>),
{
	/// Builds a derived event node around `derive`. `predecessors` must match
	/// whatever the caller goes on to attach this node to, so [`Drop`] can
	/// detach from all of them in turn.
	pub fn new(graph: GraphHandle, id: NodeId, derive: F, predecessors: Vec<NodeId>) -> Self {
		Self {
			graph,
			id,
			events: RefCell::new(Vec::new()),
			derive,
			predecessors,
		}
	}
}

impl<E, F> Drop for EventNode<E, F> {
	fn drop(&mut self) {
		for &predecessor in &self.predecessors {
			self.graph.detach_node(self.id, predecessor);
		}
		self.graph.unregister_node(self.id);
	}
}

impl<E, F: Fn(&RefCell<Vec<E>>)> Node for EventNode<E, F> {
	fn update(&self) -> Update {
		(self.derive)(&self.events);
		if self.events.borrow().is_empty() {
			Update::Unchanged
		} else {
			Update::Changed
		}
	}

	fn finalize(&self) {
		self.events.borrow_mut().clear();
	}
}

impl<E, F> EventsLike<E> for EventNode<E, F> {
	fn node_id(&self) -> NodeId {
		self.id
	}

	fn graph(&self) -> &GraphHandle {
		&self.graph
	}

	fn current(&self) -> Ref<'_, [E]> {
		Ref::map(self.events.borrow(), Vec::as_slice)
	}
}
