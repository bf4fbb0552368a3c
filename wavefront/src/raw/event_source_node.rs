use std::cell::{Ref, RefCell};

use wavefront_core::{GraphHandle, Node, NodeId, Update};

use super::event_node::EventsLike;

/// An externally-fed event stream (`spec.md` §4.7). `emit` appends a value
/// and pushes this node as an input; `update` simply reports whether this
/// turn's buffer is non-empty.
pub struct EventSourceNode<E> {
	graph: GraphHandle,
	id: NodeId,
	events: RefCell<Vec<E>>,
}

impl<E> EventSourceNode<E> {
	/// Builds an empty input event node.
	pub fn new(graph: GraphHandle, id: NodeId) -> Self {
		Self {
			graph,
			id,
			events: RefCell::new(Vec::new()),
		}
	}

	/// Appends `value` to this turn's (or, inside a transaction, the next
	/// turn's) batch and records this node as a pending input.
	pub fn emit(&self, value: E) {
		self.events.borrow_mut().push(value);
		self.graph.push_input(self.id);
	}
}

impl<E> Node for EventSourceNode<E> {
	fn update(&self) -> Update {
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

impl<E> Drop for EventSourceNode<E> {
	fn drop(&mut self) {
		self.graph.unregister_node(self.id);
	}
}

impl<E> EventsLike<E> for EventSourceNode<E> {
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
