use std::cell::{Cell, Ref, RefCell};

use wavefront_core::{Calm, GraphHandle, Node, NodeId, Update};

use super::signal_node::SignalLike;

/// An externally-writable signal (`spec.md` §4.6). `set` replaces the
/// pending value outright; `modify` mutates in place, either the pending
/// value if one is already queued this turn or the live value otherwise.
/// Both route through [`GraphHandle::push_input`] so a turn runs (or the
/// input is recorded for the next one, inside a transaction).
pub struct VarNode<S> {
	graph: GraphHandle,
	id: NodeId,
	value: RefCell<S>,
	pending: RefCell<Option<S>>,
	input_modified: Cell<bool>,
}

impl<S> VarNode<S> {
	/// Builds a var node holding `initial`.
	pub fn new(graph: GraphHandle, id: NodeId, initial: S) -> Self {
		Self {
			graph,
			id,
			value: RefCell::new(initial),
			pending: RefCell::new(None),
			input_modified: Cell::new(false),
		}
	}

	/// Queues `new_value` to replace the current value next turn.
	pub fn set(&self, new_value: S) {
		*self.pending.borrow_mut() = Some(new_value);
		self.input_modified.set(false);
		self.graph.push_input(self.id);
	}

	/// Applies `mutator` to the pending value if one is queued, or to the
	/// live value otherwise.
	pub fn modify(&self, mutator: impl FnOnce(&mut S)) {
		{
			let mut pending = self.pending.borrow_mut();
			if let Some(value) = pending.as_mut() {
				mutator(value);
			} else {
				drop(pending);
				mutator(&mut self.value.borrow_mut());
				self.input_modified.set(true);
			}
		}
		self.graph.push_input(self.id);
	}
}

impl<S: Calm> Node for VarNode<S> {
	fn update(&self) -> Update {
		let mut pending = self.pending.borrow_mut();
		if let Some(new_value) = pending.take() {
			let mut value = self.value.borrow_mut();
			if Calm::calm(&value, &new_value) {
				Update::Unchanged
			} else {
				*value = new_value;
				Update::Changed
			}
		} else if self.input_modified.replace(false) {
			Update::Changed
		} else {
			Update::Unchanged
		}
	}
}

impl<S> Drop for VarNode<S> {
	fn drop(&mut self) {
		self.graph.unregister_node(self.id);
	}
}

impl<S> SignalLike<S> for VarNode<S> {
	fn node_id(&self) -> NodeId {
		self.id
	}

	fn graph(&self) -> &GraphHandle {
		&self.graph
	}

	fn current(&self) -> Ref<'_, S> {
		self.value.borrow()
	}
}
