use std::cell::{Ref, RefCell};

use wavefront_core::{Calm, GraphHandle, Node, NodeId, Update};

/// What a [`crate::Signal`] handle needs from whatever node backs it: an
/// identity in the graph and a way to read the current value (`spec.md`
/// §4.5). Implemented by [`SignalNode`] and [`crate::raw::var_node::VarNode`]
/// here, and by any adaptor in `wavefront-ops` that wants to hand its output
/// back as a `Signal<S>`.
pub trait SignalLike<S> {
	/// This node's identity in its graph.
	fn node_id(&self) -> NodeId;
	/// The graph this node belongs to.
	fn graph(&self) -> &GraphHandle;
	/// The value as of the end of the last turn that changed it.
	fn current(&self) -> Ref<'_, S>;
}

/// A signal whose value is recomputed from predecessors (`spec.md` §4.5):
/// `update()` recomputes, compares against the stored value with [`Calm`],
/// and reports [`Update::Changed`] only if they differ.
pub struct SignalNode<S, F> {
	graph: GraphHandle,
	id: NodeId,
	value: RefCell<S>,
	compute: F,
	predecessors: Vec<NodeId>,
}

impl<S, F> SignalNode<S, F>
where
	F: Fn() -> S,
{
	/// Builds a node that computes its initial value immediately, the same
	/// way every later recomputation will. `predecessors` must match whatever
	/// the caller goes on to attach this node to, so [`Drop`] can detach from
	/// all of them in turn.
	pub fn new(graph: GraphHandle, id: NodeId, compute: F, predecessors: Vec<NodeId>) -> Self {
		let initial = compute();
		Self {
			graph,
			id,
			value: RefCell::new(initial),
			compute,
			predecessors,
		}
	}
}

impl<S, F> Drop for SignalNode<S, F> {
	fn drop(&mut self) {
		for &predecessor in &self.predecessors {
			self.graph.detach_node(self.id, predecessor);
		}
		self.graph.unregister_node(self.id);
	}
}

impl<S: Calm, F: Fn() -> S> Node for SignalNode<S, F> {
	fn update(&self) -> Update {
		let candidate = (self.compute)();
		let mut value = self.value.borrow_mut();
		if Calm::calm(&value, &candidate) {
			Update::Unchanged
		} else {
			*value = candidate;
			Update::Changed
		}
	}
}

impl<S, F> SignalLike<S> for SignalNode<S, F> {
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
