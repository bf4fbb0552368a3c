use std::rc::Rc;

use wavefront_core::{Calm, GraphHandle, NodeId};

use crate::{
	raw::{self, signal_node::SignalLike, var_node::VarNode},
	Context, Signal,
};

/// A signal that can also be written to directly (`spec.md` §4.6).
pub struct VarSignal<S> {
	inner: Rc<VarNode<S>>,
}

impl<S: Calm + 'static> VarSignal<S> {
	/// Builds a var signal holding `initial`.
	#[must_use]
	pub fn new(context: &Context, initial: S) -> Self {
		let graph = context.graph().clone();
		let (node, _id) =
			raw::construct(&graph, |id, _self_weak| VarNode::new(graph.clone(), id, initial));
		Self { inner: node }
	}

	/// Queues `new_value` to replace the current value next turn.
	pub fn set(&self, new_value: S) {
		self.inner.set(new_value);
	}

	/// Applies `mutator` to the pending (or, if none is queued, the live)
	/// value.
	pub fn modify(&self, mutator: impl FnOnce(&mut S)) {
		self.inner.modify(mutator);
	}

	/// A read-only handle to this var signal, sharing the same node.
	#[must_use]
	pub fn as_signal(&self) -> Signal<S> {
		Signal::from_rc(Rc::clone(&self.inner) as Rc<dyn SignalLike<S>>)
	}

	/// This signal's identity in its graph.
	#[must_use]
	pub fn node_id(&self) -> NodeId {
		self.inner.node_id()
	}

	/// The graph this signal belongs to.
	#[must_use]
	pub fn graph(&self) -> &GraphHandle {
		self.inner.graph()
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> S
	where
		S: Clone,
	{
		self.inner.current().clone()
	}

	/// Runs `f` against the current value without cloning it.
	pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
		f(&self.inner.current())
	}
}

impl<S> Clone for VarSignal<S> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<S> PartialEq for VarSignal<S> {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}
