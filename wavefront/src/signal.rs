use std::rc::Rc;

use wavefront_core::{Calm, GraphHandle, NodeId};

use crate::{
	raw::{self, signal_node::SignalLike, signal_node::SignalNode},
	Context,
};

/// A read-only reactive value (`spec.md` §4.5): either computed from other
/// signals ([`Signal::derive`]) or writable at the edges
/// ([`crate::VarSignal`], which derefs to a `Signal`).
pub struct Signal<S> {
	inner: Rc<dyn SignalLike<S>>,
}

impl<S> Signal<S> {
	/// Wraps any [`SignalLike`] implementor — including a custom node type
	/// from outside this crate — as a `Signal` handle.
	#[must_use]
	pub fn from_rc(inner: Rc<dyn SignalLike<S>>) -> Self {
		Self { inner }
	}

	/// Clones out the underlying node reference, for building custom
	/// adaptors (like `wavefront-ops` does) that depend on this signal
	/// without privileged access to this crate.
	#[must_use]
	pub fn as_rc(&self) -> Rc<dyn SignalLike<S>> {
		Rc::clone(&self.inner)
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

impl<S: Calm + 'static> Signal<S> {
	/// Builds a signal that recomputes `compute` whenever any of
	/// `predecessors` changes, calmed by [`Calm`] against the previous value
	/// (`spec.md` §4.5).
	#[must_use]
	pub fn derive(
		context: &Context,
		predecessors: &[NodeId],
		compute: impl Fn() -> S + 'static,
	) -> Self {
		let graph = context.graph().clone();
		let predecessors_vec = predecessors.to_vec();
		let (node, id) = raw::construct(&graph, |id, _self_weak| {
			SignalNode::new(graph.clone(), id, compute, predecessors_vec)
		});
		for &predecessor in predecessors {
			graph.attach_node(id, predecessor);
		}
		Self { inner: node }
	}
}

impl<S> Clone for Signal<S> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<S> PartialEq for Signal<S> {
	fn eq(&self, other: &Self) -> bool {
		self.node_id() == other.node_id() && self.graph().ptr_eq(other.graph())
	}
}
