use std::{cell::Ref, rc::Rc};

use wavefront_core::{GraphHandle, NodeId};

use crate::{
	raw::{
		self,
		event_node::{EventNode, EventsLike},
	},
	Context,
};

/// A discrete event stream (`spec.md` §4.7): zero or more values per turn,
/// visible only during the turn that produced them and cleared afterwards.
pub struct Events<E> {
	inner: Rc<dyn EventsLike<E>>,
}

impl<E> Events<E> {
	/// Wraps any [`EventsLike`] implementor as an `Events` handle.
	#[must_use]
	pub fn from_rc(inner: Rc<dyn EventsLike<E>>) -> Self {
		Self { inner }
	}

	/// Clones out the underlying node reference, for building custom
	/// adaptors that depend on this stream without privileged access to
	/// this crate.
	#[must_use]
	pub fn as_rc(&self) -> Rc<dyn EventsLike<E>> {
		Rc::clone(&self.inner)
	}

	/// This stream's identity in its graph.
	#[must_use]
	pub fn node_id(&self) -> NodeId {
		self.inner.node_id()
	}

	/// The graph this stream belongs to.
	#[must_use]
	pub fn graph(&self) -> &GraphHandle {
		self.inner.graph()
	}

	/// This turn's batch, empty outside the turn that produced it.
	#[must_use]
	pub fn current(&self) -> Ref<'_, [E]> {
		self.inner.current()
	}
}

impl<E: 'static> Events<E> {
	/// Builds a derived event stream: `derive` appends into the shared
	/// buffer, reading whatever predecessor streams it closed over, and the
	/// node reports changed iff the buffer ends up non-empty (`spec.md`
	/// §4.7).
	#[must_use]
	pub fn derive(
		context: &Context,
		predecessors: &[NodeId],
		derive: impl Fn(&std::cell::RefCell<Vec<E>>) + 'static,
	) -> Self {
		let graph = context.graph().clone();
		let predecessors_vec = predecessors.to_vec();
		let (node, id) = raw::construct(&graph, |id, _self_weak| {
			EventNode::new(graph.clone(), id, derive, predecessors_vec)
		});
		for &predecessor in predecessors {
			graph.attach_node(id, predecessor);
		}
		Self { inner: node }
	}
}

impl<E> Clone for Events<E> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<E> PartialEq for Events<E> {
	fn eq(&self, other: &Self) -> bool {
		self.node_id() == other.node_id() && self.graph().ptr_eq(other.graph())
	}
}
