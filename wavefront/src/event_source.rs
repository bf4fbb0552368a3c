use std::{cell::Ref, rc::Rc};

use wavefront_core::{GraphHandle, NodeId};

use crate::{
	raw::{self, event_node::EventsLike, event_source_node::EventSourceNode},
	Context, Events,
};

/// An externally-fed event stream (`spec.md` §4.7).
pub struct EventSource<E> {
	inner: Rc<EventSourceNode<E>>,
}

impl<E: 'static> EventSource<E> {
	/// Builds an empty input event stream.
	#[must_use]
	pub fn new(context: &Context) -> Self {
		let graph = context.graph().clone();
		let (node, _id) =
			raw::construct(&graph, |id, _self_weak| EventSourceNode::new(graph.clone(), id));
		Self { inner: node }
	}

	/// Appends `value` to this turn's (or, inside a transaction, the next
	/// turn's) batch.
	pub fn emit(&self, value: E) {
		self.inner.emit(value);
	}

	/// A read-only handle to this stream, sharing the same node.
	#[must_use]
	pub fn as_events(&self) -> Events<E> {
		Events::from_rc(Rc::clone(&self.inner) as Rc<dyn EventsLike<E>>)
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

impl<E> Clone for EventSource<E> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<E> PartialEq for EventSource<E> {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}
