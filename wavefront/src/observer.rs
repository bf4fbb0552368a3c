use std::rc::Rc;

use crate::{
	raw::{
		self,
		observer_node::{EventsObserverNode, ObserverAction, SignalObserverNode},
	},
	Events, Signal,
};

// Method names intentionally match the inherent methods on the two node
// types below; inherent methods take priority over trait methods during
// resolution, so these impls delegate rather than recurse.
trait Watching {
	fn detach(&self);
	fn is_attached(&self) -> bool;
}

impl<S> Watching for SignalObserverNode<S> {
	fn detach(&self) {
		self.detach_now();
	}

	fn is_attached(&self) -> bool {
		self.is_attached()
	}
}

impl<E> Watching for EventsObserverNode<E> {
	fn detach(&self) {
		self.detach_now();
	}

	fn is_attached(&self) -> bool {
		self.is_attached()
	}
}

/// A leaf of the reactive graph that runs a callback for its side effects
/// (`spec.md` §4.8), rather than producing a value or stream of its own.
///
/// Dropping an `Observer` (or its last clone) detaches it immediately, the
/// same as calling [`Observer::detach`].
pub struct Observer {
	inner: Rc<dyn Watching>,
}

impl Observer {
	/// Observes a signal. By default the callback only runs on changes
	/// after the observer is created (`skip_current`); pass `notify_current
	/// = true` to also run it once immediately, with the signal's value as
	/// of attach time, outside of the propagation machinery (`spec.md`
	/// §4.8).
	#[must_use]
	pub fn on_signal<S: 'static>(
		subject: &Signal<S>,
		notify_current: bool,
		callback: impl FnMut(&S) -> ObserverAction + 'static,
	) -> Self {
		let graph = subject.graph().clone();
		let subject_rc = subject.as_rc();
		let subject_id = subject.node_id();
		let (node, id) = raw::construct(&graph, |id, self_weak| {
			SignalObserverNode::new(graph.clone(), id, self_weak, subject_rc, Box::new(callback))
		});
		graph.attach_node(id, subject_id);
		if notify_current {
			node.notify_now();
		}
		Self { inner: node }
	}

	/// Observes an event stream: the callback runs once per turn in which
	/// the stream produces at least one value, with the whole batch.
	#[must_use]
	pub fn on_events<E: 'static>(
		subject: &Events<E>,
		callback: impl FnMut(&[E]) -> ObserverAction + 'static,
	) -> Self {
		let graph = subject.graph().clone();
		let subject_rc = subject.as_rc();
		let subject_id = subject.node_id();
		let (node, id) = raw::construct(&graph, |id, self_weak| {
			EventsObserverNode::new(graph.clone(), id, self_weak, subject_rc, Box::new(callback))
		});
		graph.attach_node(id, subject_id);
		Self { inner: node }
	}

	/// Detaches now. The callback will not run again; further calls are a
	/// no-op.
	pub fn detach(&self) {
		self.inner.detach();
	}

	/// Whether this observer is still attached to its subject.
	#[must_use]
	pub fn is_attached(&self) -> bool {
		self.inner.is_attached()
	}
}

impl Clone for Observer {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}
