use std::{
	cell::RefCell,
	rc::{Rc, Weak},
};

use wavefront_core::{GraphHandle, Node, NodeId, Update};

use super::{event_node::EventsLike, signal_node::SignalLike};

/// What an observer's callback returns, decided after it runs (`spec.md`
/// §4.8): keep observing, or detach from the subject. Detaching this way is
/// deferred to the end of the current turn, after every node has finalized,
/// so it can't perturb the batch still being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverAction {
	/// Keep observing.
	Next,
	/// Detach from the subject at the end of this turn; the callback will
	/// not run again.
	StopAndDetach,
}

/// An observer watching a signal (`spec.md` §4.8).
///
/// Holds a strong reference to its subject for as long as it's attached —
/// which, unlike the weak-back-reference bookkeeping a subject needs when
/// observers only borrow it, means the subject can never be dropped out
/// from under an attached observer in the first place. See `DESIGN.md` for
/// why that makes the subject-side teardown list this mirrors in the
/// original unnecessary here.
pub struct SignalObserverNode<S> {
	graph: GraphHandle,
	id: NodeId,
	self_weak: Weak<SignalObserverNode<S>>,
	subject: RefCell<Option<Rc<dyn SignalLike<S>>>>,
	subject_id: NodeId,
	callback: RefCell<Box<dyn FnMut(&S) -> ObserverAction>>,
}

impl<S> SignalObserverNode<S> {
	/// Builds an observer of `subject`, without attaching it to the graph;
	/// the caller still needs to `graph.attach_node(id, subject.node_id())`.
	pub fn new(
		graph: GraphHandle,
		id: NodeId,
		self_weak: Weak<SignalObserverNode<S>>,
		subject: Rc<dyn SignalLike<S>>,
		callback: Box<dyn FnMut(&S) -> ObserverAction>,
	) -> Self {
		let subject_id = subject.node_id();
		Self {
			graph,
			id,
			self_weak,
			subject: RefCell::new(Some(subject)),
			subject_id,
			callback: RefCell::new(callback),
		}
	}

	/// Runs the callback once with the subject's current value, outside of
	/// the propagation machinery — used to implement "notify at attach
	/// time" without treating the attach itself as a turn (`spec.md` §4.8).
	pub fn notify_now(&self) {
		let Some(subject) = self.subject.borrow().clone() else {
			return;
		};
		let action = (self.callback.borrow_mut())(&subject.current());
		if action == ObserverAction::StopAndDetach {
			self.schedule_detach();
		}
	}

	/// Whether this observer is still attached to a subject.
	pub fn is_attached(&self) -> bool {
		self.subject.borrow().is_some()
	}

	/// Detaches immediately (used by an explicit, user-initiated detach,
	/// rather than one decided inside the callback itself).
	pub fn detach_now(&self) {
		if let Some(subject) = self.subject.borrow_mut().take() {
			self.graph.detach_node(self.id, subject.node_id());
			self.graph.unregister_node(self.id);
		}
	}

	fn schedule_detach(&self) {
		let graph = self.graph.clone();
		let id = self.id;
		let subject_id = self.subject_id;
		let weak_self = self.self_weak.clone();
		graph.defer_detach(Box::new(move || {
			if let Some(this) = weak_self.upgrade() {
				*this.subject.borrow_mut() = None;
			}
			graph.detach_node(id, subject_id);
			graph.unregister_node(id);
		}));
	}
}

impl<S> Node for SignalObserverNode<S> {
	fn update(&self) -> Update {
		let Some(subject) = self.subject.borrow().clone() else {
			return Update::Unchanged;
		};
		let action = (self.callback.borrow_mut())(&subject.current());
		if action == ObserverAction::StopAndDetach {
			self.schedule_detach();
		}
		Update::Unchanged
	}
}

impl<S> Drop for SignalObserverNode<S> {
	fn drop(&mut self) {
		if let Some(subject) = self.subject.get_mut().take() {
			self.graph.detach_node(self.id, subject.node_id());
			self.graph.unregister_node(self.id);
		}
	}
}

/// An observer watching an event stream (`spec.md` §4.8): the callback sees
/// this turn's whole batch as a slice, once per turn in which it's
/// non-empty.
pub struct EventsObserverNode<E> {
	graph: GraphHandle,
	id: NodeId,
	self_weak: Weak<EventsObserverNode<E>>,
	subject: RefCell<Option<Rc<dyn EventsLike<E>>>>,
	subject_id: NodeId,
	callback: RefCell<Box<dyn FnMut(&[E]) -> ObserverAction>>,
}

impl<E> EventsObserverNode<E> {
	/// Builds an observer of `subject`, without attaching it to the graph.
	pub fn new(
		graph: GraphHandle,
		id: NodeId,
		self_weak: Weak<EventsObserverNode<E>>,
		subject: Rc<dyn EventsLike<E>>,
		callback: Box<dyn FnMut(&[E]) -> ObserverAction>,
	) -> Self {
		let subject_id = subject.node_id();
		Self {
			graph,
			id,
			self_weak,
			subject: RefCell::new(Some(subject)),
			subject_id,
			callback: RefCell::new(callback),
		}
	}

	/// Whether this observer is still attached to a subject.
	pub fn is_attached(&self) -> bool {
		self.subject.borrow().is_some()
	}

	/// Detaches immediately, outside of a callback's return value.
	pub fn detach_now(&self) {
		if let Some(subject) = self.subject.borrow_mut().take() {
			self.graph.detach_node(self.id, subject.node_id());
			self.graph.unregister_node(self.id);
		}
	}

	fn schedule_detach(&self) {
		let graph = self.graph.clone();
		let id = self.id;
		let subject_id = self.subject_id;
		let weak_self = self.self_weak.clone();
		graph.defer_detach(Box::new(move || {
			if let Some(this) = weak_self.upgrade() {
				*this.subject.borrow_mut() = None;
			}
			graph.detach_node(id, subject_id);
			graph.unregister_node(id);
		}));
	}
}

impl<E> Node for EventsObserverNode<E> {
	fn update(&self) -> Update {
		let Some(subject) = self.subject.borrow().clone() else {
			return Update::Unchanged;
		};
		let batch = subject.current();
		if batch.is_empty() {
			return Update::Unchanged;
		}
		let action = (self.callback.borrow_mut())(&batch);
		drop(batch);
		if action == ObserverAction::StopAndDetach {
			self.schedule_detach();
		}
		Update::Unchanged
	}
}

impl<E> Drop for EventsObserverNode<E> {
	fn drop(&mut self) {
		if let Some(subject) = self.subject.get_mut().take() {
			self.graph.detach_node(self.id, subject.node_id());
			self.graph.unregister_node(self.id);
		}
	}
}
