use std::{
	cell::{Ref, RefCell},
	rc::Rc,
};

use wavefront::{
	raw::{self, event_node::EventsLike, signal_node::SignalLike},
	Context, Events, Signal,
};
use wavefront_core::{Calm, GraphHandle, Node, NodeId, Update};

/// Accumulates an event stream into a signal: `f` folds each value in a
/// turn's batch into the running total, and the resulting signal changes
/// whenever that total does (per [`Calm`]), mirroring `ureact`'s
/// `fold`-then-observe idiom.
struct FoldNode<E, S, F> {
	graph: GraphHandle,
	id: NodeId,
	source: Rc<dyn EventsLike<E>>,
	value: RefCell<S>,
	fold: RefCell<F>,
}

impl<E, S, F> Node for FoldNode<E, S, F>
where
	S: Calm + Clone,
	F: FnMut(S, &E) -> S,
{
	fn update(&self) -> Update {
		let batch = self.source.current();
		if batch.is_empty() {
			return Update::Unchanged;
		}
		let mut value = self.value.borrow_mut();
		let mut fold = self.fold.borrow_mut();
		let mut acc = value.clone();
		for item in batch.iter() {
			acc = (fold)(acc, item);
		}
		drop(batch);
		if Calm::calm(&*value, &acc) {
			Update::Unchanged
		} else {
			*value = acc;
			Update::Changed
		}
	}
}

impl<E, S, F> Drop for FoldNode<E, S, F> {
	fn drop(&mut self) {
		self.graph.detach_node(self.id, self.source.node_id());
		self.graph.unregister_node(self.id);
	}
}

impl<E, S, F> SignalLike<S> for FoldNode<E, S, F> {
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

/// See [`fold`] (module docs).
pub fn fold<E, S, F>(context: &Context, source: &Events<E>, initial: S, f: F) -> Signal<S>
where
	E: 'static,
	S: Calm + Clone + 'static,
	F: FnMut(S, &E) -> S + 'static,
{
	let graph = context.graph().clone();
	let source_rc = source.as_rc();
	let source_id = source.node_id();
	let (node, id) = raw::construct(&graph, |id, _self_weak| FoldNode {
		graph: graph.clone(),
		id,
		source: source_rc,
		value: RefCell::new(initial),
		fold: RefCell::new(f),
	});
	graph.attach_node(id, source_id);
	Signal::from_rc(node)
}
