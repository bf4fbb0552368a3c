use std::{cell::Ref, rc::Rc};

use wavefront::{
	raw::{self, signal_node::SignalLike},
	Context, Signal,
};
use wavefront_core::{Calm, GraphHandle, Node, NodeId, Update};

/// A signal of signals, flattened to follow whichever inner signal the
/// outer one currently points at ("switch"): `spec.md`'s dynamic
/// re-subscription scenario. When the outer signal picks a new inner
/// signal, this node detaches from the old one and attaches to the new one
/// before its own level is known to be correct relative to it — the graph
/// defers that level bump and re-runs this node (reporting [`Update::Shifted`])
/// once it's settled, exactly the case `GraphHandle::attach_node` documents.
struct FlattenNode<S> {
	graph: GraphHandle,
	id: NodeId,
	outer: Rc<dyn SignalLike<Signal<S>>>,
	inner: std::cell::RefCell<Rc<dyn SignalLike<S>>>,
	value: std::cell::RefCell<S>,
}

impl<S: Calm + Clone> Node for FlattenNode<S> {
	fn update(&self) -> Update {
		let outer_value = self.outer.current();
		let new_inner_id = outer_value.node_id();
		let old_inner_id = self.inner.borrow().node_id();
		if new_inner_id != old_inner_id {
			let new_inner = outer_value.as_rc();
			drop(outer_value);
			self.graph.detach_node(self.id, old_inner_id);
			self.graph.attach_node(self.id, new_inner_id);
			*self.inner.borrow_mut() = new_inner;
			return Update::Shifted;
		}
		drop(outer_value);
		let candidate = self.inner.borrow().current().clone();
		let mut value = self.value.borrow_mut();
		if Calm::calm(&value, &candidate) {
			Update::Unchanged
		} else {
			*value = candidate;
			Update::Changed
		}
	}
}

impl<S> Drop for FlattenNode<S> {
	fn drop(&mut self) {
		self.graph.detach_node(self.id, self.outer.node_id());
		self.graph.detach_node(self.id, self.inner.borrow().node_id());
		self.graph.unregister_node(self.id);
	}
}

impl<S> SignalLike<S> for FlattenNode<S> {
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

/// See [`flatten`] (module docs).
pub fn flatten<S>(context: &Context, outer: &Signal<Signal<S>>) -> Signal<S>
where
	S: Calm + Clone + 'static,
{
	let graph = context.graph().clone();
	let outer_rc = outer.as_rc();
	let outer_id = outer.node_id();
	let initial_inner = outer.get();
	let initial_inner_id = initial_inner.node_id();
	let initial_value = initial_inner.get();
	let initial_inner_rc = initial_inner.as_rc();
	let (node, id) = raw::construct(&graph, |id, _self_weak| FlattenNode {
		graph: graph.clone(),
		id,
		outer: outer_rc,
		inner: std::cell::RefCell::new(initial_inner_rc),
		value: std::cell::RefCell::new(initial_value),
	});
	graph.attach_node(id, outer_id);
	graph.attach_node(id, initial_inner_id);
	Signal::from_rc(node)
}
