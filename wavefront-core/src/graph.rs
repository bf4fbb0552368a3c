//! The graph: slot map + topological queue + transaction bookkeeping
//! (`spec.md` §4.3).

use std::{
	cell::RefCell,
	rc::{Rc, Weak},
};

use crate::{
	node::{Node, Update},
	slot_map::{NodeId, SlotMap},
	topo_queue::TopoQueue,
};

struct Meta {
	node: Weak<dyn Node>,
	level: usize,
	new_level: usize,
	queued: bool,
	successors: Vec<NodeId>,
}

/// Owns all nodes belonging to one reactive context (`spec.md` §2).
///
/// `Graph` itself is private: callers only ever see it through a
/// [`GraphHandle`], which is what node implementations hold as their
/// "context reference" (`spec.md` §4.4).
pub struct Graph {
	metadata: SlotMap<Meta>,
	queue: TopoQueue,
	pending_inputs: Vec<NodeId>,
	transaction_depth: u32,
	callback_in_progress: bool,
	/// The node currently executing its own [`Node::update`], if any. Used
	/// by [`Graph::attach_node`] to tell a normal (construction-time) attach
	/// from a node re-subscribing to a new predecessor mid-update
	/// (`spec.md` §4.3 "Dynamic re-subscription").
	updating: Option<NodeId>,
	deferred_detaches: Vec<Box<dyn FnOnce()>>,
}

impl Graph {
	fn new() -> Self {
		Self {
			metadata: SlotMap::new(),
			queue: TopoQueue::new(),
			pending_inputs: Vec::new(),
			transaction_depth: 0,
			callback_in_progress: false,
			updating: None,
			deferred_detaches: Vec::new(),
		}
	}
}

/// A cheap, cloneable reference to a [`Graph`].
///
/// This is the "context reference" every node holds (`spec.md` §4.4): nodes
/// call back into it to register, attach/detach, and push inputs, and the
/// façade layer (`wavefront`) uses it to drive transactions.
///
/// Not [`Send`] or [`Sync`]: a graph is confined to the thread that created
/// it (`spec.md` §5).
#[derive(Clone)]
pub struct GraphHandle(Rc<RefCell<Graph>>);

impl Default for GraphHandle {
	fn default() -> Self {
		Self::new()
	}
}

impl GraphHandle {
	/// Creates a fresh, empty graph.
	pub fn new() -> Self {
		Self(Rc::new(RefCell::new(Graph::new())))
	}

	/// Whether two handles refer to the same underlying graph. Used by the
	/// façade's `Context` type, which compares by identity rather than by
	/// value (`spec.md` §4.9).
	#[must_use]
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	/// Registers a new node, starting at level 0. The caller is responsible
	/// for following up with [`GraphHandle::attach_node`] for each
	/// predecessor, in the node's own constructor, before any other code can
	/// observe the new node (`spec.md` §4.4).
	///
	/// # Panics
	///
	/// Panics if called while a callback (another node's `update`/`finalize`,
	/// or an observer callback) is in progress (`spec.md` §4.3, §4.10): node
	/// creation is forbidden during re-entry.
	pub fn register_node(&self, node: Weak<dyn Node>) -> NodeId {
		let mut graph = self.0.borrow_mut();
		assert!(
			!graph.callback_in_progress,
			"cannot create a node while a callback is in progress"
		);
		graph.metadata.insert(Meta {
			node,
			level: 0,
			new_level: 0,
			queued: false,
			successors: Vec::new(),
		})
	}

	/// Erases a node's metadata. Must only be called once, from the node
	/// object's own destructor, after it has detached from every predecessor
	/// (`spec.md` §4.4).
	pub fn unregister_node(&self, id: NodeId) {
		let mut graph = self.0.borrow_mut();
		let meta = graph.metadata.erase(id);
		debug_assert!(
			meta.successors.is_empty(),
			"a node was destroyed while it still had successors"
		);
	}

	/// Appends `child` to `parent`'s successor list and, if necessary, bumps
	/// `child`'s level so that `child.level > parent.level` continues to
	/// hold (`spec.md` §4.3).
	///
	/// May be called at construction time (before the child has any
	/// successors of its own, so a direct level bump is always safe) or
	/// reentrantly from within the child's own [`Node::update`] (dynamic
	/// re-subscription): in that case the bump is deferred into
	/// `new_level`, which the propagation loop reconciles the next time the
	/// child is dequeued, so that nodes already scheduled this turn don't
	/// observe a level change out from under them.
	pub fn attach_node(&self, child: NodeId, parent: NodeId) {
		let mut graph = self.0.borrow_mut();
		graph.metadata[parent].successors.push(child);
		let parent_level = graph.metadata[parent].level;
		if graph.metadata[child].level <= parent_level {
			if graph.updating == Some(child) {
				let new_level = &mut graph.metadata[child].new_level;
				*new_level = (*new_level).max(parent_level + 1);
			} else {
				graph.metadata[child].level = parent_level + 1;
				let new_level = &mut graph.metadata[child].new_level;
				*new_level = (*new_level).max(parent_level + 1);
			}
		}
	}

	/// Removes `child` from `parent`'s successor list.
	pub fn detach_node(&self, child: NodeId, parent: NodeId) {
		let mut graph = self.0.borrow_mut();
		if let Some(meta) = graph.metadata.try_get_mut(parent) {
			meta.successors.retain(|&successor| successor != child);
		}
	}

	/// Records that input `id` changed since the last propagation. Runs a
	/// turn immediately if there's no open transaction (`spec.md` §4.3).
	pub fn push_input(&self, id: NodeId) {
		let should_propagate = {
			let mut graph = self.0.borrow_mut();
			assert!(
				!graph.callback_in_progress,
				"cannot set an input while a callback is in progress"
			);
			graph.pending_inputs.push(id);
			graph.transaction_depth == 0
		};
		if should_propagate {
			self.propagate();
		}
	}

	/// Opens a transaction, deferring propagation until the matching
	/// [`GraphHandle::finish_transaction`] brings the depth back to zero.
	pub fn start_transaction(&self) {
		let mut graph = self.0.borrow_mut();
		assert!(
			!graph.callback_in_progress,
			"cannot start a transaction while a callback is in progress"
		);
		graph.transaction_depth += 1;
	}

	/// Closes one level of transaction nesting; runs a turn if this was the
	/// outermost one and inputs are pending (`spec.md` §4.9).
	pub fn finish_transaction(&self) {
		let should_propagate = {
			let mut graph = self.0.borrow_mut();
			graph.transaction_depth = graph
				.transaction_depth
				.checked_sub(1)
				.expect("unbalanced transaction: finish_transaction without start_transaction");
			graph.transaction_depth == 0 && !graph.pending_inputs.is_empty()
		};
		if should_propagate {
			self.propagate();
		}
	}

	/// Queues an action (an observer's self-detach) to run after the current
	/// turn's finalize phase (`spec.md` §4.8, §5).
	pub fn defer_detach(&self, action: Box<dyn FnOnce()>) {
		self.0.borrow_mut().deferred_detaches.push(action);
	}

	/// Runs one turn to completion: applies pending inputs, drains the
	/// topological queue level by level, finalizes every node that changed,
	/// then runs deferred observer detaches (`spec.md` §4.3).
	pub fn propagate(&self) {
		let mut changed_this_turn = Vec::new();

		let inputs = std::mem::take(&mut self.0.borrow_mut().pending_inputs);
		for id in inputs {
			if let Some(Update::Changed) = self.run_update(id) {
				changed_this_turn.push(id);
				self.enqueue_successors(id);
			}
		}

		loop {
			let Some(batch) = self.0.borrow_mut().queue.fetch_next() else {
				break;
			};
			for id in batch {
				self.process_one(id, &mut changed_this_turn);
			}
		}

		for id in &changed_this_turn {
			let node = self
				.0
				.borrow()
				.metadata
				.try_get(*id)
				.and_then(|meta| meta.node.upgrade());
			if let Some(node) = node {
				node.finalize();
			}
		}

		let deferred = std::mem::take(&mut self.0.borrow_mut().deferred_detaches);
		for action in deferred {
			action();
		}
	}

	fn process_one(&self, id: NodeId, changed_this_turn: &mut Vec<NodeId>) {
		let levels = self
			.0
			.borrow()
			.metadata
			.try_get(id)
			.map(|meta| (meta.level, meta.new_level));
		let Some((level, new_level)) = levels else {
			return; // Node was dropped while queued.
		};

		if level < new_level {
			let mut graph = self.0.borrow_mut();
			graph.metadata[id].level = new_level;
			let successors = graph.metadata[id].successors.clone();
			for successor in successors {
				if let Some(meta) = graph.metadata.try_get_mut(successor) {
					meta.new_level = meta.new_level.max(new_level + 1);
				}
			}
			graph.queue.push(id, new_level);
			return; // `queued` stays set; this id is revisited at its new level.
		}

		match self.run_update(id) {
			None => {} // Node was dropped while queued.
			Some(Update::Shifted) => {
				let mut graph = self.0.borrow_mut();
				let level = graph.metadata[id].level.max(graph.metadata[id].new_level);
				graph.queue.push(id, level);
			}
			Some(Update::Changed) => {
				changed_this_turn.push(id);
				self.enqueue_successors(id);
				self.clear_queued(id);
			}
			Some(Update::Unchanged) => {
				self.clear_queued(id);
			}
		}
	}

	fn clear_queued(&self, id: NodeId) {
		if let Some(meta) = self.0.borrow_mut().metadata.try_get_mut(id) {
			meta.queued = false;
		}
	}

	fn enqueue_successors(&self, id: NodeId) {
		let mut graph = self.0.borrow_mut();
		let Some(successors) = graph.metadata.try_get(id).map(|meta| meta.successors.clone())
		else {
			return;
		};
		for successor in successors {
			if let Some(meta) = graph.metadata.try_get_mut(successor) {
				if !meta.queued {
					meta.queued = true;
					let level = meta.level;
					graph.queue.push(successor, level);
				}
			}
		}
	}

	/// Upgrades `id`'s node and calls [`Node::update`] on it with the
	/// re-entrancy guard held, releasing the graph's `RefCell` borrow first
	/// so that the node's own callback (and any nested `attach_node`/
	/// `detach_node`/`push_input` calls it makes on this same `GraphHandle`)
	/// can run without deadlocking against a held borrow — the single-
	/// threaded analogue of the teacher's lock-drop-then-reacquire pattern
	/// around reentrant callbacks.
	fn run_update(&self, id: NodeId) -> Option<Update> {
		let node = self
			.0
			.borrow()
			.metadata
			.try_get(id)?
			.node
			.upgrade()?;

		{
			let mut graph = self.0.borrow_mut();
			assert!(
				!graph.callback_in_progress,
				"graph callback re-entered: node update()/finalize() must not \
				 recursively trigger another node update()"
			);
			graph.callback_in_progress = true;
			graph.updating = Some(id);
		}
		let restore = Rc::clone(&self.0);
		let _guard = scopeguard::guard((), move |()| {
			let mut graph = restore.borrow_mut();
			graph.callback_in_progress = false;
			graph.updating = None;
		});

		Some(node.update())
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, rc::Rc};

	use super::GraphHandle;
	use crate::{
		node::{Node, Update},
		slot_map::NodeId,
	};

	/// A node that always reports `Changed` and records, into a shared log,
	/// the value its single input held at the moment it ran — used to assert
	/// predecessor-before-successor ordering (`spec.md` §8, invariant 2).
	struct Recorder {
		log: Rc<RefCell<Vec<&'static str>>>,
		name: &'static str,
	}

	impl Node for Recorder {
		fn update(&self) -> Update {
			self.log.borrow_mut().push(self.name);
			Update::Changed
		}
	}

	fn leaf(graph: &GraphHandle, log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> (Rc<Recorder>, NodeId) {
		let node = Rc::new(Recorder {
			log: Rc::clone(log),
			name,
		});
		let id = graph.register_node(Rc::downgrade(&node));
		(node, id)
	}

	#[test]
	fn attach_bumps_child_level_above_parent() {
		let graph = GraphHandle::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		let (_a, a_id) = leaf(&graph, &log, "a");
		let (_b, b_id) = leaf(&graph, &log, "b");
		graph.attach_node(b_id, a_id);
		assert_eq!(graph.0.borrow().metadata[a_id].level, 0);
		assert_eq!(graph.0.borrow().metadata[b_id].level, 1);
	}

	#[test]
	fn diamond_runs_each_node_once_per_turn() {
		// a -> x1, a -> x2, x1 -> z, x2 -> z
		let graph = GraphHandle::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		let (_a, a_id) = leaf(&graph, &log, "a");
		let (_x1, x1_id) = leaf(&graph, &log, "x1");
		let (_x2, x2_id) = leaf(&graph, &log, "x2");
		let (_z, z_id) = leaf(&graph, &log, "z");
		graph.attach_node(x1_id, a_id);
		graph.attach_node(x2_id, a_id);
		graph.attach_node(z_id, x1_id);
		graph.attach_node(z_id, x2_id);

		graph.push_input(a_id);

		let recorded = log.borrow();
		assert_eq!(recorded.iter().filter(|&&n| n == "z").count(), 1);
		let z_pos = recorded.iter().position(|&n| n == "z").unwrap();
		let x1_pos = recorded.iter().position(|&n| n == "x1").unwrap();
		let x2_pos = recorded.iter().position(|&n| n == "x2").unwrap();
		assert!(x1_pos < z_pos && x2_pos < z_pos);
	}

	/// A node that detaches from its one predecessor and unregisters itself
	/// when dropped, the way every concrete node type in `wavefront` does
	/// (`spec.md` §4.4: "Destructors remove the entry").
	struct DetachingChild {
		graph: GraphHandle,
		id: RefCell<Option<NodeId>>,
		parent: NodeId,
	}

	impl Node for DetachingChild {
		fn update(&self) -> Update {
			Update::Unchanged
		}
	}

	impl Drop for DetachingChild {
		fn drop(&mut self) {
			if let Some(id) = self.id.borrow_mut().take() {
				self.graph.detach_node(id, self.parent);
				self.graph.unregister_node(id);
			}
		}
	}

	#[test]
	fn dropping_a_child_removes_it_from_its_parents_successors() {
		let graph = GraphHandle::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		let (_a, a_id) = leaf(&graph, &log, "a");

		let child = Rc::new(DetachingChild {
			graph: graph.clone(),
			id: RefCell::new(None),
			parent: a_id,
		});
		let child_id = graph.register_node(Rc::downgrade(&child));
		*child.id.borrow_mut() = Some(child_id);
		graph.attach_node(child_id, a_id);
		assert_eq!(graph.0.borrow().metadata[a_id].successors, vec![child_id]);

		drop(child);
		assert!(graph.0.borrow().metadata[a_id].successors.is_empty());

		// The parent can still run a turn; the dropped child is simply gone.
		graph.push_input(a_id);
		assert_eq!(*log.borrow(), vec!["a"]);
	}

	#[test]
	fn transaction_defers_propagation_until_outermost_finish() {
		let graph = GraphHandle::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		let (_a, a_id) = leaf(&graph, &log, "a");

		graph.start_transaction();
		graph.start_transaction();
		graph.push_input(a_id);
		assert!(log.borrow().is_empty(), "nested transaction must not propagate yet");
		graph.finish_transaction();
		assert!(log.borrow().is_empty(), "still one level of transaction open");
		graph.finish_transaction();
		assert_eq!(*log.borrow(), vec!["a"]);
	}
}
