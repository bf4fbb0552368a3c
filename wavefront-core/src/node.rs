//! The node base contract (`spec.md` §4.4).

/// Result of one [`Node::update`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
	/// The node's observable output did not change this turn.
	Unchanged,
	/// The node's observable output changed this turn; its successors are scheduled.
	Changed,
	/// The node's predecessor set changed during this call (a flatten/switch
	/// node re-subscribed to a different inner node). Mutually exclusive with
	/// `Changed` (`spec.md` §9 resolves the "simultaneous shifted/changed"
	/// open question this way): the scheduler re-levels and re-runs the node
	/// before treating it as settled for this turn.
	Shifted,
}

/// Contract every node object implements (`spec.md` §4.4).
///
/// Implementors are non-copyable and pinned behind shared ownership (an
/// `Rc`) for their whole lifetime; the graph only ever holds a non-owning
/// [`NodeId`](crate::slot_map::NodeId) for them, never the node object
/// itself (`spec.md` §3, §9).
pub trait Node {
	/// Runs one propagation step and reports what happened.
	fn update(&self) -> Update;

	/// Called once per turn, only on nodes that reported [`Update::Changed`],
	/// after the whole turn's wavefront has settled. The default is a no-op;
	/// event-stream nodes override this to clear their per-turn buffer
	/// (`spec.md` §4.7).
	fn finalize(&self) {}
}
