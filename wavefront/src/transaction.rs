use wavefront_core::GraphHandle;

/// An open batch of writes against a [`crate::Context`]'s graph.
///
/// While a `Transaction` is alive, setting a [`crate::VarSignal`] or emitting
/// an [`crate::EventSource`] value records the input but does not run a
/// propagation turn. Transactions nest: the turn runs once the outermost one
/// finishes, either via [`Transaction::finish`] or by dropping the guard
/// (`spec.md` §4.9).
///
/// Rust's moves don't invoke `Drop` on the moved-from location (unlike the
/// move constructors this pattern guards against in other languages), so
/// there's no risk of double-propagation from moving a `Transaction` around;
/// the `finished` flag alone is enough to guarantee `finish_transaction` is
/// called exactly once per `start_transaction`.
pub struct Transaction {
	graph: GraphHandle,
	finished: bool,
}

impl Transaction {
	pub(crate) fn new(graph: GraphHandle) -> Self {
		graph.start_transaction();
		Self {
			graph,
			finished: false,
		}
	}

	/// Closes the transaction now, instead of when it's dropped.
	pub fn finish(mut self) {
		self.graph.finish_transaction();
		self.finished = true;
	}
}

impl Drop for Transaction {
	fn drop(&mut self) {
		if !self.finished {
			self.graph.finish_transaction();
		}
	}
}
