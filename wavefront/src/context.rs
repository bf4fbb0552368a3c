use std::cell::RefCell;

use wavefront_core::GraphHandle;

use crate::Transaction;

/// A reactive graph plus the handle types that were constructed against it.
///
/// `Context` is a cheap, cloneable reference to the underlying graph (much
/// like [`GraphHandle`] itself): cloning it shares the same graph rather than
/// creating a new one. Two contexts compare equal iff they refer to the same
/// graph.
#[derive(Clone)]
pub struct Context {
	graph: GraphHandle,
}

impl Context {
	/// Creates a fresh, empty context with its own graph.
	#[must_use]
	pub fn new() -> Self {
		Self {
			graph: GraphHandle::new(),
		}
	}

	pub(crate) fn graph(&self) -> &GraphHandle {
		&self.graph
	}

	/// Opens a transaction on this context's graph. Every signal/event input
	/// set while the returned guard is alive is applied in a single
	/// propagation turn once the outermost transaction finishes (dropping the
	/// guard finishes it, same as calling [`Transaction::finish`] explicitly).
	#[must_use]
	pub fn transaction(&self) -> Transaction {
		Transaction::new(self.graph.clone())
	}
}

impl Default for Context {
	fn default() -> Self {
		Self::new()
	}
}

impl PartialEq for Context {
	fn eq(&self, other: &Self) -> bool {
		self.graph.ptr_eq(&other.graph)
	}
}

impl Eq for Context {}

thread_local! {
	static DEFAULT_CONTEXT: RefCell<Context> = RefCell::new(Context::new());
}

/// The context used by node constructors that aren't given one explicitly.
/// One lazily-created context per thread (`spec.md` §4.9).
#[must_use]
pub fn default_context() -> Context {
	DEFAULT_CONTEXT.with(|context| context.borrow().clone())
}
