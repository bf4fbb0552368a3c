//! Invariant 6: every event node's buffer is empty once a turn finishes.

use wavefront::{Context, EventSource};

#[test]
fn buffer_is_empty_after_each_turn() {
	let context = Context::new();
	let src = EventSource::new(&context);

	assert!(src.current().is_empty());

	src.emit(1);
	src.emit(2);
	// `emit` runs a turn immediately (no open transaction), so by the time
	// it returns, finalize has already cleared the buffer.
	assert!(src.current().is_empty(), "buffer must be empty once its producing turn has finished");

	{
		let txn = context.transaction();
		src.emit(3);
		src.emit(4);
		src.emit(5);
		// Inside the transaction, no turn has run yet.
		assert_eq!(src.current().len(), 3);
		txn.finish();
	}
	assert!(src.current().is_empty(), "buffer must be empty after the batched turn finishes too");
}
