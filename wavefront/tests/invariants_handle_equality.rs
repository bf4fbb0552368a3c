//! Invariant 8: two handles compare equal iff they reference the same node.

use wavefront::{Context, Signal, VarSignal};

#[test]
fn clones_are_equal_distinct_nodes_are_not() {
	let context = Context::new();
	let a = VarSignal::new(&context, 1);
	let b = VarSignal::new(&context, 1);

	assert_eq!(a.as_signal(), a.as_signal(), "clones of the same node's handle are equal");
	assert_ne!(a.as_signal(), b.as_signal(), "two separately-constructed nodes are never equal");
	assert_eq!(a, a.clone());
	assert_ne!(a, b);
}

#[test]
fn contexts_compare_by_graph_identity() {
	let one = Context::new();
	let two = Context::new();
	assert_eq!(one, one.clone());
	assert_ne!(one, two);

	let a = VarSignal::new(&one, 1).as_signal();
	let derived: Signal<i32> = Signal::derive(&one, &[a.node_id()], {
		let a = a.clone();
		move || a.get() + 1
	});
	assert!(derived.graph().ptr_eq(a.graph()), "a signal derived in `one` shares `one`'s graph");
}
