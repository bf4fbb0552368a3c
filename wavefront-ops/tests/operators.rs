use wavefront::{Context, EventSource, VarSignal};
use wavefront_ops::{filter, lift2, merge, transform, zip};

#[test]
fn lift2_recomputes_from_both_signals() {
	let context = Context::new();
	let a = VarSignal::new(&context, 2);
	let b = VarSignal::new(&context, 3);
	let product = lift2(&context, &a.as_signal(), &b.as_signal(), |a, b| a * b);
	assert_eq!(product.get(), 6);
	a.set(5);
	assert_eq!(product.get(), 15);
}

#[test]
fn filter_keeps_only_matching_values() {
	let context = Context::new();
	let src = EventSource::new(&context);
	let evens = filter(&context, &src.as_events(), |value: &i32| value % 2 == 0);

	{
		let txn = context.transaction();
		for value in 1..=6 {
			src.emit(value);
		}
		txn.finish();
	}
	assert_eq!(&*evens.current(), &[2, 4, 6]);
}

#[test]
fn transform_maps_every_value() {
	let context = Context::new();
	let src = EventSource::new(&context);
	let doubled = transform(&context, &src.as_events(), |value: &i32| value * 2);

	src.emit(21);
	assert_eq!(&*doubled.current(), &[42]);
}

#[test]
fn merge_concatenates_this_turns_batches_in_order() {
	let context = Context::new();
	let left = EventSource::new(&context);
	let right = EventSource::new(&context);
	let both = merge(&context, &left.as_events(), &right.as_events());

	{
		let txn = context.transaction();
		left.emit(1);
		right.emit(2);
		left.emit(3);
		txn.finish();
	}
	assert_eq!(&*both.current(), &[1, 3, 2]);
}

#[test]
fn zip_pairs_up_same_turn_values_positionally() {
	let context = Context::new();
	let left = EventSource::new(&context);
	let right = EventSource::new(&context);
	let paired = zip(&context, &left.as_events(), &right.as_events());

	{
		let txn = context.transaction();
		left.emit("a");
		left.emit("b");
		left.emit("c");
		right.emit(1);
		right.emit(2);
		txn.finish();
	}
	assert_eq!(&*paired.current(), &[("a", 1), ("b", 2)]);
}
