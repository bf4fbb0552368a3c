use wavefront::{Context, Events};

/// Pairs up values from two event streams positionally within a turn:
/// output `i` is `(a[i], b[i])` for `i` in `0..min(a.len(), b.len())`.
/// Leftover unpaired values are dropped rather than carried to the next
/// turn — this is a same-turn zip, not a buffering one.
pub fn zip<A, B>(context: &Context, a: &Events<A>, b: &Events<B>) -> Events<(A, B)>
where
	A: Clone + 'static,
	B: Clone + 'static,
{
	let a = a.clone();
	let b = b.clone();
	Events::derive(context, &[a.node_id(), b.node_id()], move |events| {
		let mut events = events.borrow_mut();
		let a = a.current();
		let b = b.current();
		events.extend(a.iter().cloned().zip(b.iter().cloned()));
	})
}
