use wavefront::{Context, Events};

/// Merges two event streams: a turn's output batch is `a`'s values for this
/// turn followed by `b`'s, in that order.
pub fn merge<E>(context: &Context, a: &Events<E>, b: &Events<E>) -> Events<E>
where
	E: Clone + 'static,
{
	let a = a.clone();
	let b = b.clone();
	Events::derive(context, &[a.node_id(), b.node_id()], move |events| {
		let mut events = events.borrow_mut();
		events.extend(a.current().iter().cloned());
		events.extend(b.current().iter().cloned());
	})
}
