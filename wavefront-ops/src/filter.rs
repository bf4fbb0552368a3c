use wavefront::{Context, Events};

/// Keeps only the values in each turn's batch that satisfy `predicate`.
/// Produces a turn with no output (the stream reports unchanged) if every
/// value this turn was filtered out.
pub fn filter<E>(
	context: &Context,
	source: &Events<E>,
	predicate: impl Fn(&E) -> bool + 'static,
) -> Events<E>
where
	E: Clone + 'static,
{
	let source = source.clone();
	Events::derive(context, &[source.node_id()], move |events| {
		let mut events = events.borrow_mut();
		events.extend(source.current().iter().filter(|value| predicate(value)).cloned());
	})
}
