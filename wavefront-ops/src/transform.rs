use wavefront::{Context, Events};

/// Maps every value in each turn's batch through `f`.
pub fn transform<E, O>(
	context: &Context,
	source: &Events<E>,
	f: impl Fn(&E) -> O + 'static,
) -> Events<O>
where
	E: 'static,
	O: 'static,
{
	let source = source.clone();
	Events::derive(context, &[source.node_id()], move |events| {
		let mut events = events.borrow_mut();
		events.extend(source.current().iter().map(&f));
	})
}
