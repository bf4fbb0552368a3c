use wavefront::{Context, Signal};
use wavefront_core::Calm;

/// Maps a signal's value through `f`, recomputed whenever the source
/// changes.
pub fn lift1<A, S>(context: &Context, a: &Signal<A>, f: impl Fn(&A) -> S + 'static) -> Signal<S>
where
	A: 'static,
	S: Calm + 'static,
{
	let a = a.clone();
	Signal::derive(context, &[a.node_id()], move || a.with(&f))
}

/// Combines two signals' values through `f`, recomputed whenever either
/// changes.
pub fn lift2<A, B, S>(
	context: &Context,
	a: &Signal<A>,
	b: &Signal<B>,
	f: impl Fn(&A, &B) -> S + 'static,
) -> Signal<S>
where
	A: 'static,
	B: 'static,
	S: Calm + 'static,
{
	let a = a.clone();
	let b = b.clone();
	Signal::derive(context, &[a.node_id(), b.node_id()], move || {
		a.with(|a| b.with(|b| f(a, b)))
	})
}

/// Combines three signals' values through `f`, recomputed whenever any of
/// them changes.
pub fn lift3<A, B, C, S>(
	context: &Context,
	a: &Signal<A>,
	b: &Signal<B>,
	c: &Signal<C>,
	f: impl Fn(&A, &B, &C) -> S + 'static,
) -> Signal<S>
where
	A: 'static,
	B: 'static,
	C: 'static,
	S: Calm + 'static,
{
	let a = a.clone();
	let b = b.clone();
	let c = c.clone();
	Signal::derive(
		context,
		&[a.node_id(), b.node_id(), c.node_id()],
		move || a.with(|a| b.with(|b| c.with(|c| f(a, b, c)))),
	)
}
