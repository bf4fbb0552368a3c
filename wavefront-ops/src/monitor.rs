use wavefront::{Context, Events, Signal};
use wavefront_core::Calm;

/// Remembers the most recent value an event stream produced, as a signal.
/// A thin specialization of [`crate::fold`]: each turn's last value wins.
pub fn monitor<E>(context: &Context, source: &Events<E>, initial: E) -> Signal<E>
where
	E: Calm + Clone + 'static,
{
	crate::fold(context, source, initial, |_previous, latest| latest.clone())
}
