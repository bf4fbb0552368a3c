//! Destructor bookkeeping (`spec.md` §4.4, §9 "Destructors remove the
//! entry"): dropping a node's last handle detaches it from its predecessors
//! and erases its graph entry, leaving the rest of the graph free to keep
//! running turns.

use std::{cell::Cell, rc::Rc};

use wavefront::{Context, Observer, Signal, VarSignal};
use wavefront_ops::{lift1, transform};

#[test]
fn dropping_a_derived_signal_lets_its_predecessor_keep_running() {
	let context = Context::new();
	let a = VarSignal::new(&context, 1);

	let doubled = lift1(&context, &a.as_signal(), |a| a * 2);
	assert_eq!(doubled.get(), 2);
	drop(doubled);

	// `a` still has no remaining dependents; setting it must not panic or
	// leave behind a metadata entry `doubled` used to occupy.
	a.set(5);
	assert_eq!(a.get(), 5);
}

#[test]
fn dropping_an_observer_stops_it_from_running_again() {
	let context = Context::new();
	let source = VarSignal::new(&context, 1);
	let calls = Rc::new(Cell::new(0));

	let observer = {
		let calls = Rc::clone(&calls);
		Observer::on_signal(&source.as_signal(), false, move |_value| {
			calls.set(calls.get() + 1);
			wavefront::ObserverAction::Next
		})
	};

	source.set(2);
	assert_eq!(calls.get(), 1);

	drop(observer);
	source.set(3);
	assert_eq!(calls.get(), 1, "no further calls once the observer is dropped");
}

#[test]
fn dropping_an_intermediate_adaptor_does_not_disturb_the_rest_of_the_graph() {
	let context = Context::new();
	let source = wavefront::EventSource::new(&context);
	let doubled = transform(&context, &source.as_events(), |value: &i32| value * 2);
	let quadrupled = transform(&context, &doubled, |value: &i32| value * 2);

	source.emit(1);
	assert_eq!(&*quadrupled.current(), &[4]);

	drop(doubled);
	source.emit(2);
	assert_eq!(&*quadrupled.current(), &[8], "quadrupled still sees its direct predecessor's output");

	drop(quadrupled);
	let _ = Signal::derive(&context, &[], || 0); // the graph is still usable afterwards
}
