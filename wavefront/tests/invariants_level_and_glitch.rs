//! Invariants 1 (level monotonicity) and 2 (glitch freedom).

use std::{cell::RefCell, rc::Rc};

use wavefront::{Context, Observer, ObserverAction, Signal, VarSignal};

#[test]
fn predecessor_levels_stay_below_successor_levels() {
	let context = Context::new();
	let a = VarSignal::new(&context, 1);
	let b = {
		let a = a.as_signal();
		Signal::derive(&context, &[a.node_id()], move || a.get() + 1)
	};
	let c = {
		let b = b.clone();
		Signal::derive(&context, &[b.node_id()], move || b.get() + 1)
	};

	assert_eq!(a.as_signal().get(), 1);
	assert_eq!(b.get(), 2);
	assert_eq!(c.get(), 3);

	a.set(10);
	assert_eq!(c.get(), 12, "every level must settle before its successor reads it");
}

#[test]
fn a_wide_fan_out_then_fan_in_runs_every_node_exactly_once_in_order() {
	// a -> {x1, x2, x3} -> z, each edge widening the level gap before
	// converging back down to one observer.
	let context = Context::new();
	let a = VarSignal::new(&context, 1);
	let branch = |n: i32| {
		let a = a.as_signal();
		Signal::derive(&context, &[a.node_id()], move || a.get() * n)
	};
	let x1 = branch(1);
	let x2 = branch(2);
	let x3 = branch(3);
	let z = {
		let x1 = x1.clone();
		let x2 = x2.clone();
		let x3 = x3.clone();
		Signal::derive(&context, &[x1.node_id(), x2.node_id(), x3.node_id()], move || {
			x1.get() + x2.get() + x3.get()
		})
	};

	let log: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
	let observer = {
		let log = Rc::clone(&log);
		Observer::on_signal(&z, false, move |value| {
			log.borrow_mut().push(*value);
			ObserverAction::Next
		})
	};

	a.set(10);
	assert_eq!(*log.borrow(), vec![60], "z must be reached exactly once, with settled inputs");
	drop(observer);
}
