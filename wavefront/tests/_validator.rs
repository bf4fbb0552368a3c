//! A call-order recorder for asserting exact observer call sequences,
//! in the spirit of the teacher's `flourish-extra/tests/_validator.rs`.

use std::{
	collections::VecDeque,
	fmt::Debug,
	sync::Mutex,
};

/// Records values as they arrive and checks them off against the expected
/// sequence one at a time.
pub struct Validator<T> {
	expected: Mutex<VecDeque<T>>,
}

impl<T: Debug + PartialEq> Validator<T> {
	pub fn new(expected: impl IntoIterator<Item = T>) -> Self {
		Self {
			expected: Mutex::new(expected.into_iter().collect()),
		}
	}

	/// Checks `actual` against the next expected value, panicking on a
	/// mismatch or if there are no more expected values.
	pub fn push(&self, actual: T) {
		let mut expected = self.expected.lock().unwrap();
		let next = expected
			.pop_front()
			.unwrap_or_else(|| panic!("unexpected extra call with {actual:?}"));
		assert_eq!(actual, next, "call sequence mismatch");
	}

	/// Call at the end of a test to confirm every expected value was seen.
	pub fn expect_empty(&self) {
		let expected = self.expected.lock().unwrap();
		assert!(
			expected.is_empty(),
			"expected further calls that never happened: {expected:?}"
		);
	}
}
