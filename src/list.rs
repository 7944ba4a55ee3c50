//! List Zipper
//! - a cursor within a persistent sequence
//! - the thread holds everything left of the cursor, nearest first
//! - the focus holds the cursor element followed by everything to its right
//!
//! Moving and editing at the cursor are O(1). Converting from and to a
//! plain sequence is O(n).

use std::iter::FromIterator;

use crate::error::{refuse, Result};
use crate::stack::Stack;

/// zipper over a sequence, focused on a single element
///
/// Every operation returns a new zipper and leaves the old one as it
/// was, so earlier versions can be kept and shared freely.
/// The cursor never moves past the last element: only an empty
/// zipper has an empty focus.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Zipper<T> {
	thread: Stack<T>,
	focus: Stack<T>,
}

impl<T> Default for Zipper<T> {
	fn default() -> Self {
		Zipper::new()
	}
}

impl<T> FromIterator<T> for Zipper<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Zipper::from_list(iter)
	}
}

impl<T> Zipper<T> {
	/// creates an empty zipper
	pub fn new() -> Self {
		Zipper {
			thread: Stack::new(),
			focus: Stack::new(),
		}
	}

	/// creates a zipper focused on the first element of the sequence
	pub fn from_list<I: IntoIterator<Item = T>>(list: I) -> Self {
		Zipper {
			thread: Stack::new(),
			focus: list.into_iter().collect(),
		}
	}

	/// peek at the focused element
	pub fn get(&self) -> Result<&T> {
		self.focus.peek().ok_or_else(|| refuse("list::get"))
	}

	pub fn is_empty(&self) -> bool {
		self.thread.is_empty() && self.focus.is_empty()
	}

	/// true when nothing is left of the cursor
	pub fn is_leftmost(&self) -> bool {
		self.thread.is_empty()
	}

	/// true when nothing is right of the cursor
	pub fn is_rightmost(&self) -> bool {
		match self.focus.pull() {
			None => true,
			Some(rest) => rest.is_empty(),
		}
	}

	/// number of elements in the whole sequence
	pub fn len(&self) -> usize {
		self.thread.len() + self.focus.len()
	}

	/// iterates over the whole sequence in order
	pub fn iter(&self) -> impl Iterator<Item = &T> {
		let left: Vec<&T> = self.thread.iter().collect();
		left.into_iter().rev().chain(self.focus.iter())
	}
}

impl<T: Clone> Zipper<T> {
	/// the whole sequence, in order
	pub fn to_list(&self) -> Vec<T> {
		self.iter().cloned().collect()
	}

	/// replaces the focused element
	pub fn set(&self, val: T) -> Result<Self> {
		match self.focus.pull() {
			Some(rest) => Ok(Zipper {
				thread: self.thread.clone(),
				focus: rest.push(val),
			}),
			None => Err(refuse("list::set")),
		}
	}

	/// transforms the focused element
	pub fn update<F>(&self, f: F) -> Result<Self>
	where
		F: FnOnce(&T) -> T,
	{
		match self.focus.pop() {
			Some((head, rest)) => Ok(Zipper {
				thread: self.thread.clone(),
				focus: rest.push(f(head)),
			}),
			None => Err(refuse("list::update")),
		}
	}

	/// transforms the focused element, or creates one in an empty zipper
	pub fn upsert<F>(&self, f: F) -> Self
	where
		F: FnOnce(Option<&T>) -> T,
	{
		let (val, rest) = match self.focus.pop() {
			Some((head, rest)) => (f(Some(head)), rest),
			None => (f(None), Stack::new()),
		};
		Zipper {
			thread: self.thread.clone(),
			focus: rest.push(val),
		}
	}

	/// inserts an element just left of the cursor, the cursor stays put
	///
	/// In an empty zipper the element becomes the focus.
	pub fn insert_left(&self, val: T) -> Self {
		if self.is_empty() {
			Zipper {
				thread: Stack::new(),
				focus: Stack::new().push(val),
			}
		} else {
			Zipper {
				thread: self.thread.push(val),
				focus: self.focus.clone(),
			}
		}
	}

	/// inserts an element just right of the cursor, the cursor stays put
	///
	/// In an empty focus the element becomes the focus.
	pub fn insert_right(&self, val: T) -> Self {
		let focus = match self.focus.pop() {
			Some((head, rest)) => rest.push(val).push(head.clone()),
			None => Stack::new().push(val),
		};
		Zipper {
			thread: self.thread.clone(),
			focus,
		}
	}

	/// removes the focused element
	///
	/// The cursor moves to the next element on the right, or to the
	/// new last element when the rightmost one was removed. Removing
	/// the sole element of the sequence is refused.
	pub fn delete(&self) -> Result<Self> {
		let rest = match self.focus.pull() {
			None => return Err(refuse("list::delete")),
			Some(rest) => rest,
		};
		if !rest.is_empty() {
			return Ok(Zipper {
				thread: self.thread.clone(),
				focus: rest,
			});
		}
		match self.thread.pop() {
			Some((prev, thread)) => Ok(Zipper {
				thread,
				focus: Stack::new().push(prev.clone()),
			}),
			None => Err(refuse("list::delete")),
		}
	}

	/// moves the cursor one element to the left
	pub fn go_left(&self) -> Result<Self> {
		match self.thread.pop() {
			Some((prev, thread)) => Ok(Zipper {
				thread,
				focus: self.focus.push(prev.clone()),
			}),
			None => Err(refuse("list::go_left")),
		}
	}

	/// moves the cursor one element to the right
	///
	/// Refused at the rightmost element, so the cursor always
	/// rests on an element of a non-empty sequence.
	pub fn go_right(&self) -> Result<Self> {
		match self.focus.pop() {
			Some((head, focus)) if !focus.is_empty() => Ok(Zipper {
				thread: self.thread.push(head.clone()),
				focus,
			}),
			_ => Err(refuse("list::go_right")),
		}
	}

	/// moves the cursor to the first element
	pub fn go_leftmost(&self) -> Self {
		let focus = self.thread.iter().fold(self.focus.clone(), |acc, e| acc.push(e.clone()));
		Zipper {
			thread: Stack::new(),
			focus,
		}
	}

	/// moves the cursor to the last element
	pub fn go_rightmost(&self) -> Self {
		let mut zip = self.clone();
		while let Ok(rightward) = zip.go_right() {
			zip = rightward;
		}
		zip
	}
}
