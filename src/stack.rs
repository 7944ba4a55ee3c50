//! Persistent Linked List (Cons-list)
//!
//! Every zipper in this crate keeps its context in these stacks:
//! the thread of a list zipper, the path of choices in a tree
//! zipper and the sibling lists of a rose tree zipper.
//! Pushing and pulling are O(1) and leave the original stack
//! untouched, since tails are shared through reference counting.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::rc::Rc;

/// Common linked-list
pub struct Stack<T>(Option<Rc<Body<T>>>);

struct Body<T> {
	elem: T,
	next: Option<Rc<Body<T>>>,
}

impl<T> Stack<T> {
	/// this is identical to `Stack::default()`
	pub fn new() -> Self {
		Stack(None)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_none()
	}

	/// counts the elements, walking the whole stack
	pub fn len(&self) -> usize {
		self.iter().count()
	}

	/// return a stack with the new item as head
	pub fn push(&self, elem: T) -> Self {
		Stack(Some(Rc::new(Body {
			elem,
			next: self.0.clone(),
		})))
	}

	/// return the top item, if there is one
	pub fn peek(&self) -> Option<&T> {
		self.0.as_ref().map(|b| &b.elem)
	}

	/// return the stack without the top item (this is sometimes called `tail`)
	pub fn pull(&self) -> Option<Self> {
		self.0.as_ref().map(|b| Stack(b.next.clone()))
	}

	/// the top item together with the rest of the stack
	pub fn pop(&self) -> Option<(&T, Self)> {
		self.0.as_ref().map(|b| (&b.elem, Stack(b.next.clone())))
	}

	/// return an iterator over the elements from the top of the stack
	pub fn iter(&self) -> Iter<'_, T> {
		Iter {
			next: self.0.as_deref(),
		}
	}
}

impl<T: Clone> Stack<T> {
	/// a new stack holding the same elements in the opposite order
	pub fn reversed(&self) -> Self {
		self.iter().fold(Stack::new(), |acc, e| acc.push(e.clone()))
	}
}

impl<T> Default for Stack<T> {
	fn default() -> Self {
		Stack::new()
	}
}

impl<T> Clone for Stack<T> {
	fn clone(&self) -> Self {
		Stack(self.0.clone())
	}
}

// Unlinks uniquely owned nodes one at a time, so long stacks
// don't blow the call stack when they are dropped.
impl<T> Drop for Stack<T> {
	fn drop(&mut self) {
		let mut next = self.0.take();
		while let Some(body) = next {
			match Rc::try_unwrap(body) {
				Ok(mut body) => next = body.next.take(),
				Err(_) => break,
			}
		}
	}
}

/// The first item yielded becomes the top of the stack
impl<T> FromIterator<T> for Stack<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let items: Vec<T> = iter.into_iter().collect();
		let mut stack = Stack::new();
		for elem in items.into_iter().rev() {
			stack = stack.push(elem);
		}
		stack
	}
}

impl<T: PartialEq> PartialEq for Stack<T> {
	fn eq(&self, other: &Self) -> bool {
		self.iter().eq(other.iter())
	}
}
impl<T: Eq> Eq for Stack<T> {}

impl<T: Hash> Hash for Stack<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		for elem in self.iter() {
			elem.hash(state);
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

/// Iterator for list items
pub struct Iter<'a, T> {
	next: Option<&'a Body<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
	type Item = &'a T;

	fn next(&mut self) -> Option<Self::Item> {
		self.next.take().map(|body| {
			self.next = body.next.as_deref();
			&body.elem
		})
	}
}

impl<'a, T> IntoIterator for &'a Stack<T> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(feature = "serde")]
mod serde_impls {
	use super::Stack;
	use serde::de::{Deserialize, Deserializer};
	use serde::ser::{Serialize, Serializer};

	impl<T: Serialize> Serialize for Stack<T> {
		fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
			serializer.collect_seq(self.iter())
		}
	}

	impl<'de, T: Deserialize<'de>> Deserialize<'de> for Stack<T> {
		fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
			let items = Vec::<T>::deserialize(deserializer)?;
			Ok(items.into_iter().collect())
		}
	}
}
