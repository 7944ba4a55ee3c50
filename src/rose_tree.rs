//! Rose Tree Zipper
//! - a cursor within a persistent tree with any number of ordered children
//! - the thread records, for each level above the focus, the parent's
//!   value, the siblings to the left (nearest first) and the siblings
//!   to the right (in order)
//! - every position carries a value, so reading and writing the focus
//!   never fails

use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{refuse, Result};
use crate::stack::Stack;

/// A persistent multi-way tree
///
/// A node with no children is a leaf. Clones are `Rc` clones.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct RoseTree<T> {
	link: Rc<Body<T>>,
}

#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct Body<T> {
	value: T,
	children: Vec<RoseTree<T>>,
}

impl<T> Clone for RoseTree<T> {
	fn clone(&self) -> Self {
		RoseTree {
			link: self.link.clone(),
		}
	}
}

// Deep trees are torn down with an explicit work list instead of
// nested drops.
impl<T> Drop for Body<T> {
	fn drop(&mut self) {
		let mut todo: Vec<Rc<Body<T>>> = std::mem::take(&mut self.children)
			.into_iter()
			.map(|t| t.link)
			.collect();
		while let Some(link) = todo.pop() {
			if let Ok(mut body) = Rc::try_unwrap(link) {
				todo.extend(std::mem::take(&mut body.children).into_iter().map(|t| t.link));
			}
		}
	}
}

// Equality and hashing walk the tree with a work list, like `Drop`.
impl<T: PartialEq> PartialEq for RoseTree<T> {
	fn eq(&self, other: &Self) -> bool {
		let mut todo = vec![(self, other)];
		while let Some((a, b)) = todo.pop() {
			if a.value() != b.value() || a.children().len() != b.children().len() {
				return false;
			}
			todo.extend(a.children().iter().zip(b.children()));
		}
		true
	}
}
impl<T: Eq> Eq for RoseTree<T> {}

impl<T: Hash> Hash for RoseTree<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		let mut todo = vec![self];
		while let Some(t) = todo.pop() {
			t.value().hash(state);
			state.write_usize(t.children().len());
			todo.extend(t.children().iter().rev());
		}
	}
}

impl<T> RoseTree<T> {
	pub fn new(value: T, children: Vec<RoseTree<T>>) -> Self {
		RoseTree {
			link: Rc::new(Body { value, children }),
		}
	}

	/// a node without children
	pub fn leaf(value: T) -> Self {
		RoseTree::new(value, Vec::new())
	}

	pub fn value(&self) -> &T {
		&self.link.value
	}

	pub fn children(&self) -> &[RoseTree<T>] {
		&self.link.children
	}

	pub fn is_leaf(&self) -> bool {
		self.link.children.is_empty()
	}

	/// number of nodes in the tree
	pub fn size(&self) -> usize {
		let mut count = 0;
		let mut todo = vec![self];
		while let Some(t) = todo.pop() {
			count += 1;
			todo.extend(t.children());
		}
		count
	}
}

/// Converts between a caller's own multi-way tree type and `RoseTree`
///
/// Every node has a value. `get_children` lowers the descendants of a
/// node into standard form itself, and `build_node` raises the standard
/// children it is handed, so each direction takes a single call per
/// conversion.
pub trait RoseTreeAdapter<T> {
	type Node;

	fn get_value(&self, node: &Self::Node) -> T;
	fn get_children(&self, node: &Self::Node) -> Vec<RoseTree<T>>;
	fn build_node(&self, value: T, children: Vec<RoseTree<T>>) -> Self::Node;
}

/// converts a caller's tree into a standard rose tree
fn lower<T, A: RoseTreeAdapter<T>>(adapter: &A, node: &A::Node) -> RoseTree<T> {
	RoseTree::new(adapter.get_value(node), adapter.get_children(node))
}

/// converts a standard rose tree into the caller's tree type
fn raise<T: Clone, A: RoseTreeAdapter<T>>(adapter: &A, tree: &RoseTree<T>) -> A::Node {
	adapter.build_node(tree.value().clone(), tree.children().to_vec())
}

/// one level of context: the parent's value and the siblings around the focus
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Choice<T> {
	value: T,
	left: Stack<RoseTree<T>>,
	right: Stack<RoseTree<T>>,
}

impl<T: Clone> Choice<T> {
	/// rebuilds the parent with the focus spliced back between its siblings
	fn rewrap(&self, focus: RoseTree<T>) -> RoseTree<T> {
		let mut children: Vec<RoseTree<T>> = self.left.iter().cloned().collect();
		children.reverse();
		children.push(focus);
		children.extend(self.right.iter().cloned());
		RoseTree::new(self.value.clone(), children)
	}
}

/// zipper over a rose tree, focused on one of its nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Zipper<T> {
	thread: Stack<Choice<T>>,
	focus: RoseTree<T>,
}

impl<T> From<RoseTree<T>> for Zipper<T> {
	fn from(tree: RoseTree<T>) -> Self {
		Zipper::from_standard_tree(tree)
	}
}

impl<T> Zipper<T> {
	/// creates a zipper focused on the root of the tree
	pub fn from_standard_tree(tree: RoseTree<T>) -> Self {
		Zipper {
			thread: Stack::new(),
			focus: tree,
		}
	}

	/// the focused subtree
	pub fn focus(&self) -> &RoseTree<T> {
		&self.focus
	}

	/// peek at the value of the focused node
	pub fn get_value(&self) -> &T {
		self.focus.value()
	}

	pub fn is_root(&self) -> bool {
		self.thread.is_empty()
	}

	/// true when the focused node has no children
	pub fn is_leaf(&self) -> bool {
		self.focus.is_leaf()
	}

	/// true at the root, or when no sibling is left of the focus
	pub fn is_leftmost(&self) -> bool {
		self.thread.peek().map_or(true, |c| c.left.is_empty())
	}

	/// true at the root, or when no sibling is right of the focus
	pub fn is_rightmost(&self) -> bool {
		self.thread.peek().map_or(true, |c| c.right.is_empty())
	}

	/// distance from the root to the focus
	pub fn depth(&self) -> usize {
		self.thread.len()
	}

	/// creates a zipper from a tree of the adapter's node type
	pub fn from_tree<A: RoseTreeAdapter<T>>(adapter: &A, node: A::Node) -> Self {
		Zipper::from_standard_tree(lower(adapter, &node))
	}

	/// replaces the focused subtree with a tree of the adapter's node type
	pub fn set_tree<A: RoseTreeAdapter<T>>(&self, adapter: &A, node: A::Node) -> Self {
		Zipper {
			thread: self.thread.clone(),
			focus: lower(adapter, &node),
		}
	}
}

impl<T: Clone> Zipper<T> {
	/// rebuilds the whole tree, splicing the focus back in at every level
	pub fn to_standard_tree(&self) -> RoseTree<T> {
		self.thread.iter().fold(self.focus.clone(), |focus, choice| choice.rewrap(focus))
	}

	/// the whole tree, in the adapter's node type
	pub fn to_tree<A: RoseTreeAdapter<T>>(&self, adapter: &A) -> A::Node {
		raise(adapter, &self.to_standard_tree())
	}

	/// the focused subtree, in the adapter's node type
	pub fn get_tree<A: RoseTreeAdapter<T>>(&self, adapter: &A) -> A::Node {
		raise(adapter, &self.focus)
	}

	fn with_focus(&self, focus: RoseTree<T>) -> Self {
		Zipper {
			thread: self.thread.clone(),
			focus,
		}
	}

	/// replaces the value of the focused node, keeping its children
	pub fn set_value(&self, value: T) -> Self {
		self.with_focus(RoseTree::new(value, self.focus.children().to_vec()))
	}

	/// transforms the value of the focused node, keeping its children
	pub fn update<F>(&self, f: F) -> Self
	where
		F: FnOnce(&T) -> T,
	{
		self.set_value(f(self.focus.value()))
	}

	/// adds a tree as the first child of the focused node
	pub fn insert_child(&self, tree: RoseTree<T>) -> Self {
		let mut children = Vec::with_capacity(self.focus.children().len() + 1);
		children.push(tree);
		children.extend(self.focus.children().iter().cloned());
		self.with_focus(RoseTree::new(self.focus.value().clone(), children))
	}

	/// adds a tree as the last child of the focused node
	pub fn insert_child_back(&self, tree: RoseTree<T>) -> Self {
		let mut children = self.focus.children().to_vec();
		children.push(tree);
		self.with_focus(RoseTree::new(self.focus.value().clone(), children))
	}

	/// replaces the innermost context, keeping the rest of the thread
	fn with_choice(&self, rest: &Stack<Choice<T>>, choice: Choice<T>, focus: RoseTree<T>) -> Self {
		Zipper {
			thread: rest.push(choice),
			focus,
		}
	}

	/// adds a sibling just left of the focus; the root has no siblings
	pub fn insert_left(&self, tree: RoseTree<T>) -> Result<Self> {
		match self.thread.pop() {
			Some((c, rest)) => Ok(self.with_choice(
				&rest,
				Choice {
					value: c.value.clone(),
					left: c.left.push(tree),
					right: c.right.clone(),
				},
				self.focus.clone(),
			)),
			None => Err(refuse("rose_tree::insert_left")),
		}
	}

	/// adds a sibling after the last right sibling of the focus; the
	/// root has no siblings
	pub fn insert_right(&self, tree: RoseTree<T>) -> Result<Self> {
		match self.thread.pop() {
			Some((c, rest)) => Ok(self.with_choice(
				&rest,
				Choice {
					value: c.value.clone(),
					left: c.left.clone(),
					right: c.right.iter().cloned().chain(Some(tree)).collect(),
				},
				self.focus.clone(),
			)),
			None => Err(refuse("rose_tree::insert_right")),
		}
	}

	/// removes the focused node
	///
	/// The focus moves to the next sibling on the right if there is
	/// one, else to the next sibling on the left, else to the parent.
	/// The root can't be deleted.
	pub fn delete(&self) -> Result<Self> {
		let (c, rest) = match self.thread.pop() {
			Some(top) => top,
			None => return Err(refuse("rose_tree::delete")),
		};
		if let Some((next, right)) = c.right.pop() {
			let choice = Choice {
				value: c.value.clone(),
				left: c.left.clone(),
				right,
			};
			return Ok(self.with_choice(&rest, choice, next.clone()));
		}
		if let Some((prev, left)) = c.left.pop() {
			let choice = Choice {
				value: c.value.clone(),
				left,
				right: Stack::new(),
			};
			return Ok(self.with_choice(&rest, choice, prev.clone()));
		}
		Ok(Zipper {
			thread: rest,
			focus: RoseTree::leaf(c.value.clone()),
		})
	}

	/// moves the cursor to the first child of the focused node
	pub fn go_down(&self) -> Result<Self> {
		match self.focus.children().split_first() {
			Some((first, rest)) => Ok(Zipper {
				thread: self.thread.push(Choice {
					value: self.focus.value().clone(),
					left: Stack::new(),
					right: rest.iter().cloned().collect(),
				}),
				focus: first.clone(),
			}),
			None => Err(refuse("rose_tree::go_down")),
		}
	}

	/// moves the cursor up to the parent of the focused node
	pub fn go_up(&self) -> Result<Self> {
		match self.thread.pop() {
			Some((c, rest)) => Ok(Zipper {
				thread: rest,
				focus: c.rewrap(self.focus.clone()),
			}),
			None => Err(refuse("rose_tree::go_up")),
		}
	}

	/// moves the cursor to the sibling on the left
	pub fn go_left(&self) -> Result<Self> {
		let moved = self.thread.pop().and_then(|(c, rest)| {
			c.left.pop().map(|(prev, left)| {
				let choice = Choice {
					value: c.value.clone(),
					left,
					right: c.right.push(self.focus.clone()),
				};
				self.with_choice(&rest, choice, prev.clone())
			})
		});
		moved.ok_or_else(|| refuse("rose_tree::go_left"))
	}

	/// moves the cursor to the sibling on the right
	pub fn go_right(&self) -> Result<Self> {
		let moved = self.thread.pop().and_then(|(c, rest)| {
			c.right.pop().map(|(next, right)| {
				let choice = Choice {
					value: c.value.clone(),
					left: c.left.push(self.focus.clone()),
					right,
				};
				self.with_choice(&rest, choice, next.clone())
			})
		});
		moved.ok_or_else(|| refuse("rose_tree::go_right"))
	}

	/// moves the cursor all the way up to the root
	pub fn go_root(&self) -> Self {
		Zipper::from_standard_tree(self.to_standard_tree())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::NotFound;
	use assert_matches::assert_matches;
	use rand::rngs::StdRng;
	use rand::{Rng, SeedableRng};

	fn r(value: u32, children: Vec<RoseTree<u32>>) -> RoseTree<u32> {
		RoseTree::new(value, children)
	}
	fn l(value: u32) -> RoseTree<u32> {
		RoseTree::leaf(value)
	}

	//       1
	//    /  |  \
	//   2   3   4
	//  / \      |
	// 5   6     7
	fn sample() -> RoseTree<u32> {
		r(1, vec![r(2, vec![l(5), l(6)]), l(3), r(4, vec![l(7)])])
	}

	fn random_tree(rng: &mut StdRng, budget: usize) -> RoseTree<u32> {
		let mut children = Vec::new();
		let mut rest = budget;
		while rest > 0 && rng.gen_bool(0.6) {
			let take = rng.gen_range(1..=rest);
			rest -= take;
			children.push(random_tree(rng, take - 1));
		}
		r(rng.gen_range(0..1000), children)
	}

	/// a caller's own tree type, an outline of headings
	#[derive(Debug, Clone, PartialEq)]
	struct Heading {
		title: String,
		sections: Vec<Heading>,
	}

	struct OutlineAdapter;

	impl RoseTreeAdapter<String> for OutlineAdapter {
		type Node = Heading;

		fn get_value(&self, node: &Heading) -> String {
			node.title.clone()
		}
		fn get_children(&self, node: &Heading) -> Vec<RoseTree<String>> {
			node.sections
				.iter()
				.map(|s| RoseTree::new(self.get_value(s), self.get_children(s)))
				.collect()
		}
		fn build_node(&self, value: String, children: Vec<RoseTree<String>>) -> Heading {
			Heading {
				title: value,
				sections: children
					.iter()
					.map(|c| self.build_node(c.value().clone(), c.children().to_vec()))
					.collect(),
			}
		}
	}

	fn h(title: &str, sections: Vec<Heading>) -> Heading {
		Heading {
			title: title.to_string(),
			sections,
		}
	}

	#[test]
	fn test_movement() {
		let z = Zipper::from_standard_tree(sample());
		assert!(z.is_root());
		assert!(z.is_leftmost());
		assert!(z.is_rightmost());
		assert_eq!(&1, z.get_value());
		assert_matches!(z.go_up(), Err(NotFound));
		assert_matches!(z.go_left(), Err(NotFound));
		assert_matches!(z.go_right(), Err(NotFound));

		let z = z.go_down().unwrap();
		assert_eq!(&2, z.get_value());
		assert!(z.is_leftmost());
		assert!(!z.is_rightmost());
		assert_matches!(z.go_left(), Err(NotFound));

		let z = z.go_right().unwrap().go_right().unwrap();
		assert_eq!(&4, z.get_value());
		assert!(z.is_rightmost());
		assert_matches!(z.go_right(), Err(NotFound));

		let z = z.go_down().unwrap();
		assert_eq!(&7, z.get_value());
		assert!(z.is_leaf());
		assert_eq!(2, z.depth());
		assert_matches!(z.go_down(), Err(NotFound));

		let z = z.go_up().unwrap().go_left().unwrap();
		assert_eq!(&3, z.get_value());
		assert_eq!(sample(), z.to_standard_tree());
		assert_eq!(Zipper::from_standard_tree(sample()), z.go_root());
	}

	#[test]
	fn test_edits() {
		let z = Zipper::from_standard_tree(sample());
		let z = z.set_value(10).update(|v| v + 1);
		assert_eq!(&11, z.get_value());

		let z = z.go_down().unwrap().go_right().unwrap();
		let z = z.insert_child(l(8)).insert_child_back(l(9)).insert_child(l(0));
		assert_eq!(&r(3, vec![l(0), l(8), l(9)]), z.focus());

		let z = z.insert_left(l(20)).unwrap().insert_right(l(30)).unwrap();
		assert_eq!(&3, z.get_value());
		assert_eq!(
			r(11, vec![
				r(2, vec![l(5), l(6)]),
				l(20),
				r(3, vec![l(0), l(8), l(9)]),
				r(4, vec![l(7)]),
				l(30),
			]),
			z.to_standard_tree()
		);
		assert_eq!(&20, z.go_left().unwrap().get_value());
		assert_eq!(&4, z.go_right().unwrap().get_value());

		let root = z.go_root();
		assert_matches!(root.insert_left(l(1)), Err(NotFound));
		assert_matches!(root.insert_right(l(1)), Err(NotFound));
		assert_eq!(&l(5), root.insert_child(l(5)).go_down().unwrap().focus());
	}

	#[test]
	fn test_insert_sibling_order() {
		let t = r(0, vec![l(1), l(2), l(3)]);
		let z = Zipper::from_standard_tree(t).go_down().unwrap();
		let z = z.insert_right(l(9)).unwrap();
		assert_eq!(&1, z.get_value());
		assert_eq!(&r(0, vec![l(1), l(2), l(3), l(9)]), &z.to_standard_tree());

		let z = z.go_right().unwrap().insert_left(l(8)).unwrap().insert_right(l(10)).unwrap();
		assert_eq!(&2, z.get_value());
		assert_eq!(
			r(0, vec![l(1), l(8), l(2), l(3), l(9), l(10)]),
			z.to_standard_tree()
		);
	}

	#[test]
	fn test_delete() {
		let z = Zipper::from_standard_tree(sample());
		assert_matches!(z.delete(), Err(NotFound));

		// a right sibling takes the focus first
		let z = z.go_down().unwrap().go_right().unwrap().delete().unwrap();
		assert_eq!(&4, z.get_value());
		assert_eq!(r(1, vec![r(2, vec![l(5), l(6)]), r(4, vec![l(7)])]), z.to_standard_tree());

		// then the left one
		let z = z.delete().unwrap();
		assert_eq!(&2, z.get_value());
		assert!(z.is_leftmost());
		assert!(z.is_rightmost());
		assert_eq!(r(1, vec![r(2, vec![l(5), l(6)])]), z.to_standard_tree());

		// and finally the parent
		let z = z.delete().unwrap();
		assert!(z.is_root());
		assert_eq!(&l(1), z.focus());
	}

	#[test]
	fn test_persistence() {
		let z = Zipper::from_standard_tree(sample()).go_down().unwrap();
		let edited = z.set_value(99).insert_right(l(100)).unwrap();
		assert_eq!(&2, z.get_value());
		assert_eq!(sample(), z.to_standard_tree());
		assert_eq!(4, edited.to_standard_tree().children().len());
	}

	#[test]
	fn test_adapter() {
		let doc = h("intro", vec![h("why", vec![]), h("how", vec![h("install", vec![])])]);
		let z = Zipper::from_tree(&OutlineAdapter, doc.clone());
		assert_eq!(4, z.focus().size());
		assert_eq!(doc, z.to_tree(&OutlineAdapter));

		let z = z.go_down().unwrap().go_right().unwrap();
		assert_eq!(h("how", vec![h("install", vec![])]), z.get_tree(&OutlineAdapter));
		let z = z.set_tree(&OutlineAdapter, h("usage", vec![]));
		assert!(z.is_leaf());
		assert_eq!(
			h("intro", vec![h("why", vec![]), h("usage", vec![])]),
			z.to_tree(&OutlineAdapter)
		);
	}

	#[test]
	fn test_deep_tree() {
		let mut t = l(0);
		for i in 1..100_000 {
			t = r(i, vec![t]);
		}
		let mut z = Zipper::from_standard_tree(t);
		while let Ok(down) = z.go_down() {
			z = down;
		}
		assert_eq!(&0, z.get_value());
		let t = z.set_value(1).to_standard_tree();
		assert_eq!(100_000, t.size());
	}

	#[test]
	fn test_deep_equality() {
		use std::collections::hash_map::DefaultHasher;
		use std::hash::{Hash, Hasher};

		fn chain(bottom: u32) -> RoseTree<u32> {
			let mut t = l(bottom);
			for i in 1..200_000 {
				t = r(i, vec![t, l(0)]);
			}
			t
		}
		fn hash_of(t: &RoseTree<u32>) -> u64 {
			let mut h = DefaultHasher::new();
			t.hash(&mut h);
			h.finish()
		}

		let a = chain(0);
		let b = chain(0);
		assert_eq!(Zipper::from_standard_tree(a.clone()).to_standard_tree(), b);
		assert_eq!(hash_of(&a), hash_of(&b));
		assert_ne!(a, chain(1));
		assert_ne!(a, r(199_999, vec![]));
	}

	#[test]
	fn test_random() {
		let mut rng = StdRng::seed_from_u64(0xbeef);
		for _ in 0..100 {
			let t = random_tree(&mut rng, 30);
			let root = Zipper::from_standard_tree(t.clone());
			assert_eq!(t, root.to_standard_tree());
			if let Ok(down) = root.go_down() {
				assert_eq!(root, down.go_up().unwrap());
			}

			let mut z = root.clone();
			for _ in 0..8 {
				let next = match rng.gen_range(0..3) {
					0 => z.go_down(),
					1 => z.go_left(),
					_ => z.go_right(),
				};
				if let Ok(moved) = next {
					z = moved;
				}
			}
			assert_eq!(t, z.to_standard_tree());

			if z.is_root() {
				assert_matches!(z.delete(), Err(NotFound));
				continue;
			}
			let d = z.delete().unwrap();
			assert_eq!(t.size() - z.focus().size(), d.to_standard_tree().size());
			if !z.is_rightmost() {
				assert_eq!(z.go_right().unwrap().get_value(), d.get_value());
				assert_eq!(z.depth(), d.depth());
			} else if !z.is_leftmost() {
				assert_eq!(z.go_left().unwrap().get_value(), d.get_value());
				assert_eq!(z.depth(), d.depth());
			} else {
				assert_eq!(z.go_up().unwrap().get_value(), d.get_value());
				assert!(d.is_leaf());
			}
		}
	}
}
