//! Binary Tree Zipper
//! - a cursor within a persistent, arbitrary binary tree
//! - the thread records, for each step down, which side was taken
//!   along with the parent's value and the untaken sibling
//! - leaves are empty markers; they can be focused only by editing,
//!   never by moving down into them
//!
//! Subtrees are reference counted, so rebuilding a path back to the
//! root shares every sibling that was not touched.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{refuse, Result};
use crate::stack::Stack;

/// A persistent binary tree, either empty or a node with two branches
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Tree<T> {
	Leaf,
	Node(Rc<Node<T>>),
}

/// The data at a non-empty position of a `Tree`
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node<T> {
	pub value: T,
	pub left: Tree<T>,
	pub right: Tree<T>,
}

impl<T> Clone for Tree<T> {
	fn clone(&self) -> Self {
		match *self {
			Tree::Leaf => Tree::Leaf,
			Tree::Node(ref n) => Tree::Node(n.clone()),
		}
	}
}

// Equality and hashing walk the tree with a work list, like `Drop`.
impl<T: PartialEq> PartialEq for Tree<T> {
	fn eq(&self, other: &Self) -> bool {
		let mut todo = vec![(self, other)];
		while let Some(pair) = todo.pop() {
			match pair {
				(Tree::Leaf, Tree::Leaf) => {}
				(Tree::Node(a), Tree::Node(b)) => {
					if a.value != b.value {
						return false;
					}
					todo.push((&a.right, &b.right));
					todo.push((&a.left, &b.left));
				}
				_ => return false,
			}
		}
		true
	}
}
impl<T: Eq> Eq for Tree<T> {}

impl<T: Hash> Hash for Tree<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		let mut todo = vec![self];
		while let Some(t) = todo.pop() {
			match *t {
				Tree::Leaf => state.write_u8(0),
				Tree::Node(ref n) => {
					state.write_u8(1);
					n.value.hash(state);
					todo.push(&n.right);
					todo.push(&n.left);
				}
			}
		}
	}
}

impl<T: PartialEq> PartialEq for Node<T> {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value && self.left == other.left && self.right == other.right
	}
}
impl<T: Eq> Eq for Node<T> {}

impl<T: Hash> Hash for Node<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.value.hash(state);
		self.left.hash(state);
		self.right.hash(state);
	}
}

impl<T> Default for Tree<T> {
	fn default() -> Self {
		Tree::Leaf
	}
}

impl<T> Tree<T> {
	/// the empty tree
	pub fn leaf() -> Self {
		Tree::Leaf
	}

	pub fn node(value: T, left: Tree<T>, right: Tree<T>) -> Self {
		Tree::Node(Rc::new(Node { value, left, right }))
	}

	/// a node with two empty branches
	pub fn singleton(value: T) -> Self {
		Tree::node(value, Tree::Leaf, Tree::Leaf)
	}

	pub fn is_leaf(&self) -> bool {
		match *self {
			Tree::Leaf => true,
			Tree::Node(_) => false,
		}
	}

	/// peek at the data at the top of the tree
	pub fn value(&self) -> Option<&T> {
		match *self {
			Tree::Leaf => None,
			Tree::Node(ref n) => Some(&n.value),
		}
	}

	/// the left branch, if this is a node
	pub fn left(&self) -> Option<&Tree<T>> {
		match *self {
			Tree::Leaf => None,
			Tree::Node(ref n) => Some(&n.left),
		}
	}

	/// the right branch, if this is a node
	pub fn right(&self) -> Option<&Tree<T>> {
		match *self {
			Tree::Leaf => None,
			Tree::Node(ref n) => Some(&n.right),
		}
	}

	/// number of nodes, not counting leaves
	pub fn size(&self) -> usize {
		let mut count = 0;
		let mut todo = vec![self];
		while let Some(t) = todo.pop() {
			if let Tree::Node(ref n) = *t {
				count += 1;
				todo.push(&n.left);
				todo.push(&n.right);
			}
		}
		count
	}
}

// Deep trees are torn down with an explicit work list instead of
// nested drops.
impl<T> Drop for Node<T> {
	fn drop(&mut self) {
		let mut todo = Vec::new();
		for branch in [&mut self.left, &mut self.right] {
			if let Tree::Node(child) = std::mem::take(branch) {
				todo.push(child);
			}
		}
		while let Some(n) = todo.pop() {
			if let Ok(mut node) = Rc::try_unwrap(n) {
				for branch in [&mut node.left, &mut node.right] {
					if let Tree::Node(child) = std::mem::take(branch) {
						todo.push(child);
					}
				}
			}
		}
	}
}

/// Converts between a caller's own binary tree type and `Tree`
///
/// A node without a value is the caller's version of an empty leaf.
/// The zipper walks the caller's tree through `get_children`, where
/// `None` stands for an empty branch. In the other direction
/// `build_node` is handed the standard branches of the node, `None`
/// again for an empty one, and raises them itself.
pub trait TreeAdapter<T> {
	type Node;

	fn get_value(&self, node: &Self::Node) -> Option<T>;
	fn get_children(&self, node: &Self::Node) -> (Option<Self::Node>, Option<Self::Node>);
	fn build_node(&self, value: Option<T>, children: (Option<Tree<T>>, Option<Tree<T>>)) -> Self::Node;
}

enum Lower<N, T> {
	Visit(N),
	Leaf,
	Build(T),
}

/// converts a caller's tree into a standard tree
fn lower<T, A: TreeAdapter<T>>(adapter: &A, node: A::Node) -> Tree<T> {
	let mut todo = vec![Lower::Visit(node)];
	let mut done: Vec<Tree<T>> = Vec::new();
	while let Some(task) = todo.pop() {
		match task {
			Lower::Leaf => done.push(Tree::Leaf),
			Lower::Visit(n) => match adapter.get_value(&n) {
				None => done.push(Tree::Leaf),
				Some(value) => {
					let (l, r) = adapter.get_children(&n);
					todo.push(Lower::Build(value));
					todo.push(r.map_or(Lower::Leaf, Lower::Visit));
					todo.push(l.map_or(Lower::Leaf, Lower::Visit));
				}
			},
			Lower::Build(value) => {
				let right = done.pop().unwrap_or_default();
				let left = done.pop().unwrap_or_default();
				done.push(Tree::node(value, left, right));
			}
		}
	}
	done.pop().unwrap_or_default()
}

/// converts a standard tree into the caller's tree type
fn raise<T: Clone, A: TreeAdapter<T>>(adapter: &A, tree: &Tree<T>) -> A::Node {
	fn branch<T>(t: &Tree<T>) -> Option<Tree<T>> {
		match *t {
			Tree::Leaf => None,
			Tree::Node(_) => Some(t.clone()),
		}
	}
	match *tree {
		Tree::Leaf => adapter.build_node(None, (None, None)),
		Tree::Node(ref n) => adapter.build_node(Some(n.value.clone()), (branch(&n.left), branch(&n.right))),
	}
}

/// one step down the tree: the side taken, the parent's value and
/// the sibling that was not taken
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Choice<T> {
	Left(T, Tree<T>),
	Right(T, Tree<T>),
}

impl<T> Choice<T> {
	/// rebuilds the parent around the subtree that was taken
	fn rewrap(&self, focus: Tree<T>) -> Tree<T>
	where
		T: Clone,
	{
		match *self {
			Choice::Left(ref value, ref sibling) => Tree::node(value.clone(), focus, sibling.clone()),
			Choice::Right(ref value, ref sibling) => Tree::node(value.clone(), sibling.clone(), focus),
		}
	}
}

/// zipper over a binary tree, focused on one of its subtrees
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Zipper<T> {
	thread: Stack<Choice<T>>,
	focus: Tree<T>,
}

impl<T> From<Tree<T>> for Zipper<T> {
	fn from(tree: Tree<T>) -> Self {
		Zipper::from_standard_tree(tree)
	}
}

impl<T> Zipper<T> {
	/// creates a zipper focused on the root of the tree
	pub fn from_standard_tree(tree: Tree<T>) -> Self {
		Zipper {
			thread: Stack::new(),
			focus: tree,
		}
	}

	/// the focused subtree
	pub fn focus(&self) -> &Tree<T> {
		&self.focus
	}

	/// peek at the value of the focused node
	pub fn get_value(&self) -> Result<&T> {
		self.focus.value().ok_or_else(|| refuse("tree::get_value"))
	}

	pub fn is_root(&self) -> bool {
		self.thread.is_empty()
	}

	/// true when the focus is an empty leaf
	pub fn is_leaf(&self) -> bool {
		self.focus.is_leaf()
	}

	/// distance from the root to the focus
	pub fn depth(&self) -> usize {
		self.thread.len()
	}

	/// replaces the focused subtree with whatever `f` makes of it
	///
	/// This is the only edit that can turn a leaf into a node and back.
	pub fn upsert<F>(&self, f: F) -> Self
	where
		F: FnOnce(&Tree<T>) -> Tree<T>,
	{
		Zipper {
			thread: self.thread.clone(),
			focus: f(&self.focus),
		}
	}

	/// creates a zipper from a tree of the adapter's node type
	pub fn from_tree<A: TreeAdapter<T>>(adapter: &A, node: A::Node) -> Self {
		Zipper::from_standard_tree(lower(adapter, node))
	}

	/// replaces the focused subtree with a tree of the adapter's node type
	pub fn set_tree<A: TreeAdapter<T>>(&self, adapter: &A, node: A::Node) -> Self {
		Zipper {
			thread: self.thread.clone(),
			focus: lower(adapter, node),
		}
	}
}

impl<T: Clone> Zipper<T> {
	/// rebuilds the whole tree, folding the thread back around the focus
	pub fn to_standard_tree(&self) -> Tree<T> {
		self.thread.iter().fold(self.focus.clone(), |focus, choice| choice.rewrap(focus))
	}

	/// the whole tree, in the adapter's node type
	pub fn to_tree<A: TreeAdapter<T>>(&self, adapter: &A) -> A::Node {
		raise(adapter, &self.to_standard_tree())
	}

	/// the focused subtree, in the adapter's node type
	pub fn get_tree<A: TreeAdapter<T>>(&self, adapter: &A) -> A::Node {
		raise(adapter, &self.focus)
	}

	/// replaces the focused node with one built from its parts,
	/// refusing when the focus is a leaf
	fn edit_node<F>(&self, op: &'static str, f: F) -> Result<Self>
	where
		F: FnOnce(&Node<T>) -> Node<T>,
	{
		match self.focus {
			Tree::Leaf => Err(refuse(op)),
			Tree::Node(ref n) => Ok(Zipper {
				thread: self.thread.clone(),
				focus: Tree::Node(Rc::new(f(&**n))),
			}),
		}
	}

	/// replaces the value of the focused node, keeping its branches
	pub fn set_value(&self, value: T) -> Result<Self> {
		self.edit_node("tree::set_value", |n| Node {
			value,
			left: n.left.clone(),
			right: n.right.clone(),
		})
	}

	/// transforms the value of the focused node, keeping its branches
	pub fn update<F>(&self, f: F) -> Result<Self>
	where
		F: FnOnce(&T) -> T,
	{
		self.edit_node("tree::update", |n| Node {
			value: f(&n.value),
			left: n.left.clone(),
			right: n.right.clone(),
		})
	}

	pub fn set_left(&self, tree: Tree<T>) -> Result<Self> {
		self.edit_node("tree::set_left", |n| Node {
			value: n.value.clone(),
			left: tree,
			right: n.right.clone(),
		})
	}

	pub fn set_right(&self, tree: Tree<T>) -> Result<Self> {
		self.edit_node("tree::set_right", |n| Node {
			value: n.value.clone(),
			left: n.left.clone(),
			right: tree,
		})
	}

	/// empties the left branch of the focused node
	pub fn delete_left(&self) -> Result<Self> {
		self.set_left(Tree::Leaf)
	}

	/// empties the right branch of the focused node
	pub fn delete_right(&self) -> Result<Self> {
		self.set_right(Tree::Leaf)
	}

	/// empties the focused position and moves up to its parent
	///
	/// The root position itself can't be deleted.
	pub fn delete(&self) -> Result<Self> {
		match self.thread.pop() {
			Some((choice, thread)) => Ok(Zipper {
				thread,
				focus: choice.rewrap(Tree::Leaf),
			}),
			None => Err(refuse("tree::delete")),
		}
	}

	/// moves the cursor into the left branch, which must be a node
	pub fn go_left(&self) -> Result<Self> {
		match self.focus {
			Tree::Node(ref n) if !n.left.is_leaf() => Ok(Zipper {
				thread: self.thread.push(Choice::Left(n.value.clone(), n.right.clone())),
				focus: n.left.clone(),
			}),
			_ => Err(refuse("tree::go_left")),
		}
	}

	/// moves the cursor into the right branch, which must be a node
	pub fn go_right(&self) -> Result<Self> {
		match self.focus {
			Tree::Node(ref n) if !n.right.is_leaf() => Ok(Zipper {
				thread: self.thread.push(Choice::Right(n.value.clone(), n.left.clone())),
				focus: n.right.clone(),
			}),
			_ => Err(refuse("tree::go_right")),
		}
	}

	/// moves the cursor up towards the root
	pub fn go_up(&self) -> Result<Self> {
		match self.thread.pop() {
			Some((choice, thread)) => Ok(Zipper {
				thread,
				focus: choice.rewrap(self.focus.clone()),
			}),
			None => Err(refuse("tree::go_up")),
		}
	}

	/// moves the cursor all the way up to the root
	pub fn go_root(&self) -> Self {
		Zipper::from_standard_tree(self.to_standard_tree())
	}
}
