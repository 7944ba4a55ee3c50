//! Persistent zippers
//!
//! A zipper is a cursor into an immutable structure together with the
//! context needed to rebuild the whole structure around it. Moving the
//! cursor and editing at it are cheap, and every operation returns a
//! new zipper, leaving earlier ones valid and shareable.
//!
//! - `list::Zipper`, a cursor over a sequence
//! - `tree::Zipper`, a cursor over a binary tree with empty leaves
//! - `rose_tree::Zipper`, a cursor over a tree with ordered children
//!
//! Operations that don't apply at the current focus return `NotFound`.
//!
//! ```
//! use zippers::list::Zipper;
//!
//! let z = Zipper::from_list(vec![1, 2, 3]);
//! let z = z.go_right().unwrap().set(20).unwrap();
//! assert_eq!(vec![1, 20, 3], z.to_list());
//! ```

pub mod error;
pub mod list;
pub mod rose_tree;
pub mod stack;
pub mod tree;

pub use crate::error::{NotFound, Result};
pub use crate::rose_tree::{RoseTree, RoseTreeAdapter};
pub use crate::stack::Stack;
pub use crate::tree::{Tree, TreeAdapter};
