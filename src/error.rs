//! The one failure every zipper operation can report.
//!
//! All refusals come from the shape of the zipper (an empty focus, a
//! root without a parent, a leaf without children), so there is
//! nothing to distinguish between them and nothing to retry.

use log::trace;

/// An operation that does not apply at the current focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("zipper operation is not applicable at the current focus")]
pub struct NotFound;

/// Result of a zipper operation that may be refused
pub type Result<T> = std::result::Result<T, NotFound>;

/// records a refused operation and produces the error for it
pub(crate) fn refuse(op: &'static str) -> NotFound {
	trace!("{} refused", op);
	NotFound
}
