//! Cooperative cancellation shared by the workers of one search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancellation flag.
///
/// A child token observes its parent: cancelling the parent cancels every
/// child, while cancelling a child leaves the parent untouched. The
/// scheduler uses a child to stop sibling quadrants after a first match
/// without cancelling the caller's token.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    parent: Option<Arc<AtomicBool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self
                .parent
                .as_ref()
                .is_some_and(|p| p.load(Ordering::Relaxed))
    }

    /// Creates a token that is cancelled when either it or `self` is.
    ///
    /// Only one level of nesting is tracked; a child of a child observes its
    /// direct parent's own flag, not the grandparent's.
    pub(crate) fn child(&self) -> CancelToken {
        CancelToken {
            flag: Arc::new(AtomicBool::new(self.is_cancelled())),
            parent: Some(Arc::clone(&self.flag)),
        }
    }
}
