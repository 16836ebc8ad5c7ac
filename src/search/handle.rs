//! Background searches with a cancellable handle.

use crate::buffer::PixelBuffer;
use crate::search::cancel::CancelToken;
use crate::search::quadrant::panic_message;
use crate::search::{FindConfig, Finder, Match};
use crate::util::{FindError, FindResult};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Handle to a search running on its own thread.
///
/// Dropping the handle without joining cancels the search; the thread
/// stops at its next cancellation check and its result is discarded.
pub struct SearchHandle<T> {
    cancel: CancelToken,
    thread: Option<JoinHandle<FindResult<T>>>,
}

impl<T> SearchHandle<T> {
    /// Asks the search to stop. Partial results are still delivered by
    /// [`SearchHandle::join`].
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token shared with the running search.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Blocks until the search ends and returns its result.
    pub fn join(mut self) -> FindResult<T> {
        let thread = self.thread.take().ok_or_else(|| FindError::SearchAborted {
            reason: "search already joined".to_string(),
        })?;
        thread.join().unwrap_or_else(|payload| {
            Err(FindError::SearchAborted {
                reason: panic_message(payload.as_ref()),
            })
        })
    }
}

impl<T> Drop for SearchHandle<T> {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.cancel.cancel();
        }
    }
}

fn spawn<T, F>(work: F) -> FindResult<SearchHandle<T>>
where
    T: Send + 'static,
    F: FnOnce(&CancelToken) -> FindResult<T> + Send + 'static,
{
    let cancel = CancelToken::new();
    let token = cancel.clone();
    let thread = thread::Builder::new()
        .name("pixelfind-search".to_string())
        .spawn(move || work(&token))
        .map_err(|err| FindError::SearchAborted {
            reason: err.to_string(),
        })?;
    Ok(SearchHandle {
        cancel,
        thread: Some(thread),
    })
}

/// Starts a first-match search in the background.
pub fn spawn_find(
    source: Arc<PixelBuffer>,
    target: Arc<PixelBuffer>,
    cfg: FindConfig,
) -> FindResult<SearchHandle<Option<Match>>> {
    spawn(move |cancel| {
        Finder::new(&target)
            .with_config(cfg)
            .find_with_cancel(&source, cancel)
    })
}

/// Starts an all-matches search in the background.
pub fn spawn_find_all(
    source: Arc<PixelBuffer>,
    target: Arc<PixelBuffer>,
    cfg: FindConfig,
) -> FindResult<SearchHandle<Vec<Match>>> {
    spawn(move |cancel| {
        Finder::new(&target)
            .with_config(cfg)
            .find_all_with_cancel(&source, cancel)
    })
}
