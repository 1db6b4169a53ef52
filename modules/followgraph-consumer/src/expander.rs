use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{info, warn};

use followgraph_common::{Lifecycle, RetryForever, RetryPolicy};
use twitter_client::{FriendIdsPage, TwitterError, FIRST_CURSOR};

use crate::error::ExpandError;
use crate::traits::FriendSource;

/// Lazy, pull-based stream of the accounts one user follows.
///
/// Pages are requested on demand: each `next()` yields one followee id in
/// page order, fetching the following page only once the current one is
/// drained. A full page is buffered and the cursor advanced before any id
/// is yielded, so whatever the caller does between items cannot corrupt
/// cursor state or skip a page.
///
/// The stream is not restartable across a process crash; replaying the
/// originating event re-derives it from the first page.
pub struct Followees<'a> {
    api: &'a dyn FriendSource,
    lifecycle: Lifecycle,
    retry: Arc<dyn RetryPolicy>,
    user_id: i64,
    cursor: i64,
    buffered: VecDeque<i64>,
    done: bool,
}

impl<'a> Followees<'a> {
    pub fn new(api: &'a dyn FriendSource, lifecycle: Lifecycle, user_id: i64) -> Self {
        Self {
            api,
            lifecycle,
            retry: Arc::new(RetryForever),
            user_id,
            cursor: FIRST_CURSOR,
            buffered: VecDeque::new(),
            done: false,
        }
    }

    pub fn with_retry_policy(mut self, retry: Arc<dyn RetryPolicy>) -> Self {
        self.retry = retry;
        self
    }

    /// The next followee id, or `None` once the listing is exhausted.
    ///
    /// A vanished account (deleted/restricted) ends the stream early with
    /// `Ok(None)`; it is a normal outcome, not a fault. The only error the
    /// production configuration can return is the closed signal.
    pub async fn next(&mut self) -> Result<Option<i64>, ExpandError> {
        loop {
            if let Some(id) = self.buffered.pop_front() {
                return Ok(Some(id));
            }
            if self.done {
                return Ok(None);
            }

            match self.fetch_page().await? {
                Some(page) => {
                    self.done = page.is_last();
                    self.cursor = page.next_cursor;
                    self.buffered.extend(page.ids);
                }
                None => {
                    // Account gone: zero further yields.
                    self.done = true;
                }
            }
        }
    }

    /// Request the page at the current cursor until it arrives, the target
    /// turns out to be gone (`Ok(None)`), or the lifecycle closes.
    async fn fetch_page(&self) -> Result<Option<FriendIdsPage>, ExpandError> {
        let mut attempt = 0u32;
        loop {
            self.lifecycle.guard()?;

            match self.api.friend_ids(self.user_id, self.cursor).await {
                Ok(page) => return Ok(Some(page)),
                Err(TwitterError::RateLimited { reset }) => {
                    // Not a fault: wait out the window, then re-request
                    // the same cursor.
                    info!(
                        user_id = self.user_id,
                        reset_secs = reset.as_secs(),
                        "Rate limited, waiting for reset"
                    );
                    self.lifecycle.sleep(reset).await?;
                }
                Err(TwitterError::NotFound) => {
                    info!(
                        user_id = self.user_id,
                        "Account no longer resolvable, stopping expansion"
                    );
                    return Ok(None);
                }
                Err(err) => {
                    attempt += 1;
                    warn!(
                        user_id = self.user_id,
                        cursor = self.cursor,
                        error = %err,
                        attempt,
                        "Friend ids request failed, retrying same page"
                    );
                    match self.retry.next_delay(attempt) {
                        Some(delay) if !delay.is_zero() => self.lifecycle.sleep(delay).await?,
                        Some(_) => {}
                        None => return Err(err.into()),
                    }
                }
            }
        }
    }
}
