pub mod error;
pub mod types;

pub use error::{Result, TwitterError};
pub use types::{FriendIdsPage, FIRST_CURSOR};

use std::time::Duration;

const BASE_URL: &str = "https://api.twitter.com/1.1";

/// Header carrying the epoch second at which the rate-limit window resets.
const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

/// Pause applied when a 429 arrives without a usable reset header.
const DEFAULT_RATE_LIMIT_PAUSE: Duration = Duration::from_secs(60);

/// Client for the Twitter REST API.
///
/// Only classifies responses; it never sleeps and never retries. Rate
/// limits surface as [`TwitterError::RateLimited`] with the reported
/// reset delay, and the caller decides how to wait.
pub struct TwitterClient {
    client: reqwest::Client,
    bearer_token: String,
    base_url: String,
}

impl TwitterClient {
    pub fn new(bearer_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            bearer_token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the API host, e.g. for a local stub server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Fetch one page of the accounts `user_id` follows.
    ///
    /// Pass [`FIRST_CURSOR`] for the first page and the returned
    /// `next_cursor` thereafter.
    pub async fn friend_ids(&self, user_id: i64, cursor: i64) -> Result<FriendIdsPage> {
        let url = format!("{}/friends/ids.json", self.base_url);
        tracing::debug!(user_id, cursor, "Requesting friend ids page");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(&[("user_id", user_id), ("cursor", cursor)])
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 429 {
            let reset = resp
                .headers()
                .get(RATE_LIMIT_RESET_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(|v| reset_delay(v, chrono::Utc::now().timestamp()))
                .unwrap_or(DEFAULT_RATE_LIMIT_PAUSE);
            return Err(TwitterError::RateLimited { reset });
        }
        if status.as_u16() == 404 {
            return Err(TwitterError::NotFound);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let page: FriendIdsPage = resp.json().await?;
        Ok(page)
    }
}

/// How long until the epoch second in `header` is reached. A reset in the
/// past or a garbled header falls back to the default pause so a 429 can
/// never turn into a busy-loop.
fn reset_delay(header: &str, now_epoch: i64) -> Duration {
    match header.trim().parse::<i64>() {
        Ok(reset_epoch) if reset_epoch > now_epoch => {
            Duration::from_secs((reset_epoch - now_epoch) as u64)
        }
        Ok(_) => Duration::ZERO,
        Err(_) => DEFAULT_RATE_LIMIT_PAUSE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_delay_counts_down_to_the_reported_epoch() {
        assert_eq!(reset_delay("1000", 990), Duration::from_secs(10));
    }

    #[test]
    fn reset_in_the_past_means_no_wait() {
        assert_eq!(reset_delay("980", 990), Duration::ZERO);
    }

    #[test]
    fn garbled_header_falls_back_to_default_pause() {
        assert_eq!(reset_delay("soon", 990), DEFAULT_RATE_LIMIT_PAUSE);
    }
}
