pub mod config;
pub mod error;
pub mod lifecycle;
pub mod retry;
pub mod types;

pub use config::Config;
pub use error::Closed;
pub use lifecycle::Lifecycle;
pub use retry::{FixedDelay, GiveUpAfter, RetryForever, RetryPolicy};
pub use types::{Post, TwitterUser};
