pub mod error;
pub mod expander;
pub mod orchestrator;
pub mod testing;
pub mod traits;

pub use error::{ConsumerError, ExpandError};
pub use expander::Followees;
pub use orchestrator::{Orchestrator, Outcome};
pub use traits::{FollowStore, FriendSource, UserStore};
