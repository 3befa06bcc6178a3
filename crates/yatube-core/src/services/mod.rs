//! Application services built on top of the ports.

mod posts;

pub use posts::{CreateOutcome, EditOutcome, GroupFeed, PostService, ProfileFeed};
