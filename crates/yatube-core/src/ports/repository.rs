use async_trait::async_trait;

use crate::domain::{Group, NewGroup, NewPost, NewUser, Post, User};
use crate::error::RepoError;

/// Generic repository trait shared by every entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// User repository with lookups by username.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Fetch every user whose id is in `ids`. Unknown ids are skipped.
    async fn find_many(&self, ids: &[i64]) -> Result<Vec<User>, RepoError>;

    /// Store a new user. Fails with [`RepoError::Constraint`] on a taken username.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Group repository.
#[async_trait]
pub trait GroupRepository: BaseRepository<Group, i64> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    /// Fetch every group whose id is in `ids`. Unknown ids are skipped.
    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Group>, RepoError>;

    /// All groups ordered by title.
    async fn all(&self) -> Result<Vec<Group>, RepoError>;

    /// Store a new group. Fails with [`RepoError::Constraint`] on a taken slug.
    async fn create(&self, group: NewGroup) -> Result<Group, RepoError>;
}

/// Which posts a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Group(i64),
    Author(i64),
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match *self {
            PostFilter::All => true,
            PostFilter::Group(group_id) => post.group_id == Some(group_id),
            PostFilter::Author(author_id) => post.author_id == author_id,
        }
    }
}

/// Post repository.
///
/// Listings are ordered newest first: `created_at` descending, then `id`
/// descending.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError>;

    async fn list(
        &self,
        filter: PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Persist the `text` and `group_id` of an existing post.
    async fn update(&self, post: &Post) -> Result<Post, RepoError>;
}
