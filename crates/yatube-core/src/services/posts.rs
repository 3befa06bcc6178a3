//! Post listing, creation and editing.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Group, NewPost, Post, PostEntry, User};
use crate::error::DomainError;
use crate::forms::PostForm;
use crate::pagination::{Page, Paginator};
use crate::ports::{GroupRepository, PostFilter, PostRepository, UserRepository};

/// A group together with one page of its posts.
#[derive(Debug, Clone)]
pub struct GroupFeed {
    pub group: Group,
    pub page: Page<PostEntry>,
}

/// An author together with one page of their posts and their total post count.
#[derive(Debug, Clone)]
pub struct ProfileFeed {
    pub author: User,
    pub page: Page<PostEntry>,
    pub posts_count: u64,
}

/// Result of submitting the creation form.
#[derive(Debug, Clone)]
pub enum CreateOutcome {
    Created(Post),
    Invalid(PostForm),
}

/// Result of an edit attempt on an existing post.
#[derive(Debug, Clone)]
pub enum EditOutcome {
    /// The actor is not the author. Nothing was changed.
    NotAuthor,
    /// The form to show: pre-filled on first visit, with errors after a bad submission.
    Form { post: Post, form: PostForm },
    Updated(Post),
}

/// Reads and writes posts on behalf of request handlers.
pub struct PostService {
    users: Arc<dyn UserRepository>,
    groups: Arc<dyn GroupRepository>,
    posts: Arc<dyn PostRepository>,
    paginator: Paginator,
}

impl PostService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        groups: Arc<dyn GroupRepository>,
        posts: Arc<dyn PostRepository>,
        paginator: Paginator,
    ) -> Self {
        Self {
            users,
            groups,
            posts,
            paginator,
        }
    }

    /// Global feed.
    pub async fn index(&self, page: Option<&str>) -> Result<Page<PostEntry>, DomainError> {
        self.feed(PostFilter::All, page).await
    }

    /// Posts of the group identified by `slug`.
    pub async fn group_feed(&self, slug: &str, page: Option<&str>) -> Result<GroupFeed, DomainError> {
        let group = self
            .groups
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("group", slug))?;

        let page = self.feed(PostFilter::Group(group.id), page).await?;
        Ok(GroupFeed { group, page })
    }

    /// Posts written by `username`.
    pub async fn profile_feed(
        &self,
        username: &str,
        page: Option<&str>,
    ) -> Result<ProfileFeed, DomainError> {
        let author = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let page = self.feed(PostFilter::Author(author.id), page).await?;
        let posts_count = page.count;
        Ok(ProfileFeed {
            author,
            page,
            posts_count,
        })
    }

    /// A single post with its author and group.
    pub async fn detail(&self, post_id: i64) -> Result<PostEntry, DomainError> {
        let post = self.find_post(post_id).await?;
        let mut entries = self.resolve(vec![post]).await?;
        entries
            .pop()
            .ok_or_else(|| DomainError::Internal(format!("post {post_id} lost its author")))
    }

    /// Number of posts written by `author_id`.
    pub async fn posts_count(&self, author_id: i64) -> Result<u64, DomainError> {
        Ok(self.posts.count(PostFilter::Author(author_id)).await?)
    }

    /// An empty creation form.
    pub async fn blank_form(&self) -> Result<PostForm, DomainError> {
        Ok(PostForm::unbound(self.groups.all().await?))
    }

    /// Validate submitted values and store a new post written by `author_id`.
    pub async fn create(
        &self,
        author_id: i64,
        text: String,
        group: String,
    ) -> Result<CreateOutcome, DomainError> {
        let form = PostForm::bind(text, group, self.groups.all().await?);
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(form) => return Ok(CreateOutcome::Invalid(form)),
        };

        let post = self.posts.create(NewPost::new(author_id, draft)).await?;
        Ok(CreateOutcome::Created(post))
    }

    /// Show the edit form of `post_id` to `actor_id`.
    pub async fn edit_form(&self, actor_id: i64, post_id: i64) -> Result<EditOutcome, DomainError> {
        let post = self.find_post(post_id).await?;
        if !post.is_authored_by(actor_id) {
            return Ok(EditOutcome::NotAuthor);
        }

        let form = PostForm::for_post(&post, self.groups.all().await?);
        Ok(EditOutcome::Form { post, form })
    }

    /// Apply submitted values to `post_id` if `actor_id` wrote it.
    ///
    /// Posts are only ever changed by their author; every other actor gets
    /// [`EditOutcome::NotAuthor`] and the stored post is left untouched.
    pub async fn edit(
        &self,
        actor_id: i64,
        post_id: i64,
        text: String,
        group: String,
    ) -> Result<EditOutcome, DomainError> {
        let mut post = self.find_post(post_id).await?;
        if !post.is_authored_by(actor_id) {
            return Ok(EditOutcome::NotAuthor);
        }

        let form = PostForm::bind(text, group, self.groups.all().await?);
        match form.validate() {
            Ok(draft) => {
                post.apply(draft);
                let post = self.posts.update(&post).await?;
                Ok(EditOutcome::Updated(post))
            }
            Err(form) => Ok(EditOutcome::Form { post, form }),
        }
    }

    async fn find_post(&self, post_id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    async fn feed(&self, filter: PostFilter, page: Option<&str>) -> Result<Page<PostEntry>, DomainError> {
        let count = self.posts.count(filter).await?;
        let window = self.paginator.window(count, page);
        let posts = self.posts.list(filter, window.offset, window.limit).await?;
        let entries = self.resolve(posts).await?;
        Ok(self.paginator.page(entries, window, count))
    }

    /// Attach authors and groups to `posts` with one lookup per table.
    async fn resolve(&self, posts: Vec<Post>) -> Result<Vec<PostEntry>, DomainError> {
        let mut author_ids: Vec<i64> = posts.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let mut group_ids: Vec<i64> = posts.iter().filter_map(|p| p.group_id).collect();
        group_ids.sort_unstable();
        group_ids.dedup();

        let authors: HashMap<i64, User> = self
            .users
            .find_many(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let groups: HashMap<i64, Group> = self
            .groups
            .find_many(&group_ids)
            .await?
            .into_iter()
            .map(|g| (g.id, g))
            .collect();

        posts
            .into_iter()
            .map(|post| {
                let author = authors.get(&post.author_id).cloned().ok_or_else(|| {
                    DomainError::Internal(format!(
                        "post {} references missing author {}",
                        post.id, post.author_id
                    ))
                })?;
                let group = post.group_id.and_then(|id| groups.get(&id).cloned());
                Ok(PostEntry {
                    post,
                    author,
                    group,
                })
            })
            .collect()
    }
}
