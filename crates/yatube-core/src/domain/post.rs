use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Group, User};

/// Post entity - a text entry written by a user.
///
/// `author_id` is fixed when the post is created; only `text` and
/// `group_id` change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub author_id: i64,
    pub group_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Apply validated form values in place.
    pub fn apply(&mut self, draft: PostDraft) {
        self.text = draft.text;
        self.group_id = draft.group_id;
    }

    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: String,
    pub author_id: i64,
    pub group_id: Option<i64>,
}

impl NewPost {
    pub fn new(author_id: i64, draft: PostDraft) -> Self {
        Self {
            text: draft.text,
            author_id,
            group_id: draft.group_id,
        }
    }
}

/// Cleaned values of a valid post form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub text: String,
    pub group_id: Option<i64>,
}

/// A post together with its resolved author and group, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostEntry {
    pub post: Post,
    pub author: User,
    pub group: Option<Group>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            id: 1,
            text: "first".to_string(),
            author_id: 7,
            group_id: Some(3),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_keeps_author_and_id() {
        let mut post = post();
        post.apply(PostDraft {
            text: "second".to_string(),
            group_id: None,
        });

        assert_eq!(post.id, 1);
        assert_eq!(post.author_id, 7);
        assert_eq!(post.text, "second");
        assert_eq!(post.group_id, None);
    }

    #[test]
    fn test_is_authored_by() {
        let post = post();
        assert!(post.is_authored_by(7));
        assert!(!post.is_authored_by(8));
    }
}
