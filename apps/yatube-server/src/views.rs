//! Named views: the template each page renders and the context it gets.

use yatube_core::Page;
use yatube_core::domain::{Group, Post, PostEntry, User};
use yatube_core::forms::{FormErrors, PostForm};

/// Username and errors of a submitted login or signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountForm {
    pub username: String,
    pub errors: FormErrors,
}

impl AccountForm {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            errors: FormErrors::default(),
        }
    }
}

/// A page to render. Handlers attach it to their response so it can be
/// inspected after rendering.
#[derive(Debug, Clone)]
pub enum View {
    Index {
        page_obj: Page<PostEntry>,
    },
    GroupList {
        group: Group,
        page_obj: Page<PostEntry>,
    },
    Profile {
        author: User,
        page_obj: Page<PostEntry>,
        posts_count: u64,
    },
    PostDetail {
        post: PostEntry,
        posts_count: u64,
        can_edit: bool,
    },
    PostCreate {
        title: &'static str,
        form: PostForm,
    },
    PostEdit {
        post: Post,
        form: PostForm,
        is_edit: bool,
    },
    Login {
        form: AccountForm,
        next: Option<String>,
    },
    Signup {
        form: AccountForm,
    },
    NotFound {
        detail: String,
    },
    ServerError,
}

impl View {
    pub fn template(&self) -> &'static str {
        match self {
            View::Index { .. } => "posts/index.html",
            View::GroupList { .. } => "posts/group_list.html",
            View::Profile { .. } => "posts/profile.html",
            View::PostDetail { .. } => "posts/post_detail.html",
            View::PostCreate { .. } | View::PostEdit { .. } => "posts/create_post.html",
            View::Login { .. } => "users/login.html",
            View::Signup { .. } => "users/signup.html",
            View::NotFound { .. } => "core/404.html",
            View::ServerError => "core/500.html",
        }
    }

    /// The paginated posts of listing views.
    pub fn page_obj(&self) -> Option<&Page<PostEntry>> {
        match self {
            View::Index { page_obj }
            | View::GroupList { page_obj, .. }
            | View::Profile { page_obj, .. } => Some(page_obj),
            _ => None,
        }
    }

    /// The post form of the create and edit views.
    pub fn form(&self) -> Option<&PostForm> {
        match self {
            View::PostCreate { form, .. } | View::PostEdit { form, .. } => Some(form),
            _ => None,
        }
    }
}
