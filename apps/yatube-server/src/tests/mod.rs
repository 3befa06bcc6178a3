//! HTTP-level tests against the in-memory store.

mod forms;

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;

use yatube_core::domain::{Group, NewGroup, NewPost, NewUser, Post, User};
use yatube_core::ports::{
    BaseRepository, GroupRepository, PostFilter, PostRepository, TokenService, UserRepository,
};
use yatube_infra::{Argon2PasswordService, InMemoryStore, JwtConfig, JwtTokenService};

use crate::middleware::auth::SESSION_COOKIE;
use crate::state::AppState;
use crate::views::View;

pub const PER_PAGE: u64 = 10;

/// A store seeded with two users, two groups and one post.
pub struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub state: AppState,
    pub user: User,
    pub another_user: User,
    pub group: Group,
    pub edited_group: Group,
    pub post: Post,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "yatube-test".to_string(),
        }));
        let state = AppState::in_memory(
            store.clone(),
            PER_PAGE,
            tokens,
            Arc::new(Argon2PasswordService::new()),
        );

        let user = UserRepository::create(store.as_ref(), NewUser::new("hasnoname", ""))
            .await
            .unwrap();
        let another_user = UserRepository::create(store.as_ref(), NewUser::new("noname", ""))
            .await
            .unwrap();
        let group = GroupRepository::create(
            store.as_ref(),
            NewGroup::new("Test group", "test-slug", "Test group description"),
        )
        .await
        .unwrap();
        let edited_group = GroupRepository::create(
            store.as_ref(),
            NewGroup::new("Edited group", "test-edited", "Group to move posts into"),
        )
        .await
        .unwrap();
        let post = PostRepository::create(
            store.as_ref(),
            NewPost {
                text: "Test post text".to_string(),
                author_id: user.id,
                group_id: Some(group.id),
            },
        )
        .await
        .unwrap();

        Self {
            store,
            state,
            user,
            another_user,
            group,
            edited_group,
            post,
        }
    }

    /// Session cookie of `user`.
    pub fn session(&self, user: &User) -> Cookie<'static> {
        let token = self
            .state
            .tokens
            .generate_token(user.id, &user.username)
            .unwrap();
        Cookie::new(SESSION_COOKIE, token)
    }

    pub async fn stored_post(&self, id: i64) -> Post {
        BaseRepository::<Post, i64>::find_by_id(self.store.as_ref(), id)
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn post_count(&self) -> u64 {
        self.store.count(PostFilter::All).await.unwrap()
    }

    pub async fn add_posts(&self, author: &User, group: Option<&Group>, count: usize) {
        for i in 0..count {
            PostRepository::create(
                self.store.as_ref(),
                NewPost {
                    text: format!("Bulk post {i}"),
                    author_id: author.id,
                    group_id: group.map(|g| g.id),
                },
            )
            .await
            .unwrap();
        }
    }
}

/// The view a response was rendered from.
pub fn view_of<B>(resp: &ServiceResponse<B>) -> View {
    resp.response()
        .extensions()
        .get::<View>()
        .cloned()
        .expect("response was not rendered from a view")
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("response is not a redirect")
        .to_str()
        .unwrap()
        .to_string()
}

/// Build the app under test from a fixture.
macro_rules! app {
    ($fixture:expr) => {
        actix_web::test::init_service(
            actix_web::App::new().configure(crate::handlers::configure($fixture.state.clone())),
        )
        .await
    };
}

pub(crate) use app;
