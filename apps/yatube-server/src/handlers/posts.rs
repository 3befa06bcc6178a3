//! Post pages: feeds, detail, create and edit.

use actix_web::{HttpResponse, web};

use yatube_core::services::{CreateOutcome, EditOutcome};
use yatube_shared::{PageQuery, PostFormData};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::render;
use crate::state::AppState;
use crate::urls;
use crate::views::View;

const CREATE_TITLE: &str = "Add post";

/// Raw query pairs. Unlike a struct, repeated keys never fail to deserialize.
type QueryPairs = Vec<(String, String)>;

/// GET /
pub async fn index(state: web::Data<AppState>, query: web::Query<QueryPairs>) -> AppResult<HttpResponse> {
    let query = PageQuery::from(query.into_inner());
    let page_obj = state.posts.index(query.page.as_deref()).await?;
    Ok(render::respond(View::Index { page_obj }))
}

/// GET /group/{slug}/
pub async fn group_list(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<QueryPairs>,
) -> AppResult<HttpResponse> {
    let query = PageQuery::from(query.into_inner());
    let feed = state.posts.group_feed(&slug, query.page.as_deref()).await?;
    Ok(render::respond(View::GroupList {
        group: feed.group,
        page_obj: feed.page,
    }))
}

/// GET /profile/{username}/
pub async fn profile(
    state: web::Data<AppState>,
    username: web::Path<String>,
    query: web::Query<QueryPairs>,
) -> AppResult<HttpResponse> {
    let query = PageQuery::from(query.into_inner());
    let feed = state.posts.profile_feed(&username, query.page.as_deref()).await?;
    Ok(render::respond(View::Profile {
        author: feed.author,
        page_obj: feed.page,
        posts_count: feed.posts_count,
    }))
}

/// GET /posts/{post_id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    post_id: web::Path<i64>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post = state.posts.detail(*post_id).await?;
    let posts_count = state.posts.posts_count(post.author.id).await?;
    let can_edit = viewer
        .0
        .is_some_and(|identity| post.post.is_authored_by(identity.user_id));

    Ok(render::respond(View::PostDetail {
        post,
        posts_count,
        can_edit,
    }))
}

/// GET /create/
pub async fn post_create_form(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let form = state.posts.blank_form().await?;
    Ok(render::respond(View::PostCreate {
        title: CREATE_TITLE,
        form,
    }))
}

/// POST /create/
pub async fn post_create(
    state: web::Data<AppState>,
    identity: Identity,
    form: Option<web::Form<PostFormData>>,
) -> AppResult<HttpResponse> {
    let data = form.map(web::Form::into_inner).unwrap_or_default();

    match state.posts.create(identity.user_id, data.text, data.group).await? {
        CreateOutcome::Created(post) => {
            tracing::info!(post_id = post.id, author_id = post.author_id, "Post created");
            Ok(render::redirect(urls::profile(&identity.username)))
        }
        CreateOutcome::Invalid(form) => Ok(render::respond(View::PostCreate {
            title: CREATE_TITLE,
            form,
        })),
    }
}

/// GET /posts/{post_id}/edit/
pub async fn post_edit_form(
    state: web::Data<AppState>,
    identity: Identity,
    post_id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post_id = post_id.into_inner();
    let outcome = state.posts.edit_form(identity.user_id, post_id).await?;
    Ok(edit_response(post_id, &identity, outcome))
}

/// POST /posts/{post_id}/edit/
pub async fn post_edit(
    state: web::Data<AppState>,
    identity: Identity,
    post_id: web::Path<i64>,
    form: Option<web::Form<PostFormData>>,
) -> AppResult<HttpResponse> {
    let post_id = post_id.into_inner();
    let data = form.map(web::Form::into_inner).unwrap_or_default();

    let outcome = state
        .posts
        .edit(identity.user_id, post_id, data.text, data.group)
        .await?;
    if let EditOutcome::Updated(post) = &outcome {
        tracing::info!(post_id = post.id, author_id = post.author_id, "Post updated");
    }
    Ok(edit_response(post_id, &identity, outcome))
}

fn edit_response(post_id: i64, identity: &Identity, outcome: EditOutcome) -> HttpResponse {
    match outcome {
        EditOutcome::NotAuthor => {
            tracing::info!(post_id, user_id = identity.user_id, "Edit by non-author redirected");
            render::redirect(urls::post_detail(post_id))
        }
        EditOutcome::Updated(_) => render::redirect(urls::post_detail(post_id)),
        EditOutcome::Form { post, form } => render::respond(View::PostEdit {
            post,
            form,
            is_edit: true,
        }),
    }
}
