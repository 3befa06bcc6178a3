//! Submitting the create and edit forms.

use actix_web::http::StatusCode;
use actix_web::test;

use yatube_core::domain::NewUser;
use yatube_core::forms::{INVALID_CHOICE, REQUIRED};
use yatube_core::ports::{PostFilter, PostRepository, UserRepository};
use yatube_shared::PostFormData;

use super::{Fixture, app, location, view_of};
use crate::views::View;

fn form_data(text: &str, group: Option<i64>) -> PostFormData {
    PostFormData {
        text: text.to_string(),
        group: group.map(|id| id.to_string()).unwrap_or_default(),
    }
}

#[actix_web::test]
async fn test_create_post() {
    let fx = Fixture::new().await;
    let app = app!(fx);
    let before = fx.post_count().await;

    let req = test::TestRequest::post()
        .uri("/create/")
        .cookie(fx.session(&fx.user))
        .set_form(form_data("Brand new post", Some(fx.group.id)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/profile/hasnoname/");
    assert_eq!(fx.post_count().await, before + 1);

    let newest = fx.store.list(PostFilter::All, 0, 1).await.unwrap().remove(0);
    assert_eq!(newest.text, "Brand new post");
    assert_eq!(newest.author_id, fx.user.id);
    assert_eq!(newest.group_id, Some(fx.group.id));
}

#[actix_web::test]
async fn test_create_post_without_group() {
    let fx = Fixture::new().await;
    let app = app!(fx);

    let req = test::TestRequest::post()
        .uri("/create/")
        .cookie(fx.session(&fx.another_user))
        .set_form(form_data("No group here", None))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/profile/noname/");
    let newest = fx.store.list(PostFilter::All, 0, 1).await.unwrap().remove(0);
    assert_eq!(newest.group_id, None);
    assert_eq!(newest.author_id, fx.another_user.id);
}

#[actix_web::test]
async fn test_create_redirect_encodes_username() {
    let fx = Fixture::new().await;
    let author = UserRepository::create(fx.store.as_ref(), NewUser::new("Алиса", ""))
        .await
        .unwrap();
    let app = app!(fx);

    let req = test::TestRequest::post()
        .uri("/create/")
        .cookie(fx.session(&author))
        .set_form(form_data("Привет", None))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let profile = location(&resp);
    assert_eq!(profile, "/profile/%D0%90%D0%BB%D0%B8%D1%81%D0%B0/");
    assert!(profile.is_ascii());

    let resp = test::call_service(&app, test::TestRequest::get().uri(&profile).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let View::Profile { author: shown, .. } = view_of(&resp) else {
        panic!("profile rendered another view");
    };
    assert_eq!(shown, author);
}

#[actix_web::test]
async fn test_invalid_create_shows_errors() {
    let fx = Fixture::new().await;
    let app = app!(fx);
    let before = fx.post_count().await;

    let req = test::TestRequest::post()
        .uri("/create/")
        .cookie(fx.session(&fx.user))
        .set_form(PostFormData {
            text: "   ".to_string(),
            group: "9999".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let View::PostCreate { form, .. } = view_of(&resp) else {
        panic!("invalid create rendered another view");
    };
    assert_eq!(form.errors.field("text"), [REQUIRED.to_string()]);
    assert_eq!(form.errors.field("group"), [INVALID_CHOICE.to_string()]);
    assert_eq!(form.group, "9999");
    assert_eq!(fx.post_count().await, before);
}

#[actix_web::test]
async fn test_guest_cannot_create() {
    let fx = Fixture::new().await;
    let app = app!(fx);
    let before = fx.post_count().await;

    let req = test::TestRequest::post()
        .uri("/create/")
        .set_form(form_data("Anonymous post", None))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/auth/login/?next=/create/");
    assert_eq!(fx.post_count().await, before);
}

#[actix_web::test]
async fn test_author_edits_post() {
    let fx = Fixture::new().await;
    let app = app!(fx);
    let before = fx.post_count().await;

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/edit/", fx.post.id))
        .cookie(fx.session(&fx.user))
        .set_form(form_data("Edited post text", Some(fx.edited_group.id)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/posts/{}/", fx.post.id));
    assert_eq!(fx.post_count().await, before);

    let stored = fx.stored_post(fx.post.id).await;
    assert_eq!(stored.text, "Edited post text");
    assert_eq!(stored.group_id, Some(fx.edited_group.id));
    assert_eq!(stored.author_id, fx.user.id);
    assert_eq!(stored.created_at, fx.post.created_at);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/group/test-slug/").to_request(),
    )
    .await;
    assert!(view_of(&resp).page_obj().unwrap().is_empty());
}

#[actix_web::test]
async fn test_invalid_edit_keeps_post() {
    let fx = Fixture::new().await;
    let app = app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/edit/", fx.post.id))
        .cookie(fx.session(&fx.user))
        .set_form(form_data("", None))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let View::PostEdit { form, .. } = view_of(&resp) else {
        panic!("invalid edit rendered another view");
    };
    assert_eq!(form.errors.field("text"), [REQUIRED.to_string()]);
    assert_eq!(fx.stored_post(fx.post.id).await, fx.post);
}

#[actix_web::test]
async fn test_guest_cannot_edit() {
    let fx = Fixture::new().await;
    let app = app!(fx);
    let uri = format!("/posts/{}/edit/", fx.post.id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .set_form(form_data("Guest edit", Some(fx.edited_group.id)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), format!("/auth/login/?next={uri}"));
    assert_eq!(fx.stored_post(fx.post.id).await, fx.post);
}

#[actix_web::test]
async fn test_non_author_cannot_edit() {
    let fx = Fixture::new().await;
    let app = app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/edit/", fx.post.id))
        .cookie(fx.session(&fx.another_user))
        .set_form(form_data("Hijacked", None))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), format!("/posts/{}/", fx.post.id));
    assert_eq!(fx.stored_post(fx.post.id).await, fx.post);
}

#[actix_web::test]
async fn test_non_author_without_body_cannot_edit() {
    let fx = Fixture::new().await;
    let app = app!(fx);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/edit/", fx.post.id))
        .cookie(fx.session(&fx.another_user))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(fx.stored_post(fx.post.id).await, fx.post);
}

#[actix_web::test]
async fn test_alice_and_bob() {
    let fx = Fixture::new().await;
    let app = app!(fx);

    // alice writes a post without a group
    let req = test::TestRequest::post()
        .uri("/create/")
        .cookie(fx.session(&fx.user))
        .set_form(form_data("hello", None))
        .to_request();
    test::call_service(&app, req).await;
    let post = fx.store.list(PostFilter::All, 0, 1).await.unwrap().remove(0);
    assert_eq!(post.text, "hello");
    assert_eq!(post.group_id, None);

    // bob tries to rewrite it
    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/edit/", post.id))
        .cookie(fx.session(&fx.another_user))
        .set_form(form_data("pwned", None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), format!("/posts/{}/", post.id));
    assert_eq!(fx.stored_post(post.id).await.text, "hello");

    // alice moves it into a group
    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/edit/", post.id))
        .cookie(fx.session(&fx.user))
        .set_form(form_data("hello again", Some(fx.group.id)))
        .to_request();
    test::call_service(&app, req).await;
    let stored = fx.stored_post(post.id).await;
    assert_eq!(stored.text, "hello again");
    assert_eq!(stored.group_id, Some(fx.group.id));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/group/test-slug/").to_request(),
    )
    .await;
    let view = view_of(&resp);
    assert_eq!(view.page_obj().unwrap().items[0].post.id, post.id);
}
