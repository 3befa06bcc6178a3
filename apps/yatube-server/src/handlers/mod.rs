//! HTTP handlers and route configuration.

mod auth;
mod posts;

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};

use crate::middleware::error::AppError;
use crate::render;
use crate::state::AppState;
use crate::views::View;

/// Register application state, every route and the 404 fallback.
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state))
            .app_data(
                web::PathConfig::default()
                    .error_handler(|err, _req| AppError::NotFound(err.to_string()).into()),
            )
            .service(web::resource("/").route(web::get().to(posts::index)))
            .service(web::resource("/group/{slug}/").route(web::get().to(posts::group_list)))
            .service(web::resource("/profile/{username}/").route(web::get().to(posts::profile)))
            .service(web::resource("/posts/{post_id}/").route(web::get().to(posts::post_detail)))
            .service(
                web::resource("/posts/{post_id}/edit/")
                    .route(web::get().to(posts::post_edit_form))
                    .route(web::post().to(posts::post_edit)),
            )
            .service(
                web::resource("/create/")
                    .route(web::get().to(posts::post_create_form))
                    .route(web::post().to(posts::post_create)),
            )
            .service(
                web::scope("/auth")
                    .service(
                        web::resource("/login/")
                            .route(web::get().to(auth::login_form))
                            .route(web::post().to(auth::login)),
                    )
                    .service(
                        web::resource("/signup/")
                            .route(web::get().to(auth::signup_form))
                            .route(web::post().to(auth::signup)),
                    )
                    .service(
                        web::resource("/logout/")
                            .route(web::get().to(auth::logout))
                            .route(web::post().to(auth::logout)),
                    ),
            )
            .default_service(web::to(not_found));
    }
}

async fn not_found(req: HttpRequest) -> HttpResponse {
    render::respond_with(
        StatusCode::NOT_FOUND,
        View::NotFound {
            detail: format!("{} does not exist", req.path()),
        },
    )
}
