//! Reverse routing: the path each page lives at.

pub const INDEX: &str = "/";
pub const CREATE: &str = "/create/";
pub const LOGIN: &str = "/auth/login/";
pub const SIGNUP: &str = "/auth/signup/";
pub const LOGOUT: &str = "/auth/logout/";

pub fn group_list(slug: &str) -> String {
    format!("/group/{}/", urlencoding::encode(slug))
}

pub fn profile(username: &str) -> String {
    format!("/profile/{}/", urlencoding::encode(username))
}

pub fn post_detail(post_id: i64) -> String {
    format!("/posts/{post_id}/")
}

pub fn post_edit(post_id: i64) -> String {
    format!("/posts/{post_id}/edit/")
}

/// Login page that sends the user back to `next` afterwards.
///
/// Slashes stay readable in the query, as in `/auth/login/?next=/create/`.
pub fn login_with_next(next: &str) -> String {
    let next = urlencoding::encode(next).replace("%2F", "/");
    format!("{LOGIN}?next={next}")
}

/// `next` if it is a path on this site, the index otherwise.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => INDEX,
    }
}
