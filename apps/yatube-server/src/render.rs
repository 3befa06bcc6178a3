//! HTML rendering of views.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, http::header::ContentType};

use yatube_core::domain::PostEntry;
use yatube_core::forms::{FormErrors, PostForm};

use crate::urls;
use crate::views::{AccountForm, View};

/// Render `view` as a 200 page.
pub fn respond(view: View) -> HttpResponse {
    respond_with(StatusCode::OK, view)
}

/// Render `view` with `status`, keeping the view in the response extensions.
pub fn respond_with(status: StatusCode, view: View) -> HttpResponse {
    tracing::debug!(template = view.template(), status = status.as_u16(), "Rendering view");

    let body = render(&view);
    let mut response = HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body);
    response.extensions_mut().insert(view);
    response
}

/// 302 to `location`.
pub fn redirect(location: impl Into<String>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.into()))
        .finish()
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn render(view: &View) -> String {
    let (title, main) = match view {
        View::Index { .. } => ("Latest posts".to_string(), listing(view, "")),
        View::GroupList { group, .. } => {
            let header = format!(
                "<h1>{}</h1><p>{}</p>",
                escape(&group.title),
                escape(&group.description)
            );
            (group.title.clone(), listing(view, &header))
        }
        View::Profile {
            author,
            posts_count,
            ..
        } => {
            let header = format!(
                "<h1>All posts by {}</h1><h3>Posts: {posts_count}</h3>",
                escape(&author.username)
            );
            (format!("Profile of {}", author.username), listing(view, &header))
        }
        View::PostDetail {
            post,
            posts_count,
            can_edit,
        } => {
            let mut html = entry(post, false);
            html.push_str(&format!("<p>Posts by this author: {posts_count}</p>"));
            if *can_edit {
                html.push_str(&format!(
                    r#"<a href="{}">Edit post</a>"#,
                    escape(&urls::post_edit(post.post.id))
                ));
            }
            (excerpt(&post.post.text), html)
        }
        View::PostCreate { title, .. } => (title.to_string(), post_form(view, urls::CREATE)),
        View::PostEdit { post, .. } => (
            "Edit post".to_string(),
            post_form(view, &urls::post_edit(post.id)),
        ),
        View::Login { form, next } => {
            let action = match next {
                Some(next) => urls::login_with_next(next),
                None => urls::LOGIN.to_string(),
            };
            ("Log in".to_string(), account_form(form, &action, false))
        }
        View::Signup { form } => (
            "Sign up".to_string(),
            account_form(form, urls::SIGNUP, true),
        ),
        View::NotFound { detail } => (
            "Page not found".to_string(),
            format!("<h1>404</h1><p>{}</p>", escape(detail)),
        ),
        View::ServerError => (
            "Server error".to_string(),
            "<h1>500</h1><p>Something went wrong.</p>".to_string(),
        ),
    };

    format!(
        concat!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title></head>",
            "<body><nav><a href=\"{index}\">Yatube</a> <a href=\"{create}\">New post</a> ",
            "<a href=\"{login}\">Log in</a> <a href=\"{signup}\">Sign up</a> ",
            "<a href=\"{logout}\">Log out</a></nav><main>{main}</main></body></html>"
        ),
        title = escape(&title),
        index = urls::INDEX,
        create = urls::CREATE,
        login = urls::LOGIN,
        signup = urls::SIGNUP,
        logout = urls::LOGOUT,
        main = main,
    )
}

fn excerpt(text: &str) -> String {
    text.chars().take(30).collect()
}

fn listing(view: &View, header: &str) -> String {
    let mut html = header.to_string();
    let Some(page) = view.page_obj() else {
        return html;
    };

    for item in page {
        html.push_str(&entry(item, true));
    }

    if page.has_other_pages() {
        html.push_str("<nav class=\"pagination\">");
        if let Some(previous) = page.previous_page_number() {
            html.push_str(&format!(r#"<a href="?page={previous}">Previous</a> "#));
        }
        html.push_str(&format!("Page {} of {}", page.number, page.num_pages));
        if let Some(next) = page.next_page_number() {
            html.push_str(&format!(r#" <a href="?page={next}">Next</a>"#));
        }
        html.push_str("</nav>");
    }
    html
}

fn entry(item: &PostEntry, link_detail: bool) -> String {
    let mut html = format!(
        r#"<article><p>Author: <a href="{}">{}</a></p><p>Date: {}</p><p>{}</p>"#,
        escape(&urls::profile(&item.author.username)),
        escape(&item.author.username),
        item.post.created_at.format("%d %B %Y"),
        escape(&item.post.text).replace('\n', "<br>"),
    );
    if let Some(group) = &item.group {
        html.push_str(&format!(
            r#"<p>Group: <a href="{}">{}</a></p>"#,
            escape(&urls::group_list(&group.slug)),
            escape(&group.title)
        ));
    }
    if link_detail {
        html.push_str(&format!(
            r#"<a href="{}">Read more</a>"#,
            escape(&urls::post_detail(item.post.id))
        ));
    }
    html.push_str("</article>");
    html
}

fn errors(errors: &FormErrors, field: &str) -> String {
    errors
        .field(field)
        .iter()
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .collect()
}

fn post_form(view: &View, action: &str) -> String {
    let Some(form) = view.form() else {
        return String::new();
    };
    let PostForm {
        text,
        choices,
        errors: form_errors,
        ..
    } = form;
    let selected = form.selected_group().map(|g| g.id);

    let mut options = String::from(r#"<option value="">---------</option>"#);
    for group in choices {
        let attr = if Some(group.id) == selected { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{}"{attr}>{}</option>"#,
            group.id,
            escape(&group.title)
        ));
    }

    format!(
        concat!(
            r#"<form method="post" action="{action}">"#,
            r#"{text_errors}<label>Text<textarea name="text">{text}</textarea></label>"#,
            r#"{group_errors}<label>Group<select name="group">{options}</select></label>"#,
            r#"<button type="submit">Save</button></form>"#
        ),
        action = escape(action),
        text_errors = errors(form_errors, "text"),
        text = escape(text),
        group_errors = errors(form_errors, "group"),
        options = options,
    )
}

fn account_form(form: &AccountForm, action: &str, confirm: bool) -> String {
    let confirm_field = if confirm {
        format!(
            r#"{}<label>Confirm password<input type="password" name="password_confirm"></label>"#,
            errors(&form.errors, "password_confirm")
        )
    } else {
        String::new()
    };

    format!(
        concat!(
            r#"<form method="post" action="{action}">{non_field}"#,
            r#"{username_errors}<label>Username<input name="username" value="{username}"></label>"#,
            r#"{password_errors}<label>Password<input type="password" name="password"></label>"#,
            r#"{confirm_field}<button type="submit">Submit</button></form>"#
        ),
        action = escape(action),
        non_field = errors(&form.errors, FormErrors::NON_FIELD),
        username_errors = errors(&form.errors, "username"),
        username = escape(&form.username),
        password_errors = errors(&form.errors, "password"),
        confirm_field = confirm_field,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_response_carries_view() {
        let response = respond_with(
            StatusCode::NOT_FOUND,
            View::NotFound {
                detail: "<gone>".to_string(),
            },
        );

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let extensions = response.extensions();
        let view = extensions.get::<View>().unwrap();
        assert_eq!(view.template(), "core/404.html");
    }

    #[test]
    fn test_redirect_sets_location() {
        let response = redirect("/posts/1/");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/posts/1/");
    }
}
