//! Minimal HTML page rendering.
//!
//! Real templating is out of scope; handlers only need bodies with stable
//! markers (forms, error paragraphs, anchors) plus correct redirects.

use actix_web::HttpResponse;
use actix_web::http::header;

/// Escape text interpolated into HTML bodies.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap a body fragment in the shared page shell.
pub(crate) fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><title>{}</title></head>\n<body>\n{body}\n</body></html>\n",
        escape(title)
    )
}

/// A `200 OK` HTML page.
pub(crate) fn html(title: &str, body: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(layout(title, body))
}

/// A `302 Found` redirect, the shape every successful write returns.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// The form-error paragraph rendered into a re-submitted form.
pub(crate) fn form_error(message: &str) -> String {
    format!("<p class=\"error\">{}</p>", escape(message))
}
