//! News site handlers: home listing, news detail, comment CRUD.

use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Deserialize;

use crate::domain::{Comment, CommentId, Error, ErrorCode, News, NewsId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::{CurrentUser, RequireUser};
use crate::inbound::http::pages;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

fn detail_path(news_id: &NewsId) -> String {
    format!("/news/{news_id}")
}

fn comments_anchor(news_id: &NewsId) -> String {
    format!("{}#comments", detail_path(news_id))
}

fn parse_news_id(raw: &str) -> Result<NewsId, Error> {
    NewsId::from_str(raw).map_err(|_| Error::not_found("no such news"))
}

fn parse_comment_id(raw: &str) -> Result<CommentId, Error> {
    CommentId::from_str(raw).map_err(|_| Error::not_found("no such comment"))
}

fn comment_form_body(news_id: &NewsId, text: &str, error: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(message) = error {
        body.push_str(&pages::form_error(message));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"/news/{news_id}/comments\">\n\
         <textarea name=\"text\">{}</textarea>\n\
         <button type=\"submit\">Post comment</button>\n</form>",
        pages::escape(text)
    ));
    body
}

fn home_body(items: &[News]) -> String {
    let mut body = String::from("<h1>News</h1>\n<ul>\n");
    for news in items {
        body.push_str(&format!(
            "<li><a href=\"/news/{}\">{}</a> <time>{}</time></li>\n",
            news.id(),
            pages::escape(news.title()),
            news.date()
        ));
    }
    body.push_str("</ul>");
    body
}

fn detail_body(
    news: &News,
    comments: &[Comment],
    viewer: Option<&UserId>,
    form: Option<String>,
) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<time>{}</time>\n<div>{}</div>\n<section id=\"comments\">\n",
        pages::escape(news.title()),
        news.date(),
        pages::escape(news.text()),
    );
    for comment in comments {
        body.push_str(&format!(
            "<article id=\"comment-{}\"><p>{}</p>",
            comment.id(),
            pages::escape(comment.text())
        ));
        if viewer == Some(comment.author_id()) {
            body.push_str(&format!(
                " <a href=\"/comments/{id}/edit\">Edit</a> \
                 <a href=\"/comments/{id}/delete\">Delete</a>",
                id = comment.id()
            ));
        }
        body.push_str("</article>\n");
    }
    body.push_str("</section>\n");
    if let Some(form) = form {
        body.push_str(&form);
    }
    body
}

#[get("/")]
pub async fn home(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let items = state.news.home_page().await?;
    Ok(pages::html("News", &home_body(&items)))
}

#[get("/news/{id}")]
pub async fn news_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: CurrentUser,
) -> ApiResult<HttpResponse> {
    let id = parse_news_id(&path)?;
    let (news, comments) = state.news.detail(&id).await?;

    // The comment form is rendered for signed-in readers only.
    let form = user.0.map(|_| comment_form_body(&id, "", None));
    Ok(pages::html(
        news.title(),
        &detail_body(&news, &comments, user.0.as_ref(), form),
    ))
}

#[post("/news/{id}/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: RequireUser,
    form: web::Form<CommentForm>,
) -> ApiResult<HttpResponse> {
    let id = parse_news_id(&path)?;
    match state
        .news
        .submit_comment(&user.actor(), &id, &form.text)
        .await
    {
        Ok(comment) => Ok(pages::redirect(&comments_anchor(comment.news_id()))),
        Err(error) if error.code() == ErrorCode::InvalidForm => {
            let (news, comments) = state.news.detail(&id).await?;
            let form = comment_form_body(&id, &form.text, Some(error.message()));
            Ok(pages::html(
                news.title(),
                &detail_body(&news, &comments, Some(&user.0), Some(form)),
            ))
        }
        Err(other) => Err(other),
    }
}

fn edit_form_body(comment: &Comment, text: &str, error: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(message) = error {
        body.push_str(&pages::form_error(message));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"/comments/{}/edit\">\n\
         <textarea name=\"text\">{}</textarea>\n\
         <button type=\"submit\">Save</button>\n</form>",
        comment.id(),
        pages::escape(text)
    ));
    body
}

#[get("/comments/{id}/edit")]
pub async fn edit_comment_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: RequireUser,
) -> ApiResult<HttpResponse> {
    let id = parse_comment_id(&path)?;
    let comment = state.news.comment_for(&user.actor(), &id).await?;
    Ok(pages::html(
        "Edit comment",
        &edit_form_body(&comment, comment.text(), None),
    ))
}

#[post("/comments/{id}/edit")]
pub async fn edit_comment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: RequireUser,
    form: web::Form<CommentForm>,
) -> ApiResult<HttpResponse> {
    let id = parse_comment_id(&path)?;
    match state
        .news
        .edit_comment(&user.actor(), &id, &form.text)
        .await
    {
        Ok(comment) => Ok(pages::redirect(&comments_anchor(comment.news_id()))),
        Err(error) if error.code() == ErrorCode::InvalidForm => {
            let comment = state.news.comment_for(&user.actor(), &id).await?;
            Ok(pages::html(
                "Edit comment",
                &edit_form_body(&comment, &form.text, Some(error.message())),
            ))
        }
        Err(other) => Err(other),
    }
}

#[get("/comments/{id}/delete")]
pub async fn delete_comment_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: RequireUser,
) -> ApiResult<HttpResponse> {
    let id = parse_comment_id(&path)?;
    let comment = state.news.comment_for(&user.actor(), &id).await?;
    let body = format!(
        "<p>Delete this comment?</p>\n\
         <form method=\"post\" action=\"/comments/{}/delete\">\n\
         <button type=\"submit\">Delete</button>\n</form>",
        comment.id()
    );
    Ok(pages::html("Delete comment", &body))
}

async fn perform_delete(
    state: &HttpState,
    user: &RequireUser,
    raw_id: &str,
) -> ApiResult<HttpResponse> {
    let id = parse_comment_id(raw_id)?;
    let comment = state.news.delete_comment(&user.actor(), &id).await?;
    Ok(pages::redirect(&comments_anchor(comment.news_id())))
}

#[post("/comments/{id}/delete")]
pub async fn delete_comment_submit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: RequireUser,
) -> ApiResult<HttpResponse> {
    perform_delete(&state, &user, &path).await
}

#[delete("/comments/{id}/delete")]
pub async fn delete_comment_direct(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: RequireUser,
) -> ApiResult<HttpResponse> {
    perform_delete(&state, &user, &path).await
}
