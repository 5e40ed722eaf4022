//! Notes site handlers: per-actor listing and slug-addressed CRUD.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Deserialize;

use crate::domain::{Error, ErrorCode, Note, NoteDraft, Slug};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::RequireUser;
use crate::inbound::http::pages;
use crate::inbound::http::state::HttpState;

/// Redirect target after a successful note write.
pub const NOTES_SUCCESS_PATH: &str = "/notes/success";

#[derive(Debug, Clone, Deserialize)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    pub slug: Option<String>,
}

impl From<NoteForm> for NoteDraft {
    fn from(form: NoteForm) -> Self {
        Self {
            title: form.title,
            text: form.text,
            slug: form.slug,
        }
    }
}

fn parse_slug(raw: &str) -> Result<Slug, Error> {
    Slug::new(raw).map_err(|_| Error::not_found("no such note"))
}

fn note_form_body(action: &str, form: &NoteForm, error: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(message) = error {
        body.push_str(&pages::form_error(message));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <input name=\"title\" value=\"{}\">\n\
         <textarea name=\"text\">{}</textarea>\n\
         <input name=\"slug\" value=\"{}\">\n\
         <button type=\"submit\">Save</button>\n</form>",
        pages::escape(&form.title),
        pages::escape(&form.text),
        pages::escape(form.slug.as_deref().unwrap_or("")),
    ));
    body
}

fn empty_form() -> NoteForm {
    NoteForm {
        title: String::new(),
        text: String::new(),
        slug: None,
    }
}

fn form_for(note: &Note) -> NoteForm {
    NoteForm {
        title: note.title().to_owned(),
        text: note.text().to_owned(),
        slug: Some(note.slug().as_str().to_owned()),
    }
}

#[get("/notes")]
pub async fn notes_home() -> HttpResponse {
    pages::html(
        "Notes",
        "<h1>Notes</h1>\n<p><a href=\"/notes/list\">Your notes</a> \
         <a href=\"/notes/add\">Add a note</a></p>",
    )
}

#[get("/notes/list")]
pub async fn list_notes(state: web::Data<HttpState>, user: RequireUser) -> ApiResult<HttpResponse> {
    let notes = state.notes.list(&user.actor()).await?;
    let mut body = String::from("<h1>Your notes</h1>\n<ul>\n");
    for note in &notes {
        body.push_str(&format!(
            "<li><a href=\"/note/{}\">{}</a></li>\n",
            note.slug(),
            pages::escape(note.title())
        ));
    }
    body.push_str("</ul>");
    Ok(pages::html("Your notes", &body))
}

#[get("/notes/add")]
pub async fn add_note_form(_user: RequireUser) -> HttpResponse {
    pages::html("Add note", &note_form_body("/notes/add", &empty_form(), None))
}

#[post("/notes/add")]
pub async fn add_note(
    state: web::Data<HttpState>,
    user: RequireUser,
    form: web::Form<NoteForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    match state
        .notes
        .create(&user.actor(), NoteDraft::from(form.clone()))
        .await
    {
        Ok(_) => Ok(pages::redirect(NOTES_SUCCESS_PATH)),
        Err(error) if error.code() == ErrorCode::InvalidForm => Ok(pages::html(
            "Add note",
            &note_form_body("/notes/add", &form, Some(error.message())),
        )),
        Err(other) => Err(other),
    }
}

#[get("/notes/success")]
pub async fn note_success(_user: RequireUser) -> HttpResponse {
    pages::html("Done", "<p>The note was saved.</p>")
}

#[get("/note/{slug}")]
pub async fn note_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: RequireUser,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path)?;
    let note = state.notes.note_for(&user.actor(), &slug).await?;
    let body = format!(
        "<h1>{}</h1>\n<div>{}</div>\n\
         <p><a href=\"/note/{slug}/edit\">Edit</a> \
         <a href=\"/note/{slug}/delete\">Delete</a></p>",
        pages::escape(note.title()),
        pages::escape(note.text()),
        slug = note.slug(),
    );
    Ok(pages::html(note.title(), &body))
}

#[get("/note/{slug}/edit")]
pub async fn edit_note_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: RequireUser,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path)?;
    let note = state.notes.note_for(&user.actor(), &slug).await?;
    let action = format!("/note/{}/edit", note.slug());
    Ok(pages::html(
        "Edit note",
        &note_form_body(&action, &form_for(&note), None),
    ))
}

#[post("/note/{slug}/edit")]
pub async fn edit_note(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: RequireUser,
    form: web::Form<NoteForm>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path)?;
    let form = form.into_inner();
    match state
        .notes
        .edit(&user.actor(), &slug, NoteDraft::from(form.clone()))
        .await
    {
        Ok(_) => Ok(pages::redirect(NOTES_SUCCESS_PATH)),
        Err(error) if error.code() == ErrorCode::InvalidForm => {
            let action = format!("/note/{slug}/edit");
            Ok(pages::html(
                "Edit note",
                &note_form_body(&action, &form, Some(error.message())),
            ))
        }
        Err(other) => Err(other),
    }
}

#[get("/note/{slug}/delete")]
pub async fn delete_note_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: RequireUser,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path)?;
    let note = state.notes.note_for(&user.actor(), &slug).await?;
    let body = format!(
        "<p>Delete note \"{}\"?</p>\n\
         <form method=\"post\" action=\"/note/{}/delete\">\n\
         <button type=\"submit\">Delete</button>\n</form>",
        pages::escape(note.title()),
        note.slug()
    );
    Ok(pages::html("Delete note", &body))
}

async fn perform_delete(
    state: &HttpState,
    user: &RequireUser,
    raw_slug: &str,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(raw_slug)?;
    state.notes.delete(&user.actor(), &slug).await?;
    Ok(pages::redirect(NOTES_SUCCESS_PATH))
}

#[post("/note/{slug}/delete")]
pub async fn delete_note_submit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: RequireUser,
) -> ApiResult<HttpResponse> {
    perform_delete(&state, &user, &path).await
}

#[delete("/note/{slug}/delete")]
pub async fn delete_note_direct(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    user: RequireUser,
) -> ApiResult<HttpResponse> {
    perform_delete(&state, &user, &path).await
}
