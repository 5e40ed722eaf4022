//! Note creation, slug handling, and ownership rules.

mod support;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;

use gazette::domain::ports::NoteRepository;
use gazette::domain::{Note, SLUG_IN_USE_SUFFIX, Slug, User, slugify};
use support::{MemoryBackends, TestService, body_text, init_app, location, signed_in_user};

const NOTES_SUCCESS: &str = "/notes/success";

async fn seed_note(backends: &MemoryBackends, author: &User, slug: &str) -> Note {
    let note = Note::new(
        "Note title",
        "Note text",
        Slug::new(slug).expect("valid slug"),
        *author.id(),
    );
    backends.notes.insert(&note).await.expect("seed note");
    note
}

async fn post_note_form(
    app: &impl TestService,
    path: &str,
    title: &str,
    text: &str,
    slug: Option<&str>,
    cookie: Option<&Cookie<'static>>,
) -> ServiceResponse {
    let mut fields = vec![("title", title), ("text", text)];
    if let Some(slug) = slug {
        fields.push(("slug", slug));
    }
    let mut req = test::TestRequest::post().uri(path).set_form(fields);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

async fn find_note(backends: &MemoryBackends, slug: &str) -> Option<Note> {
    backends
        .notes
        .find_by_slug(&Slug::new(slug).expect("valid slug"))
        .await
        .expect("query notes")
}

async fn note_count(backends: &MemoryBackends, author: &User) -> usize {
    backends
        .notes
        .list_by_author(author.id())
        .await
        .expect("list notes")
        .len()
}

#[actix_web::test]
async fn a_signed_in_user_can_create_a_note() {
    let (app, backends) = init_app().await;
    let (user, cookie) = signed_in_user(&app, &backends, "author").await;

    let res = post_note_form(
        &app,
        "/notes/add",
        "Note title",
        "Note text",
        Some("slugnote"),
        Some(&cookie),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), NOTES_SUCCESS);

    assert_eq!(note_count(&backends, &user).await, 1);
    let note = find_note(&backends, "slugnote").await.expect("note saved");
    assert_eq!(note.title(), "Note title");
    assert_eq!(note.text(), "Note text");
    assert_eq!(note.author_id(), user.id());
}

#[actix_web::test]
async fn anonymous_users_cannot_create_notes() {
    let (app, backends) = init_app().await;

    let res = post_note_form(
        &app,
        "/notes/add",
        "Note title",
        "Note text",
        Some("slugnote"),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/auth/login?next=/notes/add");
    assert!(find_note(&backends, "slugnote").await.is_none());
}

#[actix_web::test]
async fn a_duplicate_slug_re_renders_the_form_and_persists_nothing() {
    let (app, backends) = init_app().await;
    let (user, cookie) = signed_in_user(&app, &backends, "author").await;
    seed_note(&backends, &user, "slugnote").await;

    let res = post_note_form(
        &app,
        "/notes/add",
        "Another title",
        "Another text",
        Some("slugnote"),
        Some(&cookie),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains(&format!("slugnote{SLUG_IN_USE_SUFFIX}")));

    assert_eq!(note_count(&backends, &user).await, 1);
}

#[actix_web::test]
async fn a_missing_slug_is_derived_from_the_title() {
    let (app, backends) = init_app().await;
    let (user, cookie) = signed_in_user(&app, &backends, "author").await;

    let res = post_note_form(
        &app,
        "/notes/add",
        "Заголовок заметки",
        "Note text",
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), NOTES_SUCCESS);

    let expected = slugify("Заголовок заметки").expect("sluggable title");
    let note = find_note(&backends, expected.as_str())
        .await
        .expect("note saved");
    assert_eq!(note.slug(), &expected);
    assert_eq!(note.author_id(), user.id());
}

#[actix_web::test]
async fn the_author_can_edit_their_note() {
    let (app, backends) = init_app().await;
    let (user, cookie) = signed_in_user(&app, &backends, "author").await;
    let note = seed_note(&backends, &user, "slugnote").await;

    let res = post_note_form(
        &app,
        &format!("/note/{}/edit", note.slug()),
        "New title",
        "New text",
        Some("slugnotenew"),
        Some(&cookie),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), NOTES_SUCCESS);

    let updated = find_note(&backends, "slugnotenew").await.expect("renamed");
    assert_eq!(updated.title(), "New title");
    assert_eq!(updated.text(), "New text");
    assert!(find_note(&backends, "slugnote").await.is_none());
}

#[actix_web::test]
async fn editing_a_note_keeping_its_slug_is_allowed() {
    let (app, backends) = init_app().await;
    let (user, cookie) = signed_in_user(&app, &backends, "author").await;
    let note = seed_note(&backends, &user, "slugnote").await;

    let res = post_note_form(
        &app,
        &format!("/note/{}/edit", note.slug()),
        "New title",
        "New text",
        Some("slugnote"),
        Some(&cookie),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let updated = find_note(&backends, "slugnote").await.expect("kept slug");
    assert_eq!(updated.title(), "New title");
}

#[actix_web::test]
async fn a_reader_cannot_edit_someone_elses_note() {
    let (app, backends) = init_app().await;
    let (author, _) = signed_in_user(&app, &backends, "author").await;
    let note = seed_note(&backends, &author, "slugnote").await;
    let (_, reader_cookie) = signed_in_user(&app, &backends, "reader").await;

    let res = post_note_form(
        &app,
        &format!("/note/{}/edit", note.slug()),
        "Hijacked",
        "Hijacked",
        Some("slugnote"),
        Some(&reader_cookie),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let stored = find_note(&backends, "slugnote").await.expect("unchanged");
    assert_eq!(stored.title(), "Note title");
    assert_eq!(stored.text(), "Note text");
}

#[actix_web::test]
async fn the_author_can_delete_their_note() {
    let (app, backends) = init_app().await;
    let (user, cookie) = signed_in_user(&app, &backends, "author").await;
    let note = seed_note(&backends, &user, "slugnote").await;

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/note/{}/delete", note.slug()))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), NOTES_SUCCESS);
    assert_eq!(note_count(&backends, &user).await, 0);
}

#[actix_web::test]
async fn a_reader_cannot_delete_someone_elses_note() {
    let (app, backends) = init_app().await;
    let (author, _) = signed_in_user(&app, &backends, "author").await;
    let note = seed_note(&backends, &author, "slugnote").await;
    let (_, reader_cookie) = signed_in_user(&app, &backends, "reader").await;

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/note/{}/delete", note.slug()))
            .cookie(reader_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(note_count(&backends, &author).await, 1);
}
