//! HTTP route handlers for the generator form.

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use slidegen_core::{DeckRequest, Error};
use slidegen_pptx::{GeneratedDeck, PPTX_MIME_TYPE};
use std::io;
use std::path::PathBuf;

use crate::page::{render_form, Notice};
use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// GET / - the empty form.
async fn index() -> Html<String> {
    Html(render_form(Notice::None, "", ""))
}

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

/// POST /generate - build the deck and send it as a download.
async fn generate(State(state): State<AppState>, Form(form): Form<GenerateForm>) -> Response {
    let request = match DeckRequest::new(form.title.as_str(), form.content.as_str()) {
        Ok(request) => request,
        Err(Error::MissingInput(message)) => {
            return form_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                Notice::Warning(&message),
                &form,
            );
        }
        Err(e) => return failure(&form, &e),
    };

    let deck = match state.generator.generate(&request).await {
        Ok(deck) => deck,
        Err(e) => return failure(&form, &e),
    };

    let deck = match state.save_dir.clone() {
        Some(dir) => match save_in_background(deck, dir).await {
            Ok(deck) => deck,
            Err(e) => return failure(&form, &e),
        },
        None => deck,
    };

    log::info!(
        "Serving {} ({} slides, {} images)",
        deck.filename,
        deck.slide_count,
        deck.images_embedded
    );

    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(PPTX_MIME_TYPE)),
            (header::CONTENT_DISPOSITION, content_disposition(&deck.filename)),
        ],
        deck.bytes,
    )
        .into_response()
}

/// Write the deck to `dir` off the async runtime, handing the deck back.
async fn save_in_background(deck: GeneratedDeck, dir: PathBuf) -> Result<GeneratedDeck, Error> {
    tokio::task::spawn_blocking(move || -> Result<GeneratedDeck, Error> {
        deck.save(&dir)?;
        Ok(deck)
    })
    .await
    .map_err(|e| Error::IoError(io::Error::other(e)))?
}

fn form_response(status: StatusCode, notice: Notice<'_>, form: &GenerateForm) -> Response {
    (status, Html(render_form(notice, &form.title, &form.content))).into_response()
}

fn failure(form: &GenerateForm, error: &Error) -> Response {
    log::error!("Deck generation failed: {}", error);
    let message = format!("Could not generate the slides: {}", error);
    form_response(StatusCode::INTERNAL_SERVER_ERROR, Notice::Error(&message), form)
}

/// `attachment` disposition with an ASCII fallback name and the exact UTF-8 name.
fn content_disposition(filename: &str) -> HeaderValue {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let value = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    );
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
