use super::types::{ErrorResponse, GallerySelection};
use crate::{
    analysis::FILE_FIELD,
    gallery::{Gallery, GalleryReference},
    submission::{ImageSource, SubmissionController, UploadedFile},
    view::{ViewModel, render_page},
};
use axum::{
    Form,
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, Json, Redirect},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<SubmissionController<ViewModel>>,
    pub gallery: Arc<Gallery>,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = state.controller.view();
    let view = view.lock().await;
    Html(render_page(&view, &state.gallery))
}

pub async fn view_state(State(state): State<AppState>) -> Json<ViewModel> {
    let view = state.controller.view();
    let snapshot = view.lock().await.clone();
    Json(snapshot)
}

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, (StatusCode, Json<ErrorResponse>)> {
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(bad_request)?;

        if bytes.is_empty() {
            debug!("Upload form submitted without a file");
            break;
        }

        info!("Received upload {} ({} bytes)", filename, bytes.len());
        let file = UploadedFile {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        };
        state.controller.submit(ImageSource::Upload(file)).await;
        break;
    }

    Ok(Redirect::to("/"))
}

pub async fn select_gallery_image(
    State(state): State<AppState>,
    Form(selection): Form<GallerySelection>,
) -> Redirect {
    info!("Gallery image selected: {:?}", selection.src);
    let reference = GalleryReference { src: selection.src };
    state
        .controller
        .submit(ImageSource::Gallery(reference))
        .await;
    Redirect::to("/")
}

fn bad_request(e: impl std::fmt::Display) -> (StatusCode, Json<ErrorResponse>) {
    warn!("Rejected upload: {}", e);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!("Invalid upload: {}", e),
        }),
    )
}
