//! Image upload handler.
//!
//! Accepts one multipart field named `image`. Fields with a disallowed MIME
//! type are drained and dropped without an error, so the request then looks
//! like no file was sent at all.

use std::path::{Path, PathBuf};

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::TryStreamExt;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use ripple_core::policy::require_authenticated;
use ripple_shared::dto::UploadResponse;

use crate::middleware::auth::RequestIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpg", "image/jpeg"];

/// PUT /post-image
pub async fn upload_image(
    identity: RequestIdentity,
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    require_authenticated(&identity)?;

    let mut stored_path: Option<String> = None;
    let mut old_path: Option<String> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" if is_allowed_image(&field) && stored_path.is_none() => {
                let original = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or("upload");
                let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original));
                let dest = state.upload_dir.join(&file_name);

                write_field(&mut field, &dest).await?;

                tracing::debug!(file = %dest.display(), "Image stored");
                stored_path = Some(format!(
                    "{}/{}",
                    state.upload_dir.to_string_lossy(),
                    file_name
                ));
            }
            "old_path" => {
                old_path = Some(read_field_string(&mut field).await?);
            }
            _ => {
                // Disallowed type or unknown field: consume and forget.
                drain_field(&mut field).await?;
            }
        }
    }

    if let Some(old) = old_path.filter(|p| !p.trim().is_empty()) {
        clear_image(&state.upload_dir, &old).await;
    }

    match stored_path {
        Some(file_path) => Ok(HttpResponse::Created().json(UploadResponse {
            message: "File uploaded.".to_string(),
            file_path: Some(file_path),
        })),
        None => Ok(HttpResponse::Ok().json(UploadResponse {
            message: "No file provided.".to_string(),
            file_path: None,
        })),
    }
}

fn is_allowed_image(field: &actix_multipart::Field) -> bool {
    field
        .content_type()
        .map(|mime| ALLOWED_IMAGE_TYPES.contains(&mime.essence_str()))
        .unwrap_or(false)
}

/// Keep only the final path component of a client-supplied filename.
fn sanitize_file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

async fn write_field(field: &mut actix_multipart::Field, dest: &PathBuf) -> AppResult<()> {
    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    file.flush()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
}

async fn read_field_string(field: &mut actix_multipart::Field) -> AppResult<String> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        bytes.extend_from_slice(&chunk);
    }
    String::from_utf8(bytes).map_err(|e| AppError::BadRequest(e.to_string()))
}

async fn drain_field(field: &mut actix_multipart::Field) -> AppResult<()> {
    while field
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .is_some()
    {}
    Ok(())
}

/// Remove a previously uploaded image. Only the file name is honored, so a
/// client cannot point this at arbitrary paths.
async fn clear_image(upload_dir: &Path, old_path: &str) {
    let Some(file_name) = Path::new(old_path).file_name() else {
        return;
    };
    let target = upload_dir.join(file_name);
    if let Err(e) = tokio::fs::remove_file(&target).await {
        tracing::debug!(file = %target.display(), error = %e, "Old image not removed");
    }
}
