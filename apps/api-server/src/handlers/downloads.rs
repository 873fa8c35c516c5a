//! Public file downloads from the restricted `downloadable` directory.

use actix_files::NamedFile;
use actix_web::http::header::{
    ContentDisposition, ContentType, DispositionParam, DispositionType,
};
use actix_web::{HttpRequest, HttpResponse, web};

use inkpost_infra::{ResolveError, resolve_download};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /downloads/{filename}
pub async fn download_file(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let filename = path.into_inner();
    let root = state.config.downloads_dir();

    let resolved = resolve_download(&root, &filename).map_err(|err| match err {
        ResolveError::Rejected => {
            tracing::warn!(%filename, "rejected download filename");
            AppError::BadRequest("Invalid filename".to_string())
        }
        ResolveError::NotFound => AppError::NotFound("File not found".to_string()),
    })?;

    let file = NamedFile::open_async(&resolved)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .set_content_type(ContentType::octet_stream().0)
        .set_content_disposition(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        });

    Ok(file.into_response(&req))
}
