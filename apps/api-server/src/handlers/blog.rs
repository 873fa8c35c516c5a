//! Blog post handlers.

use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use actix_web::{HttpResponse, web};

use inkpost_core::domain::PostPatch;
use inkpost_shared::dto::{PostCreatedResponse, PostDetail, PostSummary, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart payload for POST /create-post: a title field and the post
/// archive.
#[derive(Debug, MultipartForm)]
pub struct CreatePostForm {
    pub title: Text<String>,
    #[multipart(rename = "zip_file")]
    pub zip_file: Bytes,
}

/// POST /create-post
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    MultipartForm(form): MultipartForm<CreatePostForm>,
) -> AppResult<HttpResponse> {
    let title = form.title.0;
    if title.trim().is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }

    let looks_like_zip = form
        .zip_file
        .file_name
        .as_deref()
        .is_some_and(|name| name.ends_with(".zip"));
    if !looks_like_zip {
        return Err(AppError::BadRequest(
            "File must be a ZIP archive".to_string(),
        ));
    }

    tracing::info!(author = %identity.email, %title, "creating blog post");
    let post = state
        .blog
        .create_post(&title, form.zip_file.data.to_vec())
        .await?;

    Ok(HttpResponse::Created().json(PostCreatedResponse {
        id: post.id,
        title: post.title,
        directory_name: post.directory_name,
    }))
}

/// PATCH /update-post/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let patch = PostPatch {
        title: req.title,
        description: req.description,
        thumbnail: req.thumbnail,
    };
    if patch.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    tracing::info!(author = %identity.email, post_id = id, "updating blog post");
    let post = state.blog.update_post(id, patch).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// GET /blog
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.blog.list_posts().await?;

    let summaries: Vec<PostSummary> = posts
        .into_iter()
        .map(|post| PostSummary {
            id: post.id,
            title: post.title,
        })
        .collect();

    Ok(HttpResponse::Ok().json(summaries))
}

/// GET /blog/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let (post, content) = state.blog.read_post(id).await?;

    Ok(HttpResponse::Ok().json(PostDetail {
        id: post.id,
        title: post.title,
        description: post.description,
        thumbnail: post.thumbnail,
        directory_name: post.directory_name,
        created_at: post.created_at,
        updated_at: post.updated_at,
        content,
    }))
}

/// DELETE /blog/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    tracing::info!(author = %identity.email, post_id = id, "deleting blog post");
    state.blog.delete_post(id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Blog post deleted"
    })))
}
