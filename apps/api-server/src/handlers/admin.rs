//! Admin handlers: database backup and restore.
//!
//! Backups are ZIP archives holding one JSON dump per table (`users.json`,
//! `blog_posts.json`). Restore inserts rows whose id and unique keys are
//! still free and reports everything it skipped.

use std::io::{Cursor, Read, Seek, Write};

use actix_multipart::form::{MultipartForm, bytes::Bytes};
use actix_web::http::header;
use actix_web::{HttpResponse, web};
use chrono::Utc;

use inkpost_core::domain::{Post, User};
use inkpost_shared::dto::RestoreSummary;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const USERS_DUMP: &str = "users.json";
const POSTS_DUMP: &str = "blog_posts.json";

/// POST /admin/database/backup
pub async fn backup(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    tracing::info!(admin = %identity.email, "database backup requested");

    let users = state.users.list().await?;
    let posts = state.posts.list().await?;

    let archive = web::block(move || build_backup(&users, &posts))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let filename = format!("db_backup_{}.zip", Utc::now().format("%Y%m%d_%H%M%S"));
    Ok(HttpResponse::Ok()
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={filename}"),
        ))
        .content_type("application/zip")
        .body(archive))
}

/// Multipart payload for POST /admin/database/restore.
#[derive(Debug, MultipartForm)]
pub struct RestoreForm {
    #[multipart(rename = "zip_file")]
    pub zip_file: Bytes,
}

/// POST /admin/database/restore
pub async fn restore(
    state: web::Data<AppState>,
    identity: Identity,
    MultipartForm(form): MultipartForm<RestoreForm>,
) -> AppResult<HttpResponse> {
    tracing::info!(admin = %identity.email, "database restore requested");

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

    let dumps = web::block(move || read_backup(&form.zip_file.data))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::BadRequest(format!("Invalid backup archive: {e}")))?;

    let mut summary = RestoreSummary::default();

    for user in dumps.users {
        if state.users.find_by_id(user.id).await?.is_some() {
            summary.users_skipped += 1;
            summary.skipped.push(format!("user {}: id exists", user.id));
            continue;
        }
        if state.users.find_by_email(&user.email).await?.is_some() {
            summary.users_skipped += 1;
            summary
                .skipped
                .push(format!("user {}: email exists", user.id));
            continue;
        }
        state.users.restore(user).await?;
        summary.users_imported += 1;
    }

    for post in dumps.posts {
        if state.posts.find_by_id(post.id).await?.is_some() {
            summary.posts_skipped += 1;
            summary.skipped.push(format!("post {}: id exists", post.id));
            continue;
        }
        if !post.directory_name.is_empty()
            && state
                .posts
                .find_by_directory(&post.directory_name)
                .await?
                .is_some()
        {
            summary.posts_skipped += 1;
            summary.skipped.push(format!(
                "post {}: directory {} exists",
                post.id, post.directory_name
            ));
            continue;
        }
        state.posts.restore(post).await?;
        summary.posts_imported += 1;
    }

    tracing::info!(
        users_imported = summary.users_imported,
        users_skipped = summary.users_skipped,
        posts_imported = summary.posts_imported,
        posts_skipped = summary.posts_skipped,
        "database restore finished"
    );
    Ok(HttpResponse::Ok().json(summary))
}

fn build_backup(users: &[User], posts: &[Post]) -> anyhow::Result<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();

    writer.start_file(USERS_DUMP, options)?;
    writer.write_all(&serde_json::to_vec_pretty(users)?)?;

    writer.start_file(POSTS_DUMP, options)?;
    writer.write_all(&serde_json::to_vec_pretty(posts)?)?;

    Ok(writer.finish()?.into_inner())
}

struct BackupDumps {
    users: Vec<User>,
    posts: Vec<Post>,
}

fn read_backup(bytes: &[u8]) -> anyhow::Result<BackupDumps> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes))?;
    let users = read_dump(&mut zip, USERS_DUMP)?;
    let posts = read_dump(&mut zip, POSTS_DUMP)?;
    Ok(BackupDumps { users, posts })
}

/// A dump that is absent from the archive restores nothing for its table.
fn read_dump<T, R>(zip: &mut zip::ZipArchive<R>, name: &str) -> anyhow::Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
    R: Read + Seek,
{
    match zip.by_name(name) {
        Ok(mut file) => {
            let mut raw = String::new();
            file.read_to_string(&mut raw)?;
            Ok(serde_json::from_str(&raw)?)
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(Vec::new()),
        Err(err) => Err(err.into()),
    }
}
