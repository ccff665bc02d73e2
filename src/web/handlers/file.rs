//! File entry handlers.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::auth::UserResolver;
use crate::db::UserRepository;
use crate::file::{CreateRequest, FileService, ParentRef};
use crate::web::dto::{DataQuery, FileEntryResponse, ListQuery};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{OptionalXToken, XToken};

/// Parse a path id, concealing malformed ids as missing entries.
fn parse_entry_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found())
}

/// POST /files - Upload a file, image, or folder.
pub async fn post_upload(
    State(state): State<Arc<AppState>>,
    XToken(token): XToken,
    Json(request): Json<CreateRequest>,
) -> Result<(StatusCode, Json<FileEntryResponse>), ApiError> {
    let user = state.require_user(&token).await?;

    let service = FileService::new(state.db.pool(), &state.blobs);
    let entry = service.create(user.id, &request).await?;

    Ok((StatusCode::CREATED, Json(FileEntryResponse::from(entry))))
}

/// GET /files/:id - Get one of the caller's entries.
pub async fn get_show(
    State(state): State<Arc<AppState>>,
    XToken(token): XToken,
    Path(id): Path<String>,
) -> Result<Json<FileEntryResponse>, ApiError> {
    let user = state.require_user(&token).await?;
    let id = parse_entry_id(&id)?;

    let service = FileService::new(state.db.pool(), &state.blobs);
    let entry = service.get_owned(id, user.id).await?;

    Ok(Json(FileEntryResponse::from(entry)))
}

/// GET /files - List the caller's entries under a parent, paged.
pub async fn get_index(
    State(state): State<Arc<AppState>>,
    XToken(token): XToken,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<FileEntryResponse>>, ApiError> {
    let user = state.require_user(&token).await?;

    // An unparseable parent id matches nothing, same as an unknown one
    let parent = match query.parent_id.as_deref() {
        None | Some("0") | Some("") => ParentRef::Root,
        Some(raw) => match raw.parse() {
            Ok(id) => ParentRef::Folder(id),
            Err(_) => return Ok(Json(Vec::new())),
        },
    };

    let service = FileService::new(state.db.pool(), &state.blobs);
    let entries = service
        .list_children(user.id, parent, query.page_number())
        .await?;

    Ok(Json(
        entries.into_iter().map(FileEntryResponse::from).collect(),
    ))
}

/// PUT /files/:id/publish - Make one of the caller's entries public.
pub async fn put_publish(
    State(state): State<Arc<AppState>>,
    XToken(token): XToken,
    Path(id): Path<String>,
) -> Result<Json<FileEntryResponse>, ApiError> {
    set_visibility(state, token, id, true).await
}

/// PUT /files/:id/unpublish - Make one of the caller's entries private.
pub async fn put_unpublish(
    State(state): State<Arc<AppState>>,
    XToken(token): XToken,
    Path(id): Path<String>,
) -> Result<Json<FileEntryResponse>, ApiError> {
    set_visibility(state, token, id, false).await
}

async fn set_visibility(
    state: Arc<AppState>,
    token: String,
    id: String,
    is_public: bool,
) -> Result<Json<FileEntryResponse>, ApiError> {
    let user = state.require_user(&token).await?;
    let id = parse_entry_id(&id)?;

    let service = FileService::new(state.db.pool(), &state.blobs);
    let entry = service.set_visibility(id, user.id, is_public).await?;

    Ok(Json(FileEntryResponse::from(entry)))
}

/// GET /files/:id/data - Stream an entry's content.
///
/// Open to anonymous callers; visibility rules decide per entry.
pub async fn get_data(
    State(state): State<Arc<AppState>>,
    OptionalXToken(token): OptionalXToken,
    Path(id): Path<String>,
    Query(query): Query<DataQuery>,
) -> Result<Response, ApiError> {
    let resolver = UserResolver::new(&state.tokens, UserRepository::new(state.db.pool()));
    let caller = resolver.resolve_id(token.as_deref());
    let id = parse_entry_id(&id)?;

    let service = FileService::new(state.db.pool(), &state.blobs);
    let (entry, bytes) = service
        .fetch_content(id, caller, query.size.as_deref())
        .await?;

    let mime = mime_guess::from_path(&entry.name).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(bytes))
        .map_err(|e| {
            tracing::error!("Failed to build content response: {}", e);
            ApiError::internal("An internal error occurred")
        })
}
