// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{
        Path, State as AxumState,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use poemboard_api::{
    AdminCredential, ApiError, AuthenticatedAdmin, CreateCommentRequest, CreatePoemRequest,
    CreatedResponse, EditPoemRequest, GetPoemResponse, ListPoemsResponse, StatusResponse,
    SuccessResponse, create_comment, create_poem, delete_comment, delete_poem, edit_poem,
    get_poem_with_comments, list_poems, login, status,
};
use poemboard_persistence::{BackendConfig, Persistence};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// poemboard server - HTTP API for poems and their comments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Postgres connection URL. Takes precedence over `--database`.
    #[arg(long, env = "POSTGRES_URL", hide_env_values = true)]
    postgres_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Shared administrator password
    #[arg(long, env = "POEMBOARD_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: String,

    /// bcrypt cost used to hash the administrator password
    #[arg(long, default_value_t = bcrypt::DEFAULT_COST)]
    bcrypt_cost: u32,

    /// Delete every poem with this exact title (and its comments), then exit
    #[arg(long)]
    purge_title: Option<String>,
}

/// Application state shared across handlers.
///
/// The persistence adapter is constructed once at startup and wrapped in a
/// Mutex so that each request has exclusive use of the connection.
#[derive(Clone)]
struct AppState {
    /// The persistence adapter for poems and comments.
    persistence: Arc<Mutex<Persistence>>,
    /// Hash of the shared administrator password.
    credential: Arc<AdminCredential>,
    /// Whether a Postgres URL was configured.
    has_postgres_url: bool,
}

/// API request for creating a poem.
///
/// Missing fields deserialize as empty so that they are reported as
/// validation failures rather than malformed JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CreatePoemApiRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    password: String,
}

/// API request for editing a poem.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EditPoemApiRequest {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    password: String,
}

/// API request for deleting a poem or a comment by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeleteApiRequest {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    password: String,
}

/// API request for submitting a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CreateCommentApiRequest {
    #[serde(default)]
    poem_id: i64,
    #[serde(default)]
    author: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    content: String,
}

/// API request for the login check.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoginApiRequest {
    #[serde(default)]
    password: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error message.
    error: String,
}

/// Body returned by a failed login.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoginFailureResponse {
    success: bool,
    error: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: String::from("Unauthorized."),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::DuplicateContribution { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Internal server error"),
                }
            }
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

/// Chooses the storage backend.
///
/// A non-empty Postgres URL wins; otherwise a database path selects a
/// `SQLite` file, and with neither an in-memory `SQLite` database is used.
fn resolve_backend_config(postgres_url: Option<&str>, database: Option<&FsPath>) -> BackendConfig {
    match (postgres_url.filter(|url| !url.trim().is_empty()), database) {
        (Some(url), _) => BackendConfig::Postgres(url.to_string()),
        (None, Some(path)) => BackendConfig::SqliteFile(path.to_path_buf()),
        (None, None) => BackendConfig::SqliteMemory,
    }
}

/// Checks the shared secret before any persistence work is done.
fn authenticate(app_state: &AppState, password: &str) -> Result<AuthenticatedAdmin, HttpError> {
    app_state
        .credential
        .authenticate(password)
        .map_err(|e| HttpError::from(ApiError::from(e)))
}

/// Handler for GET `/api/poems` endpoint.
async fn handle_list_poems(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListPoemsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListPoemsResponse = list_poems(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/poems/{id}` endpoint.
///
/// Returns the poem with its comments, newest comment first.
async fn handle_get_poem(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<GetPoemResponse>, HttpError> {
    let Path(poem_id) = path?;

    let mut persistence = app_state.persistence.lock().await;
    let response: GetPoemResponse = get_poem_with_comments(&mut persistence, poem_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/poems` endpoint.
async fn handle_create_poem(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<CreatePoemApiRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, HttpError> {
    let Json(req) = payload?;
    let admin: AuthenticatedAdmin = authenticate(&app_state, &req.password)?;

    let request: CreatePoemRequest = CreatePoemRequest {
        title: req.title,
        content: req.content,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CreatedResponse = create_poem(&mut persistence, &admin, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/poems/edit` endpoint.
async fn handle_edit_poem(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<EditPoemApiRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, HttpError> {
    let Json(req) = payload?;
    let admin: AuthenticatedAdmin = authenticate(&app_state, &req.password)?;

    let request: EditPoemRequest = EditPoemRequest {
        id: req.id,
        title: req.title,
        content: req.content,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: SuccessResponse = edit_poem(&mut persistence, &admin, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/poems/delete` endpoint.
///
/// Deletes the poem and all of its comments.
async fn handle_delete_poem(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<DeleteApiRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, HttpError> {
    let Json(req) = payload?;
    let admin: AuthenticatedAdmin = authenticate(&app_state, &req.password)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: SuccessResponse = delete_poem(&mut persistence, &admin, req.id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/comments` endpoint.
///
/// Public: no password is required.
async fn handle_create_comment(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<CreateCommentApiRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, HttpError> {
    let Json(req) = payload?;

    let request: CreateCommentRequest = CreateCommentRequest {
        poem_id: req.poem_id,
        author: req.author,
        email: req.email,
        content: req.content,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CreatedResponse = create_comment(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/comments/delete` endpoint.
async fn handle_delete_comment(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<DeleteApiRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, HttpError> {
    let Json(req) = payload?;
    let admin: AuthenticatedAdmin = authenticate(&app_state, &req.password)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: SuccessResponse = delete_comment(&mut persistence, &admin, req.id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/login` endpoint.
///
/// A failed login keeps the `success` flag in its body.
#[allow(clippy::unused_async)]
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<LoginApiRequest>, JsonRejection>,
) -> Result<Response, HttpError> {
    let Json(req) = payload?;

    match login(&app_state.credential, &req.password) {
        Ok(response) => Ok(Json(response).into_response()),
        Err(_) => {
            let body: LoginFailureResponse = LoginFailureResponse {
                success: false,
                error: String::from("Incorrect password"),
            };
            Ok((StatusCode::FORBIDDEN, Json(body)).into_response())
        }
    }
}

/// Handler for GET `/api/status` endpoint.
///
/// Reports the active backend without exposing connection details.
async fn handle_status(AxumState(app_state): AxumState<AppState>) -> Json<StatusResponse> {
    let persistence = app_state.persistence.lock().await;
    let backend = persistence.backend_kind();
    drop(persistence);

    Json(status(backend, app_state.has_postgres_url))
}

/// Fallback for unmatched routes and for known routes hit with the wrong
/// method.
#[allow(clippy::unused_async)]
async fn handle_not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/api") {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: String::from("API endpoint not found."),
        });
        return (StatusCode::NOT_FOUND, body).into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/poems", get(handle_list_poems).post(handle_create_poem))
        .route("/api/poems/{id}", get(handle_get_poem))
        .route("/api/poems/edit", post(handle_edit_poem))
        .route("/api/poems/delete", post(handle_delete_poem))
        .route("/api/comments", post(handle_create_comment))
        .route("/api/comments/delete", post(handle_delete_comment))
        .route("/api/login", post(handle_login))
        .route("/api/status", get(handle_status))
        .fallback(handle_not_found)
        .method_not_allowed_fallback(handle_not_found)
        .with_state(app_state)
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing poemboard server");

    let config: BackendConfig =
        resolve_backend_config(args.postgres_url.as_deref(), args.database.as_deref());
    info!(backend = %config.kind(), "Selected storage backend");

    let mut persistence: Persistence = Persistence::connect(&config)?;

    if let Some(title) = &args.purge_title {
        let removed: usize = persistence.delete_poems_by_title(title)?;
        info!(title = %title, removed, "Purge complete");
        persistence.close();
        return Ok(());
    }

    let credential: AdminCredential = AdminCredential::new(&args.admin_password, args.bcrypt_cost)?;

    let persistence: Arc<Mutex<Persistence>> = Arc::new(Mutex::new(persistence));
    let app_state: AppState = AppState {
        persistence: Arc::clone(&persistence),
        credential: Arc::new(credential),
        has_postgres_url: matches!(config, BackendConfig::Postgres(_)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    match Arc::try_unwrap(persistence) {
        Ok(mutex) => mutex.into_inner().close(),
        Err(_) => warn!("Persistence still in use at shutdown; dropping without close"),
    }

    Ok(())
}
