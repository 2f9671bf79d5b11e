//! End-to-end tests against an in-process image server
//!
//! The server below speaks the same routes and envelopes as the real one, so
//! these tests cover multipart parsing and secrets on the server side.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use gouvre_client::{
    BatchThumbnailOptions, DownloadOptions, GouvreClient, LinkOptions, ThumbnailLinkOptions,
    UploadOptions,
};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::net::TcpListener;

const TOKEN: &str = "e2e-token";

#[derive(Clone, Debug)]
struct StoredImage {
    data: Vec<u8>,
    secret: Option<String>,
}

#[derive(Default)]
struct ImageServer {
    images: Mutex<HashMap<String, StoredImage>>,
}

type SharedState = Arc<ImageServer>;

#[derive(Deserialize)]
struct SecretQuery {
    secret: Option<String>,
}

#[derive(Deserialize)]
struct LinkQuery {
    expires: Option<String>,
    square: Option<bool>,
}

#[derive(Deserialize)]
struct LinkRequest {
    filename: String,
    secret: Option<String>,
}

#[derive(Deserialize)]
struct BatchRequest {
    resolution: u32,
    filenames: Vec<String>,
    secret: Option<String>,
}

fn error(status: StatusCode, msg: &str) -> Response {
    let body = json!({"code": status.as_u16(), "status": status.canonical_reason(), "msg": msg});
    (status, Json(body)).into_response()
}

fn check_auth(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", TOKEN);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, "invalid token")),
    }
}

fn check_secret(
    state: &ImageServer,
    filename: &str,
    secret: Option<&str>,
) -> Result<Vec<u8>, Response> {
    let images = state.images.lock();
    let image = images
        .get(filename)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "no such file"))?;
    if image.secret.as_deref() != secret {
        return Err(error(StatusCode::FORBIDDEN, "wrong secret"));
    }
    Ok(image.data.clone())
}

async fn upload(
    State(state): State<SharedState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }

    let mut data = None;
    let mut filename = None;
    let mut secret = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => data = field.bytes().await.ok().map(|b| b.to_vec()),
            "filename" => filename = field.text().await.ok(),
            "secret" => secret = field.text().await.ok(),
            _ => {}
        }
    }

    match (data, filename) {
        (Some(data), Some(filename)) => {
            state.images.lock().insert(filename, StoredImage { data, secret });
            StatusCode::CREATED.into_response()
        }
        _ => error(StatusCode::BAD_REQUEST, "file and filename are required"),
    }
}

async fn download(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(filename): Path<String>,
    Query(query): Query<SecretQuery>,
) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    match check_secret(&state, &filename, query.secret.as_deref()) {
        Ok(data) => data.into_response(),
        Err(response) => response,
    }
}

async fn create_link(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<LinkQuery>,
    Json(req): Json<LinkRequest>,
) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    if let Err(response) = check_secret(&state, &req.filename, req.secret.as_deref()) {
        return response;
    }

    let expires = query.expires.unwrap_or_else(|| "24h0m0s".to_string());
    Json(json!({
        "url": format!("https://img.test/l/{}?ttl={}", req.filename, expires),
        "expiresAt": "2024-01-01T00:00:00Z",
    }))
    .into_response()
}

async fn create_batch_links(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<LinkQuery>,
    Json(req): Json<BatchRequest>,
) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }

    let shape = if query.square.unwrap_or(false) { "sq" } else { "fit" };
    let mut links = HashMap::new();
    for filename in &req.filenames {
        if let Err(response) = check_secret(&state, filename, req.secret.as_deref()) {
            return response;
        }
        links.insert(
            filename.clone(),
            format!("https://img.test/t/{}/{}/{}", req.resolution, shape, filename),
        );
    }

    Json(json!({"expiresAt": "2024-01-01T00:00:00Z", "filenameToUrl": links})).into_response()
}

// Helper to spawn a server on a random port
async fn spawn_server() -> String {
    let state: SharedState = Arc::new(ImageServer::default());
    let app = Router::new()
        .route("/uploads", post(upload))
        .route("/images/{filename}", get(download))
        .route("/links", post(create_link))
        .route("/links/thumbnails/batch", post(create_batch_links))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_upload_then_download_with_secret() {
    let base_url = spawn_server().await;
    let client = GouvreClient::with_endpoint(&base_url, TOKEN).unwrap();

    client
        .upload_image(
            "cat.png",
            b"fake png bytes".to_vec(),
            Some(UploadOptions::new().with_secret("meow")),
        )
        .await
        .unwrap();

    let data = client
        .download_image("cat.png", Some(DownloadOptions::new().with_secret("meow")))
        .await
        .unwrap();
    assert_eq!(data.as_ref(), b"fake png bytes");

    // Without the secret the server refuses
    let error = client.download_image("cat.png", None).await.unwrap_err();
    assert!(error.is_unauthorized());
    assert_eq!(error.api_error().unwrap().message, "wrong secret");
}

#[tokio::test]
async fn test_public_image_links() {
    let base_url = spawn_server().await;
    let client = GouvreClient::with_endpoint(&base_url, TOKEN).unwrap();

    for name in ["a.png", "b.png"] {
        client.upload_image(name, name.as_bytes().to_vec(), None).await.unwrap();
    }

    let link = client
        .create_link("a.png", Some(LinkOptions::new().with_expires(Duration::from_secs(3600))))
        .await
        .unwrap();
    assert_eq!(link.url, "https://img.test/l/a.png?ttl=1h0m0s");
    assert_eq!(link.expires_at, "2024-01-01T00:00:00Z");

    let default_link = client.create_link("b.png", None).await.unwrap();
    assert!(default_link.url.ends_with("ttl=24h0m0s"));

    let filenames = vec!["a.png".to_string(), "b.png".to_string()];
    let batch = client
        .create_batch_thumbnail_links(&filenames, BatchThumbnailOptions::new(128).square())
        .await
        .unwrap();
    assert_eq!(batch.filename_to_url.len(), 2);
    assert_eq!(batch.filename_to_url["a.png"], "https://img.test/t/128/sq/a.png");
    assert_eq!(batch.filename_to_url["b.png"], "https://img.test/t/128/sq/b.png");
}

#[tokio::test]
async fn test_wrong_bearer_token_is_rejected() {
    let base_url = spawn_server().await;
    let client = GouvreClient::with_endpoint(&base_url, "not-the-token").unwrap();

    let error = client
        .upload_image("cat.png", b"x".to_vec(), None)
        .await
        .unwrap_err();
    assert_eq!(error.status(), Some(gouvre_client::StatusCode::UNAUTHORIZED));
    assert!(error.to_string().contains("invalid token"));
}

#[tokio::test]
async fn test_missing_image_is_not_found() {
    let base_url = spawn_server().await;
    let client = GouvreClient::with_endpoint(&base_url, TOKEN).unwrap();

    let error = client.download_image("ghost.png", None).await.unwrap_err();
    assert!(error.is_not_found());

    // No thumbnail route on this server: axum's own 404 has an empty body
    let error = client
        .create_thumbnail_link(64, "ghost.png", Some(ThumbnailLinkOptions::new()))
        .await
        .unwrap_err();
    assert!(error.is_not_found());
    assert!(error.api_error().is_none());
}
