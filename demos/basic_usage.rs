//! Basic usage example for the Gouvre image client
//!
//! This example demonstrates:
//! - Uploading an image with a secret
//! - Downloading it back
//! - Creating a plain link and thumbnail links
//!
//! Reads `GOUVRE_URL` and `GOUVRE_TOKEN` from the environment (or `.env`).
//!
//! Run with: cargo run --example basic_usage -- path/to/image.png

use gouvre_client::{
    BatchThumbnailOptions, DownloadOptions, GouvreClient, LinkOptions, ThumbnailLinkOptions,
    UploadOptions,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gouvre_client=debug")),
        )
        .init();

    let endpoint = std::env::var("GOUVRE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let token = std::env::var("GOUVRE_TOKEN")?;
    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: basic_usage <image-file>"))?;

    let client = GouvreClient::with_endpoint(&endpoint, &token)?;
    let data = tokio::fs::read(&path).await?;
    let filename = std::path::Path::new(&path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image.png")
        .to_string();
    let secret = "demo-secret";

    println!("📤 Uploading '{}' ({} bytes)...", filename, data.len());
    client
        .upload_image(&filename, data, Some(UploadOptions::new().with_secret(secret)))
        .await?;

    let downloaded = client
        .download_image(&filename, Some(DownloadOptions::new().with_secret(secret)))
        .await?;
    println!("📥 Downloaded {} bytes back", downloaded.len());

    let link = client
        .create_link(
            &filename,
            Some(
                LinkOptions::new()
                    .with_secret(secret)
                    .with_expires(Duration::from_secs(3600)),
            ),
        )
        .await?;
    println!("🔗 {} (expires {})", link.url, link.expires_at);

    let thumb = client
        .create_thumbnail_link(
            256,
            &filename,
            Some(ThumbnailLinkOptions::new().with_secret(secret).square()),
        )
        .await?;
    println!("🖼️  256px square: {}", thumb.url);

    let batch = client
        .create_batch_thumbnail_links(
            &[filename.clone()],
            BatchThumbnailOptions::new(64).with_secret(secret),
        )
        .await?;
    for (name, url) in &batch.filename_to_url {
        println!("   {} -> {}", name, url);
    }

    Ok(())
}
