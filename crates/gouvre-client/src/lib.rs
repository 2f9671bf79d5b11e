//! # Gouvre Client SDK
//!
//! A client SDK for the Gouvre image server: upload images, download them,
//! and mint time-limited links to originals and thumbnails.
//!
//! Every operation is one authenticated HTTP exchange. Failures are returned
//! as-is: nothing is retried, cached or refreshed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gouvre_client::{GouvreClient, LinkOptions, ThumbnailLinkOptions};
//! use std::time::Duration;
//!
//! # async fn run() -> gouvre_client::Result<()> {
//! let client = GouvreClient::with_endpoint("http://localhost:8080", "your-token")?;
//!
//! // Upload an image
//! client.upload_image("cat.png", b"...".to_vec(), None).await?;
//!
//! // Share it for an hour
//! let link = client
//!     .create_link("cat.png", Some(LinkOptions::new().with_expires(Duration::from_secs(3600))))
//!     .await?;
//! println!("{} (expires {})", link.url, link.expires_at);
//!
//! // And a square 256px thumbnail of it
//! let thumb = client
//!     .create_thumbnail_link(256, "cat.png", Some(ThumbnailLinkOptions::new().square()))
//!     .await?;
//! println!("{}", thumb.url);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod duration;
mod error;
mod routes;
mod transport;
mod types;

pub use client::GouvreClient;
pub use config::{BodyEncoding, Config, SuccessStatus};
pub use duration::format_duration;
pub use error::{ClientError, Result};
pub use routes::Routes;
pub use types::{
    ApiError, BatchThumbnailOptions, BatchThumbnailResult, DownloadOptions, LinkOptions,
    LinkResult, ThumbnailLinkOptions, UploadLinkOptions, UploadOptions,
};

// Re-export so callers can name the status of an API failure
pub use reqwest::StatusCode;
