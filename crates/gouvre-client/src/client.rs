//! Main client implementation

use crate::{
    duration::format_duration,
    transport::Transport,
    types::*,
    ClientError, Config, Result,
};
use bytes::Bytes;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Image server client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct GouvreClient {
    config: Config,
    transport: Transport,
}

impl GouvreClient {
    /// Create a new client with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Ok(agent) = header::HeaderValue::from_str(&config.user_agent) {
            headers.insert(header::USER_AGENT, agent);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self::with_http_client(config, http))
    }

    /// Create with endpoint URL and bearer token
    pub fn with_endpoint(endpoint: &str, token: &str) -> Result<Self> {
        Self::new(Config::new(endpoint).with_token(token))
    }

    /// Create on top of a caller-configured reqwest client.
    ///
    /// `config.timeout` and `config.user_agent` are ignored; the given
    /// client's own settings apply.
    pub fn with_http_client(config: Config, http: Client) -> Self {
        let transport = Transport::new(
            http,
            config.access_token.clone(),
            config.body_encoding,
            config.success_status,
        );
        Self { config, transport }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Uploads ====================

    /// Upload an image under the given filename
    #[instrument(skip(self, data, options), fields(size = tracing::field::Empty))]
    pub async fn upload_image(
        &self,
        filename: &str,
        data: impl Into<Bytes>,
        options: Option<UploadOptions>,
    ) -> Result<()> {
        let opts = options.unwrap_or_default();
        let data = data.into();
        tracing::Span::current().record("size", data.len());

        let mut fields = Vec::with_capacity(2);
        if !filename.is_empty() {
            fields.push(("filename", filename));
        }
        if let Some(secret) = non_empty(&opts.secret) {
            fields.push(("secret", secret));
        }

        let url = self.endpoint(&self.config.routes.upload, None, &[])?;
        let response = self.transport.post_multipart(url, data, &fields).await?;
        self.transport.interpret(response).await?;
        Ok(())
    }

    /// Upload an image against a server-issued upload token
    #[instrument(skip(self, token, data, options), fields(size = tracing::field::Empty))]
    pub async fn upload_image_from_token(
        &self,
        token: &str,
        data: impl Into<Bytes>,
        options: Option<UploadOptions>,
    ) -> Result<()> {
        let opts = options.unwrap_or_default();
        let data = data.into();
        tracing::Span::current().record("size", data.len());

        let mut fields = Vec::with_capacity(1);
        if let Some(secret) = non_empty(&opts.secret) {
            fields.push(("secret", secret));
        }

        let url = self.endpoint(&self.config.routes.upload_by_token, Some(token), &[])?;
        let response = self.transport.post_multipart(url, data, &fields).await?;
        self.transport.interpret(response).await?;
        Ok(())
    }

    // ==================== Downloads ====================

    /// Download an image by filename
    #[instrument(skip(self, options))]
    pub async fn download_image(
        &self,
        filename: &str,
        options: Option<DownloadOptions>,
    ) -> Result<Bytes> {
        let opts = options.unwrap_or_default();
        let query = secret_query(&opts.secret);

        let url = self.endpoint(&self.config.routes.images, Some(filename), &query)?;
        let response = self.transport.get(url).await?;
        let data = self.transport.interpret(response).await?;

        debug!("Downloaded {} bytes", data.len());
        Ok(data)
    }

    /// Download an image through a server-issued token
    #[instrument(skip(self, token, options))]
    pub async fn download_image_by_token(
        &self,
        token: &str,
        options: Option<DownloadOptions>,
    ) -> Result<Bytes> {
        let opts = options.unwrap_or_default();
        let query = secret_query(&opts.secret);

        let url = self.endpoint(&self.config.routes.download_by_token, Some(token), &query)?;
        let response = self.transport.get(url).await?;
        let data = self.transport.interpret(response).await?;

        debug!("Downloaded {} bytes", data.len());
        Ok(data)
    }

    // ==================== Links ====================

    /// Create a time-limited link to an image
    #[instrument(skip(self, options))]
    pub async fn create_link(
        &self,
        filename: &str,
        options: Option<LinkOptions>,
    ) -> Result<LinkResult> {
        let opts = options.unwrap_or_default();
        let body = CreateLinkRequest {
            filename,
            secret: non_empty(&opts.secret),
        };

        let query = link_query(opts.expires, None);
        let url = self.endpoint(&self.config.routes.link, None, &query)?;
        self.post_for(url, &body).await
    }

    /// Create a link that accepts an upload for the given filename
    #[instrument(skip(self, options))]
    pub async fn create_upload_link(
        &self,
        filename: &str,
        options: Option<UploadLinkOptions>,
    ) -> Result<LinkResult> {
        let opts = options.unwrap_or_default();
        let body = CreateUploadLinkRequest {
            filename,
            secret: non_empty(&opts.secret),
            resolutions: &opts.resolutions,
        };

        let query = link_query(opts.expires, None);
        let url = self.endpoint(&self.config.routes.upload_link, None, &query)?;
        self.post_for(url, &body).await
    }

    /// Create a link to a thumbnail of an image
    #[instrument(skip(self, options))]
    pub async fn create_thumbnail_link(
        &self,
        resolution: u32,
        filename: &str,
        options: Option<ThumbnailLinkOptions>,
    ) -> Result<LinkResult> {
        let opts = options.unwrap_or_default();
        let body = CreateThumbnailLinkRequest {
            resolution,
            filename,
            secret: non_empty(&opts.secret),
        };

        let query = link_query(
            opts.expires,
            Some((self.config.routes.square_param.as_str(), opts.square)),
        );
        let url = self.endpoint(&self.config.routes.thumbnail_link, None, &query)?;
        self.post_for(url, &body).await
    }

    /// Create thumbnail links for several images in one request
    #[instrument(
        skip(self, filenames, options),
        fields(count = filenames.len(), resolution = options.resolution)
    )]
    pub async fn create_batch_thumbnail_links(
        &self,
        filenames: &[String],
        options: BatchThumbnailOptions,
    ) -> Result<BatchThumbnailResult> {
        let body = CreateBatchThumbnailLinksRequest {
            resolution: options.resolution,
            filenames,
            secret: non_empty(&options.secret),
        };

        let query = link_query(
            options.expires,
            Some((self.config.routes.square_param.as_str(), options.square)),
        );
        let url = self.endpoint(&self.config.routes.batch_thumbnail_links, None, &query)?;
        self.post_for(url, &body).await
    }

    // ==================== Helper Methods ====================

    /// Join a route, an optional path parameter and a query onto the endpoint
    fn endpoint(
        &self,
        route: &str,
        param: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Url> {
        build_url(self.config.base_url(), route, param, query)
    }

    async fn post_for<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + FormFields + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.transport.post_body(url, body).await?;
        let data = self.transport.interpret(response).await?;
        serde_json::from_slice(&data).map_err(ClientError::Decode)
    }
}

fn build_url(
    endpoint: &str,
    route: &str,
    param: Option<&str>,
    query: &[(&str, String)],
) -> Result<Url> {
    let invalid = |source: url::ParseError| ClientError::InvalidUrl {
        url: endpoint.to_string(),
        source,
    };

    let mut url = Url::parse(endpoint).map_err(invalid)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
        segments.pop_if_empty();
        segments.extend(route.split('/').filter(|s| !s.is_empty()));
        if let Some(param) = param {
            segments.push(param);
        }
    }

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

fn secret_query(secret: &Option<String>) -> Vec<(&'static str, String)> {
    non_empty(secret)
        .map(|s| vec![("secret", s.to_string())])
        .unwrap_or_default()
}

/// `expires` when set, then the square flag for thumbnail routes
fn link_query<'a>(
    expires: Option<Duration>,
    square: Option<(&'a str, bool)>,
) -> Vec<(&'a str, String)> {
    let mut query = Vec::with_capacity(2);
    if let Some(expires) = expires {
        query.push(("expires", format_duration(expires)));
    }
    if let Some((key, square)) = square {
        query.push((key, square.to_string()));
    }
    query
}
