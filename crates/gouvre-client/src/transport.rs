//! Authenticated request primitives
//!
//! Every public operation goes through one of the three senders below and
//! then through [`Transport::interpret`]. Bodies are fully buffered.
//!
//! Only the host is logged: paths carry filenames and tokens, queries carry
//! secrets.

use crate::{
    config::{BodyEncoding, SuccessStatus},
    types::FormFields,
    ClientError, Result,
};
use bytes::Bytes;
use reqwest::{header, multipart, Client, RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

/// Multipart field holding the file bytes
const FILE_FIELD: &str = "file";

/// File name reported for the uploaded part
const FILE_PART_NAME: &str = "file";

/// Shared HTTP plumbing behind [`GouvreClient`](crate::GouvreClient)
#[derive(Clone)]
pub(crate) struct Transport {
    http: Client,
    token: String,
    body_encoding: BodyEncoding,
    success_status: SuccessStatus,
}

impl Transport {
    pub(crate) fn new(
        http: Client,
        token: String,
        body_encoding: BodyEncoding,
        success_status: SuccessStatus,
    ) -> Self {
        Self {
            http,
            token,
            body_encoding,
            success_status,
        }
    }

    /// `GET` with the bearer token
    pub(crate) async fn get(&self, url: Url) -> Result<Response> {
        debug!("Sending GET request to {}", host(&url));
        let req = self.http.get(url);
        self.send(req).await
    }

    /// `POST` a link request body with the bearer token, encoded as the
    /// configured [`BodyEncoding`] asks
    pub(crate) async fn post_body<T>(&self, url: Url, body: &T) -> Result<Response>
    where
        T: Serialize + FormFields + ?Sized,
    {
        let data = match self.body_encoding {
            BodyEncoding::Json | BodyEncoding::LegacyForm => {
                serde_json::to_vec(body).map_err(ClientError::Encode)?
            }
            BodyEncoding::Form => encode_form(body).into_bytes(),
        };

        debug!("Sending POST request to {} ({} byte body)", host(&url), data.len());
        let req = self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, self.body_encoding.content_type())
            .body(data);
        self.send(req).await
    }

    /// `POST` a multipart form: the file under [`FILE_FIELD`] followed by the
    /// given text fields. reqwest sets the boundary content type.
    pub(crate) async fn post_multipart(
        &self,
        url: Url,
        file: Bytes,
        fields: &[(&'static str, &str)],
    ) -> Result<Response> {
        let file_len = file.len();
        let part = multipart::Part::stream_with_length(file, file_len as u64)
            .file_name(FILE_PART_NAME)
            .mime_str("application/octet-stream")?;

        let mut form = multipart::Form::new().part(FILE_FIELD, part);
        for (name, value) in fields {
            form = form.text(*name, value.to_string());
        }

        debug!("Sending multipart POST to {} ({} byte file)", host(&url), file_len);
        let req = self.http.post(url).multipart(form);
        self.send(req).await
    }

    /// Read the whole body and branch on the status policy
    pub(crate) async fn interpret(&self, response: Response) -> Result<Bytes> {
        let status = response.status();
        let body = response.bytes().await?;

        if !self.success_status.accepts(status) {
            warn!("Request failed with status {}", status);
            return Err(ClientError::Api {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let response = req.bearer_auth(&self.token).send().await?;
        Ok(response)
    }
}

/// `application/x-www-form-urlencoded` rendering of a request body
pub(crate) fn encode_form<T: FormFields + ?Sized>(body: &T) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(body.form_fields())
        .finish()
}

fn host(url: &Url) -> &str {
    url.host_str().unwrap_or("<no host>")
}
