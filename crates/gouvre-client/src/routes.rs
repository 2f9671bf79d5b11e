//! Path templates for the image server API
//!
//! Every route is a path relative to the configured endpoint. Operations that
//! take a filename or token append it as one extra, percent-encoded segment.

/// Paths used by [`GouvreClient`](crate::GouvreClient)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Routes {
    /// `POST` target for named uploads
    pub upload: String,
    /// `POST {upload_by_token}/{token}`
    pub upload_by_token: String,
    /// `GET {images}/{filename}`
    pub images: String,
    /// `GET {download_by_token}/{token}`
    pub download_by_token: String,
    /// `POST` target for plain links
    pub link: String,
    /// `POST` target for upload links
    pub upload_link: String,
    /// `POST` target for a single thumbnail link
    pub thumbnail_link: String,
    /// `POST` target for batch thumbnail links
    pub batch_thumbnail_links: String,
    /// Query key carrying the square-crop flag
    pub square_param: String,
}

impl Routes {
    /// Routes of the current server
    pub fn standard() -> Self {
        Self {
            upload: "uploads".to_string(),
            upload_by_token: "uploads".to_string(),
            images: "images".to_string(),
            download_by_token: "uploads".to_string(),
            link: "links".to_string(),
            upload_link: "links/upload".to_string(),
            thumbnail_link: "links/thumbnails".to_string(),
            batch_thumbnail_links: "links/thumbnails/batch".to_string(),
            square_param: "square".to_string(),
        }
    }

    /// Routes of older deployments, which accept uploads on `/images`,
    /// serve token downloads from `/links` and mount thumbnails at the root
    pub fn legacy() -> Self {
        Self {
            upload: "images".to_string(),
            download_by_token: "links".to_string(),
            thumbnail_link: "thumbnails".to_string(),
            batch_thumbnail_links: "thumbnails/batch".to_string(),
            ..Self::standard()
        }
    }

    /// Routes of the first-generation image server: singular paths, the
    /// square flag sent as `cropped`. Pair with
    /// [`BodyEncoding::Form`](crate::BodyEncoding::Form), which is what that
    /// server parses.
    ///
    /// It has no token uploads, upload links or batch thumbnails; those
    /// routes follow the same singular naming.
    pub fn image_server() -> Self {
        Self {
            upload: "upload".to_string(),
            upload_by_token: "upload".to_string(),
            images: "download".to_string(),
            download_by_token: "link".to_string(),
            link: "link".to_string(),
            upload_link: "link/upload".to_string(),
            thumbnail_link: "thumbnail".to_string(),
            batch_thumbnail_links: "thumbnail/batch".to_string(),
            square_param: "cropped".to_string(),
        }
    }
}

impl Default for Routes {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_only_where_servers_do() {
        let standard = Routes::default();
        assert_eq!(standard, Routes::standard());

        let legacy = Routes::legacy();
        assert_eq!(legacy.upload, "images");
        assert_eq!(legacy.images, standard.images);
        assert_eq!(legacy.square_param, "square");

        let image_server = Routes::image_server();
        assert_eq!(image_server.images, "download");
        assert_eq!(image_server.thumbnail_link, "thumbnail");
        assert_eq!(image_server.square_param, "cropped");
    }
}
