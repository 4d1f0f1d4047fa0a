use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::{GalleryError, Result};
use crate::state::MediaItem;

/// Fetch the gallery manifest and normalize its entries.
///
/// The manifest is always requested fresh. Transport errors, non-success
/// statuses and bodies that aren't JSON are load failures; valid JSON that
/// isn't an array is an empty gallery.
pub async fn fetch_manifest(client: Client, url: Url) -> Result<Vec<MediaItem>> {
    tracing::info!(%url, "fetching gallery manifest");

    let response = client
        .get(url)
        .header(CACHE_CONTROL, "no-store")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(GalleryError::Status(status));
    }

    let body = response.bytes().await?;
    let items = parse_manifest(&body)?;

    tracing::info!(count = items.len(), "gallery manifest loaded");
    Ok(items)
}

/// Parse a manifest body into normalized items, in document order
pub fn parse_manifest(body: &[u8]) -> Result<Vec<MediaItem>> {
    let document: Value = serde_json::from_slice(body)?;

    let Value::Array(entries) = document else {
        tracing::warn!("gallery manifest is not an array, treating it as empty");
        return Ok(Vec::new());
    };

    Ok(entries.iter().map(MediaItem::from_value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{client, testing::serve_once};
    use std::time::Duration;

    #[test]
    fn test_every_element_kept_in_order() {
        let body = br#"[
            {"id": "a", "title": "Uno"},
            42,
            {"id": "c", "type": "video", "url": "https://youtu.be/x"},
            null
        ]"#;
        let items = parse_manifest(body).unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].id, "a");
        assert_eq!(items[2].id, "c");
        assert!(items[2].is_video());
    }

    #[test]
    fn test_non_array_is_empty() {
        assert!(parse_manifest(b"{}").unwrap().is_empty());
        assert!(parse_manifest(br#""gallery""#).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            parse_manifest(b"<html>not found</html>"),
            Err(GalleryError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_manifest() {
        let body = br#"[{"id":"a","type":"photo","category":"bodas","url":"x.jpg"}]"#.to_vec();
        let url = serve_once("200 OK", "application/json", body).await;

        let items = fetch_manifest(client(Duration::from_secs(5)).unwrap(), url)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].thumb, "x.jpg");
    }

    #[tokio::test]
    async fn test_fetch_object_is_empty() {
        let url = serve_once("200 OK", "application/json", b"{}".to_vec()).await;

        let items = fetch_manifest(client(Duration::from_secs(5)).unwrap(), url)
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let url = serve_once("500 Internal Server Error", "text/plain", b"boom".to_vec()).await;

        let result = fetch_manifest(client(Duration::from_secs(5)).unwrap(), url).await;
        assert!(matches!(result, Err(GalleryError::Status(s)) if s.as_u16() == 500));
    }
}
