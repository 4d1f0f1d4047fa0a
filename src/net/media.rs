/// Thumbnail and preview downloads
///
/// Thumbnails are decoded and downscaled on a blocking worker so the grid
/// never holds full-size photos. Previews are handed to iced as encoded
/// bytes and decoded by the renderer.

use image::imageops::FilterType;
use reqwest::Client;
use url::Url;

use crate::error::{GalleryError, Result};

/// Longest edge of generated thumbnails
const THUMBNAIL_SIZE: u32 = 480;

/// A decoded, downscaled RGBA thumbnail
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Download a resource and return its body
pub async fn download(client: &Client, url: Url) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(GalleryError::Status(status));
    }

    Ok(response.bytes().await?.to_vec())
}

/// Download and downscale a thumbnail
pub async fn load_thumbnail(client: Client, url: Url) -> Result<Thumbnail> {
    let bytes = download(&client, url.clone()).await?;

    // Decoding is CPU-bound
    let thumbnail = tokio::task::spawn_blocking(move || decode_thumbnail(&bytes)).await??;

    tracing::debug!(%url, width = thumbnail.width, height = thumbnail.height, "thumbnail ready");
    Ok(thumbnail)
}

/// Download the full-size photo shown in the modal
pub async fn load_preview(client: Client, url: Url) -> Result<Vec<u8>> {
    let bytes = download(&client, url.clone()).await?;
    tracing::debug!(%url, size = bytes.len(), "preview downloaded");
    Ok(bytes)
}

/// Decode an encoded image and fit it within the thumbnail bounds
pub fn decode_thumbnail(bytes: &[u8]) -> Result<Thumbnail> {
    let img = image::load_from_memory(bytes)?;

    let img = if img.width() > THUMBNAIL_SIZE || img.height() > THUMBNAIL_SIZE {
        img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Triangle)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{client, testing::serve_once};
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use std::time::Duration;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 120, 40]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_large_image_is_downscaled() {
        let thumb = decode_thumbnail(&png(1200, 600)).unwrap();
        assert_eq!(thumb.width, 480);
        assert_eq!(thumb.height, 240);
        assert_eq!(thumb.pixels.len(), (480 * 240 * 4) as usize);
    }

    #[test]
    fn test_small_image_is_kept() {
        let thumb = decode_thumbnail(&png(64, 32)).unwrap();
        assert_eq!((thumb.width, thumb.height), (64, 32));
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(matches!(
            decode_thumbnail(b"definitely not an image"),
            Err(GalleryError::Image(_))
        ));
    }

    #[tokio::test]
    async fn test_load_thumbnail_over_http() {
        let url = serve_once("200 OK", "image/png", png(800, 800)).await;

        let thumb = load_thumbnail(client(Duration::from_secs(5)).unwrap(), url)
            .await
            .unwrap();
        assert_eq!((thumb.width, thumb.height), (480, 480));
    }

    #[tokio::test]
    async fn test_missing_preview() {
        let url = serve_once("404 Not Found", "text/plain", b"nope".to_vec()).await;

        let result = load_preview(client(Duration::from_secs(5)).unwrap(), url).await;
        assert!(matches!(result, Err(GalleryError::Status(_))));
    }
}
