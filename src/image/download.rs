//! Fetching generated images from their hosted URL.

use crate::error::{Error, Result};
use crate::image::types::ImageFormat;

/// Downloads the image at `url`, returning its bytes and detected format.
///
/// Hosted result URLs expire after about an hour, so call this soon after
/// generation.
pub async fn download(
    client: &reqwest::Client,
    url: &str,
) -> Result<(Vec<u8>, Option<ImageFormat>)> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            code: None,
            message: "Failed to download image from URL".into(),
        });
    }

    let data = response.bytes().await?.to_vec();
    let format = ImageFormat::from_magic_bytes(&data);
    tracing::debug!(bytes = data.len(), ?format, "downloaded generated image");
    Ok((data, format))
}
