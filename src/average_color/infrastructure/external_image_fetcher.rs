use super::error::InfrastructureError;
use base64::decode;
use std::time::Duration;

pub struct DefaultExternalImageFetcher {
    client: reqwest::Client,
}

impl DefaultExternalImageFetcher {
    /// Builds the shared HTTP client; every outbound fetch is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub async fn fetch_image_from_url_impl(&self, url: &str) -> Result<Vec<u8>, InfrastructureError> {
        if url.starts_with("data:") {
            let base64_data = url
                .split_once(',')
                .map(|(_, data)| data)
                .ok_or_else(|| InfrastructureError::DecodingError("Invalid data URL: missing comma".to_string()))?;
            return Ok(decode(base64_data)?);
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        // 404 ページなどを画像としてデコードしないよう、ここで弾く
        if !status.is_success() {
            return Err(InfrastructureError::UnexpectedStatus(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
