use anyhow::Result;

/// Turns a menu item's image reference into the value stored on the menu document
#[async_trait::async_trait]
pub trait AssetResolver: Send + Sync {
    async fn resolve(&self, image_reference: &str) -> Result<String>;
}

/// Uses image references as-is; they already point at hosted images
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteUrlAssets;

#[async_trait::async_trait]
impl AssetResolver for RemoteUrlAssets {
    async fn resolve(&self, image_reference: &str) -> Result<String> {
        log::info!("Using remote image URL: {}", image_reference);
        Ok(image_reference.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn remote_urls_pass_through_unchanged() {
        let url = "https://img.example.com/menu/margherita.png";
        assert_eq!(RemoteUrlAssets.resolve(url).await.unwrap(), url);
    }
}
