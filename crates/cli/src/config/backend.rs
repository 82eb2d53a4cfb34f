//! Backend Config

use clap::Args;
use url::Url;

use achei_app::backend::BackendConfig;

/// Hosted backend settings.
#[derive(Debug, Args)]
pub struct BackendArgs {
    /// Backend project URL
    #[arg(long, env = "ACHEI_BACKEND_URL", global = true)]
    pub backend_url: Option<Url>,

    /// Public API key
    #[arg(long, env = "ACHEI_ANON_KEY", hide_env_values = true, hide = true, global = true)]
    pub anon_key: Option<String>,

    /// Session token of the signed-in lojista
    #[arg(long, env = "ACHEI_ACCESS_TOKEN", hide_env_values = true, hide = true, global = true)]
    pub access_token: Option<String>,

    /// Storage bucket for product images
    #[arg(long, env = "ACHEI_IMAGE_BUCKET", default_value = "product-images", global = true)]
    pub image_bucket: String,
}

impl BackendArgs {
    /// Connection settings, if both the URL and the API key are configured.
    pub fn backend_config(&self) -> Option<BackendConfig> {
        Some(BackendConfig {
            url: self.backend_url.clone()?,
            anon_key: self.anon_key.clone()?,
            access_token: self.access_token.clone(),
        })
    }
}
