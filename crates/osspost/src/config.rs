//! Configuration module
//!
//! Static OSS credentials and the upload origin, loaded from the environment
//! once at startup and immutable for the process lifetime.

use std::env;

/// OSS account credentials and upload endpoint.
#[derive(Clone, Debug)]
pub struct OssConfig {
    pub bucket: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    /// Upload origin, e.g. `https://my-bucket.oss-cn-hangzhou.aliyuncs.com`.
    /// Stored without a trailing slash; resolved URLs are `host + "/" + key`.
    pub upload_host: String,
}

impl OssConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = OssConfig {
            bucket: env::var("OSS_BUCKET")
                .map_err(|_| anyhow::anyhow!("OSS_BUCKET must be set"))?,
            access_key_id: env::var("OSS_ACCESS_KEY_ID")
                .map_err(|_| anyhow::anyhow!("OSS_ACCESS_KEY_ID must be set"))?,
            access_key_secret: env::var("OSS_ACCESS_KEY_SECRET")
                .map_err(|_| anyhow::anyhow!("OSS_ACCESS_KEY_SECRET must be set"))?,
            upload_host: env::var("OSS_UPLOAD_HOST")
                .map_err(|_| anyhow::anyhow!("OSS_UPLOAD_HOST must be set"))?
                .trim_end_matches('/')
                .to_string(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Build a config from explicit values. The host is normalized the same
    /// way as in `from_env`.
    pub fn new(
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
        upload_host: impl Into<String>,
    ) -> Result<Self, anyhow::Error> {
        let config = OssConfig {
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
            upload_host: upload_host.into().trim_end_matches('/').to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.bucket.is_empty() {
            return Err(anyhow::anyhow!("OSS_BUCKET cannot be empty"));
        }
        if self.access_key_id.is_empty() {
            return Err(anyhow::anyhow!("OSS_ACCESS_KEY_ID cannot be empty"));
        }
        if self.access_key_secret.is_empty() {
            return Err(anyhow::anyhow!("OSS_ACCESS_KEY_SECRET cannot be empty"));
        }
        if !self.upload_host.starts_with("http://") && !self.upload_host.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "OSS_UPLOAD_HOST must be an absolute http(s) origin"
            ));
        }
        Ok(())
    }
}
