//! Object storage for generated documents (Supabase Storage REST API).

use async_trait::async_trait;
use std::env;

pub const DEFAULT_BUCKET: &str = "documentos";

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub bucket_name: String,
}

impl SupabaseConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            supabase_url: env::var("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            supabase_anon_key: env::var("SUPABASE_ANON_KEY")?,
            bucket_name: env::var("BUCKET_NAME").unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
        })
    }

    pub fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.supabase_url,
            self.bucket_name,
            path.trim_start_matches('/')
        )
    }

    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.supabase_url,
            self.bucket_name,
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
pub trait ObjectStorage {
    /// Store `file_data` at `path`, replacing any existing object.
    async fn upload_file(&self, path: &str, file_data: &[u8]) -> Result<(), String>;

    /// Public URL of the object at `path`.
    fn get_public_url(&self, path: &str) -> String;
}

pub struct SupabaseStorage {
    config: SupabaseConfig,
    client: reqwest::Client,
}

impl SupabaseStorage {
    pub fn new(config: SupabaseConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload_file(&self, path: &str, file_data: &[u8]) -> Result<(), String> {
        let url = self.config.object_url(path);
        let content_type = mime_guess::from_path(path).first_or_octet_stream();

        log::debug!("Uploading {} bytes to {}", file_data.len(), url);
        let response = self
            .client
            .post(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.config.supabase_anon_key),
            )
            .header("apikey", &self.config.supabase_anon_key)
            .header(reqwest::header::CONTENT_TYPE, content_type.to_string())
            .header("x-upsert", "true")
            .body(file_data.to_vec())
            .send()
            .await
            .map_err(|e| format!("Failed to reach storage: {}", e))?;

        let status = response.status();
        if status.is_success() {
            log::info!("Stored {} in bucket {}", path, self.config.bucket_name);
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            log::error!("Storage upload of {} failed ({}): {}", path, status, body);
            Err(format!("Storage upload failed with status {}", status))
        }
    }

    fn get_public_url(&self, path: &str) -> String {
        self.config.public_url(path)
    }
}
