use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Custom claims Supabase places under `app_metadata`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Company the user belongs to.
    #[serde(default)]
    pub empresa_id: Option<Uuid>,
}

/// Claims of a Supabase-issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

impl Claims {
    /// Tenant the caller acts for, if the token carries one.
    pub fn tenant_id(&self) -> Option<Uuid> {
        self.app_metadata.empresa_id.filter(|id| !id.is_nil())
    }
}
