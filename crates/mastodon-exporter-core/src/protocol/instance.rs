use serde::Deserialize;

/// `GET /api/v1/apps/verify_credentials` (only the fields we log).
#[derive(Debug, Clone, Deserialize)]
pub struct AppInfo {
    pub name: String,
}

/// `GET /api/v1/instance` (only the fields we log).
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceInfo {
    pub version: String,
}
