//! Wire-format models for the gateway's portal API.
//!
//! Records are server-owned; the client only inspects `id`, `name` and a few
//! display fields, so deserialization is tolerant (`#[serde(default)]`) and
//! unset fields are omitted from request bodies.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Contact placeholders used when a payload is built from flags alone.
pub const PLACEHOLDER_PHONE: &str = "+1 877-564-7700";
pub const CONTACT_MAIL_DOMAIN: &str = "apimanager.com";

// ─────────────────────────────────────────────────────────────────────────────
// Resource addressing
// ─────────────────────────────────────────────────────────────────────────────

/// The resource kinds the gateway exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Organization,
    Application,
    BackendApi,
    Proxy,
    User,
    ApiKey,
}

impl ResourceKind {
    /// List endpoint for the kind, filterable by `field`/`op`/`value`.
    /// API keys live under their application and are addressed by id.
    pub fn collection_path(&self) -> Option<&'static str> {
        match self {
            ResourceKind::Organization => Some("/organizations"),
            ResourceKind::Application => Some("/applications"),
            ResourceKind::BackendApi => Some("/apirepo"),
            ResourceKind::Proxy => Some("/proxies"),
            ResourceKind::User => Some("/users"),
            ResourceKind::ApiKey => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResourceKind::Organization => "organization",
            ResourceKind::Application => "application",
            ResourceKind::BackendApi => "backend API",
            ResourceKind::Proxy => "proxy",
            ResourceKind::User => "user",
            ResourceKind::ApiKey => "API key",
        };
        f.write_str(label)
    }
}

/// A name reference confirmed against the gateway. The `id` is the only value
/// mutating endpoints accept, and it is always resolver-produced.
#[derive(Debug, Clone)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub name: String,
    pub id: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub enabled: bool,
    pub development: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_host: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub apis: Vec<String>,
    pub organization_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendApi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub organization_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Proxy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub path: String,
    pub api_id: String,
    pub organization_id: String,
    pub version: String,
    pub state: String,
    pub security_profiles: Vec<SecurityProfile>,
    /// Certificate records returned by the gateway's cert-info endpoint,
    /// attached verbatim. The client never inspects them.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ca_certs: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub login_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub enabled: bool,
    pub organization_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Security profiles
// ─────────────────────────────────────────────────────────────────────────────

/// Authentication scheme attached to a proxy. Closed set; each variant builds
/// exactly one profile shape and is never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SecurityScheme {
    Passthrough,
    Apikey,
    Httpbasic,
    Oauth,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityProfile {
    pub name: String,
    pub is_default: bool,
    pub devices: Vec<SecurityDevice>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityDevice {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub order: u32,
    pub properties: BTreeMap<String, String>,
}

impl SecurityScheme {
    /// The default security profile for this scheme.
    pub fn profile(self) -> SecurityProfile {
        let device = match self {
            SecurityScheme::Passthrough => SecurityDevice {
                name: "Pass Through".into(),
                device_type: "passThrough".into(),
                order: 0,
                properties: properties(&[
                    ("subjectIdFieldName", "Pass Through"),
                    ("removeCredentialsOnSuccess", "true"),
                ]),
            },
            SecurityScheme::Apikey => SecurityDevice {
                name: "API Key".into(),
                device_type: "apiKey".into(),
                order: 1,
                properties: properties(&[
                    ("apiKeyFieldName", "KeyId"),
                    ("takeFrom", "HEADER"),
                    ("removeCredentialsOnSuccess", "true"),
                ]),
            },
            SecurityScheme::Httpbasic => SecurityDevice {
                name: "HTTP Basic".into(),
                device_type: "basic".into(),
                order: 1,
                properties: properties(&[
                    ("realm", "API Manager"),
                    ("removeCredentialsOnSuccess", "true"),
                    ("repeatAuthChecks", "false"),
                ]),
            },
            SecurityScheme::Oauth => SecurityDevice {
                name: "OAuth".into(),
                device_type: "oauth".into(),
                order: 1,
                properties: properties(&[
                    ("tokenStore", "OAuth Access Token Store"),
                    ("accessTokenLocation", "HEADER"),
                    ("authorizationHeaderPrefix", "Bearer"),
                    ("removeCredentialsOnSuccess", "true"),
                ]),
            },
        };
        SecurityProfile {
            name: "Default".into(),
            is_default: true,
            devices: vec![device],
        }
    }
}

fn properties(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
