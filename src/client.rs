//! HTTP transport for the gateway's portal API.
//!
//! Commands talk to the gateway through the [`Transport`] trait; the
//! production implementation wraps `reqwest`. Bodies cross the trait as
//! `serde_json::Value` so it stays object-safe; the typed helpers below
//! deserialize at the call site.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::CliConfig;
use crate::error::{Error, Result};

/// One field of a multipart upload.
#[derive(Debug, Clone)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        FormPart::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn file(name: &str, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            bytes,
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value>;

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value>;

    /// POST with an `application/x-www-form-urlencoded` body.
    async fn post_params(&self, path: &str, params: &[(&str, &str)]) -> Result<Value>;

    /// POST with a multipart body.
    async fn post_form(&self, path: &str, parts: Vec<FormPart>) -> Result<Value>;

    async fn delete(&self, path: &str) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed helpers
// ─────────────────────────────────────────────────────────────────────────────

pub async fn get_list<T: DeserializeOwned>(
    transport: &dyn Transport,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Vec<T>> {
    let value = transport.get(path, query).await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn get_one<T: DeserializeOwned>(transport: &dyn Transport, path: &str) -> Result<T> {
    let value = transport.get(path, &[]).await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn post_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    path: &str,
    body: Value,
) -> Result<T> {
    let value = transport.post(path, Some(body)).await?;
    Ok(serde_json::from_value(value)?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Production transport
// ─────────────────────────────────────────────────────────────────────────────

/// Transport backed by `reqwest`.
///
/// Certificate validation is disabled: gateways routinely run with
/// self-signed certificates on internal networks. Carries a fixed
/// `Authorization: Basic` header from the config. No retries, no timeout
/// override.
pub struct HttpTransport {
    http: reqwest::Client,
    base: String,
    authorization: String,
}

impl HttpTransport {
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        let base = config.base_url()?;
        let authorization = format!("Basic {}", config.authorization()?);
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self {
            http,
            base,
            authorization,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<Value> {
        let resp = req
            .header(AUTHORIZATION, self.authorization.clone())
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        let text = resp.text().await?;
        if text.is_empty() {
            Ok(Value::Null)
        } else {
            Ok(serde_json::from_str(&text)?)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        tracing::debug!(%path, "GET");
        self.send(self.http.get(self.url(path)).query(query)).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        tracing::debug!(%path, "POST");
        let mut req = self.http.post(self.url(path));
        if let Some(body) = body {
            req = req.json(&body);
        }
        self.send(req).await
    }

    async fn post_params(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        tracing::debug!(%path, "POST (form)");
        self.send(self.http.post(self.url(path)).form(params)).await
    }

    async fn post_form(&self, path: &str, parts: Vec<FormPart>) -> Result<Value> {
        tracing::debug!(%path, "POST (multipart)");
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    file_name,
                    bytes,
                } => form.part(name, reqwest::multipart::Part::bytes(bytes).file_name(file_name)),
            };
        }
        self.send(self.http.post(self.url(path)).multipart(form))
            .await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        tracing::debug!(%path, "DELETE");
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test spy
// ─────────────────────────────────────────────────────────────────────────────
