//! Proxy (virtualized API) commands.
//!
//! Creating a proxy is the composite workflow: resolve the backend API and
//! the organization by name, pick a security profile, optionally import a
//! certificate bundle, then submit the definition.

use std::path::PathBuf;

use prettytable::row;

use crate::client::{self, FormPart, Transport};
use crate::error::{Error, Result};
use crate::output;
use crate::resolver;
use crate::types::{Proxy, ResourceKind, SecurityScheme};

const DEFAULT_RESOURCE_PATH: &str = "/api/v1";

#[derive(Debug, clap::Args)]
pub struct CreateProxy {
    /// Proxy name
    #[arg(short, long)]
    pub name: String,

    /// Backend API name to virtualize
    #[arg(short, long)]
    pub api_name: String,

    /// Owning organization name
    #[arg(short, long)]
    pub org_name: String,

    /// Security profile for inbound calls
    #[arg(short, long, value_enum)]
    pub security: SecurityScheme,

    /// Resource path the proxy is served under
    #[arg(short, long)]
    pub resource_path: Option<String>,

    /// Certificate bundle for backend trust
    #[arg(short, long)]
    pub cert_path: Option<PathBuf>,

    /// Proxy version
    #[arg(long, default_value = "1.0")]
    pub proxy_version: String,

    /// Initial proxy state
    #[arg(long, default_value = "published")]
    pub proxy_state: String,
}

#[derive(Debug, clap::Args)]
pub struct DeleteProxy {
    /// Proxy name
    #[arg(short, long)]
    pub name: String,
}

pub async fn create(transport: &dyn Transport, args: &CreateProxy) -> Result<()> {
    let path = match &args.resource_path {
        Some(path) => path.clone(),
        None => {
            eprintln!("Resource path not provided, defaulting to {DEFAULT_RESOURCE_PATH}");
            DEFAULT_RESOURCE_PATH.to_string()
        }
    };

    let api = resolver::resolve(transport, ResourceKind::BackendApi, &args.api_name).await?;
    let org = resolver::resolve(transport, ResourceKind::Organization, &args.org_name).await?;

    if find_proxy(transport, &args.name).await?.is_some() {
        return Err(Error::conflict(format!(
            "proxy '{}' already exists",
            args.name
        )));
    }

    let ca_certs = match &args.cert_path {
        Some(cert_path) => import_certs(transport, cert_path).await?,
        None => Vec::new(),
    };

    let proxy = Proxy {
        name: args.name.clone(),
        path,
        api_id: api.id,
        organization_id: org.id,
        version: args.proxy_version.clone(),
        state: args.proxy_state.clone(),
        security_profiles: vec![args.security.profile()],
        ca_certs,
        ..Default::default()
    };

    let created: Proxy =
        client::post_json(transport, "/proxies", serde_json::to_value(&proxy)?).await?;
    println!("Proxy {} created", created.name);
    Ok(())
}

/// Upload a certificate bundle and return the gateway's cert records for use
/// as the proxy's `caCerts`.
async fn import_certs(
    transport: &dyn Transport,
    cert_path: &PathBuf,
) -> Result<Vec<serde_json::Value>> {
    let bytes = std::fs::read(cert_path)?;
    let file_name = cert_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cert.pem".into());
    let value = transport
        .post_form(
            "/certinfo",
            vec![
                FormPart::text("inbound", "false"),
                FormPart::text("outbound", "true"),
                FormPart::file("file", file_name, bytes),
            ],
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}

/// The proxy record matching `name`, when one exists.
async fn find_proxy(transport: &dyn Transport, name: &str) -> Result<Option<Proxy>> {
    let records = resolver::find_by_name(transport, ResourceKind::Proxy, name).await?;
    match records.into_iter().next() {
        Some(record) => Ok(Some(serde_json::from_value(record)?)),
        None => Ok(None),
    }
}

pub async fn list(transport: &dyn Transport) -> Result<()> {
    let proxies: Vec<Proxy> = client::get_list(transport, "/proxies", &[]).await?;
    if proxies.is_empty() {
        println!("No proxies found");
        return Ok(());
    }
    let mut table = output::clean_table(row!["NAME", "PATH", "STATE"]);
    for proxy in &proxies {
        table.add_row(row![proxy.name, proxy.path, proxy.state]);
    }
    table.printstd();
    Ok(())
}

pub async fn delete(transport: &dyn Transport, args: &DeleteProxy) -> Result<()> {
    let proxy = find_proxy(transport, &args.name)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: ResourceKind::Proxy,
            name: args.name.clone(),
        })?;

    // Published proxies are externally reachable; refuse without calling the
    // delete endpoint.
    if proxy.state == "published" {
        return Err(Error::conflict(format!(
            "proxy '{}' is published, unpublish it before deleting",
            args.name
        )));
    }

    let id = proxy
        .id
        .ok_or_else(|| Error::Api {
            status: 0,
            message: "proxy record returned without an id".into(),
        })?;
    transport.delete(&format!("/proxies/{id}")).await?;
    println!("Proxy {} deleted", args.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::spy::{Call, SpyTransport};

    fn create_args() -> CreateProxy {
        CreateProxy {
            name: "front".into(),
            api_name: "payments".into(),
            org_name: "acme".into(),
            security: SecurityScheme::Passthrough,
            resource_path: Some("/pay/v1".into()),
            cert_path: None,
            proxy_version: "1.0".into(),
            proxy_state: "published".into(),
        }
    }

    #[tokio::test]
    async fn deleting_a_published_proxy_never_issues_the_delete_call() {
        let spy = SpyTransport::with_responses(vec![json!([
            {"id": "p-1", "name": "front", "state": "published"}
        ])]);
        let args = DeleteProxy {
            name: "front".into(),
        };

        let err = delete(&spy, &args).await.unwrap_err();

        assert!(matches!(err, Error::Conflict { .. }));
        assert_eq!(spy.delete_count(), 0);
    }

    #[tokio::test]
    async fn deleting_an_unpublished_proxy_targets_its_id() {
        let spy = SpyTransport::with_responses(vec![json!([
            {"id": "p-1", "name": "front", "state": "unpublished"}
        ])]);
        let args = DeleteProxy {
            name: "front".into(),
        };

        delete(&spy, &args).await.unwrap();

        assert_eq!(
            spy.calls()[1],
            Call::Delete {
                path: "/proxies/p-1".into()
            }
        );
    }

    #[tokio::test]
    async fn create_resolves_both_parents_and_posts_the_assembled_definition() {
        let spy = SpyTransport::with_responses(vec![
            json!([{"id": "api-1", "name": "payments"}]),
            json!([{"id": "org-1", "name": "acme"}]),
            json!([]), // no proxy with that name yet
            json!({"id": "p-9", "name": "front"}),
        ]);

        create(&spy, &create_args()).await.unwrap();

        let calls = spy.calls();
        assert_eq!(calls.len(), 4);
        match &calls[3] {
            Call::Post { path, body } => {
                assert_eq!(path, "/proxies");
                let body = body.as_ref().unwrap();
                assert_eq!(body["apiId"], "api-1");
                assert_eq!(body["organizationId"], "org-1");
                assert_eq!(body["path"], "/pay/v1");
                assert_eq!(body["state"], "published");
                assert_eq!(body["version"], "1.0");
                assert_eq!(
                    body["securityProfiles"][0]["devices"][0]["type"],
                    "passThrough"
                );
                assert!(body.get("caCerts").is_none());
            }
            other => panic!("expected POST, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_aborts_on_unknown_backend_api_without_mutating() {
        let spy = SpyTransport::with_responses(vec![json!([])]);

        let err = create(&spy, &create_args()).await.unwrap_err();

        assert!(matches!(
            err,
            Error::NotFound {
                kind: ResourceKind::BackendApi,
                ..
            }
        ));
        assert_eq!(spy.calls().len(), 1);
    }

    #[tokio::test]
    async fn create_refuses_a_duplicate_proxy_name() {
        let spy = SpyTransport::with_responses(vec![
            json!([{"id": "api-1", "name": "payments"}]),
            json!([{"id": "org-1", "name": "acme"}]),
            json!([{"id": "p-1", "name": "front", "state": "published"}]),
        ]);

        let err = create(&spy, &create_args()).await.unwrap_err();

        assert!(matches!(err, Error::Conflict { .. }));
        // Existence probe ran, but nothing was posted.
        assert_eq!(spy.calls().len(), 3);
    }
}
