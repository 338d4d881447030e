//! Backend API commands.
//!
//! Backend APIs are registered by importing a specification file through the
//! repository's multipart import endpoint.

use std::path::PathBuf;

use prettytable::row;

use crate::client::{self, FormPart, Transport};
use crate::error::Result;
use crate::output;
use crate::resolver;
use crate::types::{BackendApi, ResourceKind};

#[derive(Debug, clap::Args)]
pub struct CreateApi {
    /// Name to register the backend API under
    #[arg(short, long)]
    pub name: String,

    /// Swagger/OpenAPI specification file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Owning organization name
    #[arg(short, long)]
    pub org_name: String,
}

#[derive(Debug, clap::Args)]
pub struct DeleteApi {
    /// Backend API name
    #[arg(short, long)]
    pub name: String,
}

pub async fn create(transport: &dyn Transport, args: &CreateApi) -> Result<()> {
    // Read the spec before touching the network.
    let bytes = std::fs::read(&args.file)?;
    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "swagger.json".into());

    let org = resolver::resolve(transport, ResourceKind::Organization, &args.org_name).await?;

    let value = transport
        .post_form(
            "/apirepo/import",
            vec![
                FormPart::text("organizationId", org.id),
                FormPart::text("name", args.name.clone()),
                FormPart::text("type", "swagger"),
                FormPart::file("file", file_name, bytes),
            ],
        )
        .await?;
    let api: BackendApi = serde_json::from_value(value)?;
    println!(
        "Backend API {} created with id {}",
        api.name,
        api.id.as_deref().unwrap_or("?")
    );
    Ok(())
}

pub async fn list(transport: &dyn Transport) -> Result<()> {
    let apis: Vec<BackendApi> = client::get_list(transport, "/apirepo", &[]).await?;
    if apis.is_empty() {
        println!("No backend APIs found");
        return Ok(());
    }
    let mut table = output::clean_table(row!["NAME", "ID"]);
    for api in &apis {
        table.add_row(row![api.name, api.id.as_deref().unwrap_or("")]);
    }
    table.printstd();
    Ok(())
}

pub async fn delete(transport: &dyn Transport, args: &DeleteApi) -> Result<()> {
    let api = resolver::resolve(transport, ResourceKind::BackendApi, &args.name).await?;
    transport.delete(&format!("/apirepo/{}", api.id)).await?;
    println!("Backend API {} deleted", args.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use serde_json::json;

    use super::*;
    use crate::client::spy::{Call, SpyTransport};
    use crate::error::Error;

    #[tokio::test]
    async fn create_imports_the_spec_under_the_resolved_organization() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"swagger": "2.0"}}"#).unwrap();

        let spy = SpyTransport::with_responses(vec![
            json!([{"id": "org-1", "name": "acme"}]),
            json!({"id": "api-1", "name": "payments", "organizationId": "org-1"}),
        ]);
        let args = CreateApi {
            name: "payments".into(),
            file: file.path().to_path_buf(),
            org_name: "acme".into(),
        };

        create(&spy, &args).await.unwrap();

        let calls = spy.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1],
            Call::PostForm {
                path: "/apirepo/import".into(),
                fields: vec![
                    "organizationId".into(),
                    "name".into(),
                    "type".into(),
                    "file".into(),
                ],
            }
        );
    }

    #[tokio::test]
    async fn unreadable_spec_file_aborts_before_any_network_call() {
        let spy = SpyTransport::default();
        let args = CreateApi {
            name: "payments".into(),
            file: PathBuf::from("/nonexistent/swagger.json"),
            org_name: "acme".into(),
        };

        let err = create(&spy, &args).await.unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(spy.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_targets_the_resolved_id() {
        let spy =
            SpyTransport::with_responses(vec![json!([{"id": "api-3", "name": "payments"}])]);
        let args = DeleteApi {
            name: "payments".into(),
        };

        delete(&spy, &args).await.unwrap();

        assert_eq!(
            spy.calls()[1],
            Call::Delete {
                path: "/apirepo/api-3".into()
            }
        );
    }
}
