//! Application commands.

use std::path::PathBuf;

use prettytable::row;

use crate::client::{self, Transport};
use crate::error::{Error, Result};
use crate::output;
use crate::resolver;
use crate::types::{
    Application, Organization, ResourceKind, CONTACT_MAIL_DOMAIN, PLACEHOLDER_PHONE,
};

#[derive(Debug, clap::Args)]
pub struct CreateApp {
    /// Application name (required unless the file supplies one)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Owning organization name
    #[arg(short, long)]
    pub org_name: String,

    /// JSON file describing the application
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct DeleteApp {
    /// Application name
    #[arg(short, long)]
    pub name: String,
}

pub async fn create(transport: &dyn Transport, args: &CreateApp) -> Result<()> {
    let mut app = build_payload(args)?;
    let org = resolver::resolve(transport, ResourceKind::Organization, &args.org_name).await?;
    app.organization_id = org.id;

    let created: Application =
        client::post_json(transport, "/applications", serde_json::to_value(&app)?).await?;
    println!("Application {} created", created.name);
    Ok(())
}

fn build_payload(args: &CreateApp) -> Result<Application> {
    if let Some(file) = &args.file {
        let mut app: Application = serde_json::from_str(&std::fs::read_to_string(file)?)?;
        if app.name.is_empty() {
            match &args.name {
                Some(name) => app.name = name.clone(),
                None => {
                    return Err(Error::validation(
                        "application name missing: supply it in the file or with --name",
                    ))
                }
            }
        }
        Ok(app)
    } else {
        let name = args
            .name
            .clone()
            .ok_or_else(|| Error::validation("either --name or --file is required"))?;
        Ok(Application {
            name: name.clone(),
            description: format!("{name} Application"),
            email: format!("{name}@{CONTACT_MAIL_DOMAIN}"),
            phone: PLACEHOLDER_PHONE.into(),
            apis: Vec::new(),
            ..Default::default()
        })
    }
}

pub async fn list(transport: &dyn Transport) -> Result<()> {
    let apps: Vec<Application> = client::get_list(transport, "/applications", &[]).await?;
    if apps.is_empty() {
        println!("No applications found");
        return Ok(());
    }
    let mut table = output::clean_table(row!["ID", "NAME", "DESCRIPTION", "ORGANIZATION"]);
    for app in &apps {
        // Best effort: a missing owner renders as an empty cell.
        let org_name = client::get_one::<Organization>(
            transport,
            &format!("/organizations/{}", app.organization_id),
        )
        .await
        .map(|org| org.name)
        .unwrap_or_default();
        table.add_row(row![
            app.id.as_deref().unwrap_or(""),
            app.name,
            app.description,
            org_name
        ]);
    }
    table.printstd();
    Ok(())
}

pub async fn delete(transport: &dyn Transport, args: &DeleteApp) -> Result<()> {
    let app = resolver::resolve(transport, ResourceKind::Application, &args.name).await?;
    transport
        .delete(&format!("/applications/{}", app.id))
        .await?;
    println!("Application {} deleted", args.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::spy::{Call, SpyTransport};

    #[tokio::test]
    async fn create_wires_the_resolved_organization_id_into_the_payload() {
        let spy = SpyTransport::with_responses(vec![
            json!([{"id": "org-1", "name": "acme"}]),
            json!({"id": "app-1", "name": "shop"}),
        ]);
        let args = CreateApp {
            name: Some("shop".into()),
            org_name: "acme".into(),
            file: None,
        };

        create(&spy, &args).await.unwrap();

        let calls = spy.calls();
        assert_eq!(calls.len(), 2);
        match &calls[1] {
            Call::Post { path, body } => {
                assert_eq!(path, "/applications");
                let body = body.as_ref().unwrap();
                assert_eq!(body["organizationId"], "org-1");
                assert_eq!(body["name"], "shop");
                assert_eq!(body["description"], "shop Application");
                assert_eq!(body["apis"], json!([]));
            }
            other => panic!("expected POST, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_aborts_when_the_organization_is_unknown() {
        let spy = SpyTransport::with_responses(vec![json!([])]);
        let args = CreateApp {
            name: Some("shop".into()),
            org_name: "ghost".into(),
            file: None,
        };

        let err = create(&spy, &args).await.unwrap_err();

        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(spy.calls().len(), 1);
    }

    #[tokio::test]
    async fn missing_name_is_rejected_before_any_network_call() {
        let spy = SpyTransport::default();
        let args = CreateApp {
            name: None,
            org_name: "acme".into(),
            file: None,
        };

        let err = create(&spy, &args).await.unwrap_err();

        assert!(matches!(err, Error::Validation { .. }));
        assert!(spy.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_listing_is_a_non_error_outcome() {
        let spy = SpyTransport::with_responses(vec![json!([])]);
        list(&spy).await.unwrap();
    }
}
