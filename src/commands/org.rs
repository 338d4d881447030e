//! Organization commands.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use prettytable::row;

use crate::client::{self, Transport};
use crate::error::{Error, Result};
use crate::output;
use crate::resolver;
use crate::types::{Organization, ResourceKind, CONTACT_MAIL_DOMAIN, PLACEHOLDER_PHONE};

#[derive(Debug, clap::Args)]
pub struct CreateOrg {
    /// Organization name (required unless the file supplies one)
    #[arg(short, long)]
    pub name: Option<String>,

    /// JSON file describing the organization
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Enable the organization
    #[arg(short, long)]
    pub enabled: bool,

    /// Mark the organization as a development org
    #[arg(short, long)]
    pub development: bool,

    /// Image file used for organization branding
    #[arg(short, long)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct DeleteOrg {
    /// Organization name
    #[arg(short, long)]
    pub name: String,
}

pub async fn create(transport: &dyn Transport, args: &CreateOrg) -> Result<()> {
    let org = build_payload(args)?;
    let created: Organization =
        client::post_json(transport, "/organizations", serde_json::to_value(&org)?).await?;
    println!(
        "Organization {} created with id {}",
        created.name,
        created.id.as_deref().unwrap_or("?")
    );
    Ok(())
}

/// Payload from the file (flag name overrides when given) or from flags with
/// deterministic defaults. Validated before any network call.
fn build_payload(args: &CreateOrg) -> Result<Organization> {
    if let Some(file) = &args.file {
        let mut org: Organization = serde_json::from_str(&std::fs::read_to_string(file)?)?;
        if let Some(name) = &args.name {
            org.name = name.clone();
        }
        if org.name.is_empty() {
            return Err(Error::validation(
                "organization name missing: supply it in the file or with --name",
            ));
        }
        Ok(org)
    } else {
        let name = args
            .name
            .clone()
            .ok_or_else(|| Error::validation("either --name or --file is required"))?;
        let image = match &args.image {
            Some(path) => Some(format!(
                "data:image/jpeg;base64,{}",
                BASE64.encode(std::fs::read(path)?)
            )),
            None => None,
        };
        Ok(Organization {
            name: name.clone(),
            description: format!("{name} Organization"),
            email: format!("{name}@{CONTACT_MAIL_DOMAIN}"),
            phone: PLACEHOLDER_PHONE.into(),
            enabled: args.enabled,
            development: args.development,
            image,
            ..Default::default()
        })
    }
}

pub async fn list(transport: &dyn Transport) -> Result<()> {
    let orgs: Vec<Organization> = client::get_list(transport, "/organizations", &[]).await?;
    if orgs.is_empty() {
        println!("No organizations found");
        return Ok(());
    }
    let mut table = output::clean_table(row!["ID", "NAME", "DESCRIPTION", "CONTACT"]);
    for org in &orgs {
        table.add_row(row![
            org.id.as_deref().unwrap_or(""),
            org.name,
            org.description,
            org.email
        ]);
    }
    table.printstd();
    Ok(())
}

pub async fn delete(transport: &dyn Transport, args: &DeleteOrg) -> Result<()> {
    let org = resolver::resolve(transport, ResourceKind::Organization, &args.name).await?;
    transport
        .delete(&format!("/organizations/{}", org.id))
        .await?;
    println!("Organization {} deleted", args.name);
    Ok(())
}
