//! API key commands. Keys live under their application; every operation
//! resolves the application name first.

use prettytable::row;

use crate::client::{self, Transport};
use crate::error::Result;
use crate::output;
use crate::resolver;
use crate::types::{ApiKey, ResourceKind};

#[derive(Debug, clap::Args)]
pub struct CreateKey {
    /// Application the key is issued to
    #[arg(short, long)]
    pub app_name: String,
}

#[derive(Debug, clap::Args)]
pub struct ListKeys {
    /// Application whose keys to list
    #[arg(short, long)]
    pub app_name: String,
}

#[derive(Debug, clap::Args)]
pub struct DeleteKey {
    /// Application the key belongs to
    #[arg(short, long)]
    pub app_name: String,

    /// Id of the key to delete
    #[arg(short, long)]
    pub key_id: String,
}

pub async fn create(transport: &dyn Transport, args: &CreateKey) -> Result<()> {
    let app = resolver::resolve(transport, ResourceKind::Application, &args.app_name).await?;

    let body = ApiKey {
        application_id: app.id.clone(),
        ..Default::default()
    };
    let key: ApiKey = client::post_json(
        transport,
        &format!("/applications/{}/apikeys", app.id),
        serde_json::to_value(&body)?,
    )
    .await?;
    println!(
        "API key {} created with secret {}",
        key.id.as_deref().unwrap_or("?"),
        key.secret.as_deref().unwrap_or("?")
    );
    Ok(())
}

pub async fn list(transport: &dyn Transport, args: &ListKeys) -> Result<()> {
    let app = resolver::resolve(transport, ResourceKind::Application, &args.app_name).await?;
    let keys: Vec<ApiKey> =
        client::get_list(transport, &format!("/applications/{}/apikeys", app.id), &[]).await?;
    if keys.is_empty() {
        println!("No API keys found");
        return Ok(());
    }
    let mut table = output::clean_table(row!["ID", "SECRET", "ENABLED"]);
    for key in &keys {
        table.add_row(row![
            key.id.as_deref().unwrap_or(""),
            key.secret.as_deref().unwrap_or(""),
            key.enabled.unwrap_or(false)
        ]);
    }
    table.printstd();
    Ok(())
}

pub async fn delete(transport: &dyn Transport, args: &DeleteKey) -> Result<()> {
    let app = resolver::resolve(transport, ResourceKind::Application, &args.app_name).await?;
    transport
        .delete(&format!("/applications/{}/apikeys/{}", app.id, args.key_id))
        .await?;
    println!("API key {} deleted", args.key_id);
    Ok(())
}
