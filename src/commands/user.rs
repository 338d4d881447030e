//! User commands.
//!
//! User creation is a two-step workflow: the record is created first, then
//! the initial password is set with a follow-up call. There is no rollback;
//! when the second step fails the user exists without a usable password and
//! the error says so.

use std::path::PathBuf;

use prettytable::row;

use crate::client::{self, Transport};
use crate::error::{Error, Result};
use crate::output;
use crate::resolver;
use crate::types::{ResourceKind, User};

#[derive(Debug, clap::Args)]
pub struct CreateUser {
    /// JSON file describing the user
    #[arg(short, long)]
    pub file: PathBuf,

    /// Owning organization name
    #[arg(short, long)]
    pub org_name: String,

    /// Initial password for the user
    #[arg(short, long)]
    pub password: String,
}

#[derive(Debug, clap::Args)]
pub struct DeleteUser {
    /// User name
    #[arg(short, long)]
    pub name: String,
}

pub async fn create(transport: &dyn Transport, args: &CreateUser) -> Result<()> {
    let mut user: User = serde_json::from_str(&std::fs::read_to_string(&args.file)?)?;
    if user.name.is_empty() {
        return Err(Error::validation("user file must supply a name"));
    }

    let org = resolver::resolve(transport, ResourceKind::Organization, &args.org_name).await?;
    user.organization_id = org.id;

    let created: User =
        client::post_json(transport, "/users", serde_json::to_value(&user)?).await?;
    let id = created.id.as_deref().ok_or_else(|| Error::Api {
        status: 0,
        message: "user record returned without an id".into(),
    })?;
    println!("User {} created with id {}", created.name, id);

    if let Err(err) = set_password(transport, id, &args.password).await {
        eprintln!(
            "User {} was created, but the initial password could not be set",
            created.name
        );
        return Err(err);
    }
    println!("Password set for user {}", created.name);
    Ok(())
}

async fn set_password(transport: &dyn Transport, user_id: &str, password: &str) -> Result<()> {
    transport
        .post_params(
            &format!("/users/{user_id}/changepassword"),
            &[("newPassword", password)],
        )
        .await?;
    Ok(())
}

pub async fn list(transport: &dyn Transport) -> Result<()> {
    let users: Vec<User> = client::get_list(transport, "/users", &[]).await?;
    if users.is_empty() {
        println!("No users found");
        return Ok(());
    }
    let mut table = output::clean_table(row!["NAME", "ID"]);
    for user in &users {
        table.add_row(row![user.name, user.id.as_deref().unwrap_or("")]);
    }
    table.printstd();
    Ok(())
}

pub async fn delete(transport: &dyn Transport, args: &DeleteUser) -> Result<()> {
    let user = resolver::resolve(transport, ResourceKind::User, &args.name).await?;
    transport.delete(&format!("/users/{}", user.id)).await?;
    println!("User {} deleted", args.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use serde_json::json;

    use super::*;
    use crate::client::spy::{Call, SpyTransport};

    fn user_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[tokio::test]
    async fn create_posts_the_user_then_sets_the_password() {
        let file = user_file(r#"{"name": "jdoe", "loginName": "jdoe", "role": "user"}"#);
        let spy = SpyTransport::with_responses(vec![
            json!([{"id": "org-1", "name": "acme"}]),
            json!({"id": "u-1", "name": "jdoe"}),
            json!({}),
        ]);
        let args = CreateUser {
            file: file.path().to_path_buf(),
            org_name: "acme".into(),
            password: "s3cret".into(),
        };

        create(&spy, &args).await.unwrap();

        let calls = spy.calls();
        assert_eq!(calls.len(), 3);
        match &calls[1] {
            Call::Post { path, body } => {
                assert_eq!(path, "/users");
                assert_eq!(body.as_ref().unwrap()["organizationId"], "org-1");
            }
            other => panic!("expected POST, got {other:?}"),
        }
        assert_eq!(
            calls[2],
            Call::PostParams {
                path: "/users/u-1/changepassword".into(),
                params: vec![("newPassword".into(), "s3cret".into())],
            }
        );
    }

    #[tokio::test]
    async fn nameless_user_file_aborts_before_any_network_call() {
        let file = user_file(r#"{"loginName": "jdoe"}"#);
        let spy = SpyTransport::default();
        let args = CreateUser {
            file: file.path().to_path_buf(),
            org_name: "acme".into(),
            password: "s3cret".into(),
        };

        let err = create(&spy, &args).await.unwrap_err();

        assert!(matches!(err, Error::Validation { .. }));
        assert!(spy.calls().is_empty());
    }

    #[tokio::test]
    async fn password_step_failure_propagates_after_the_user_exists() {
        let file = user_file(r#"{"name": "jdoe"}"#);
        // Only two responses queued: the changepassword call fails.
        let spy = SpyTransport::with_responses(vec![
            json!([{"id": "org-1", "name": "acme"}]),
            json!({"id": "u-1", "name": "jdoe"}),
        ]);
        let args = CreateUser {
            file: file.path().to_path_buf(),
            org_name: "acme".into(),
            password: "s3cret".into(),
        };

        let err = create(&spy, &args).await.unwrap_err();

        assert!(matches!(err, Error::Api { .. }));
        assert_eq!(spy.calls().len(), 3);
    }

    #[tokio::test]
    async fn empty_listing_is_a_non_error_outcome() {
        let spy = SpyTransport::with_responses(vec![json!([])]);
        list(&spy).await.unwrap();
    }
}
