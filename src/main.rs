//! API Manager CLI (`apim`)
//!
//! Command-line client for managing organizations, applications, backend
//! APIs, proxies, users and API keys on a remote API Manager gateway.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod commands;
mod config;
mod error;
mod output;
mod resolver;
mod types;

use client::HttpTransport;
use config::CliConfig;
use error::Result;

#[derive(Parser)]
#[command(name = "apim")]
#[command(author, version, about = "CLI client for the API Manager gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the gateway address and credentials
    Login(commands::login::Login),

    /// Create a resource
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// List resources
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Delete a resource
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Resource subcommands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum CreateResource {
    /// Create an organization
    #[command(visible_alias = "organization")]
    Org(commands::org::CreateOrg),

    /// Create an application
    App(commands::app::CreateApp),

    /// Register a backend API from a specification file
    Api(commands::api::CreateApi),

    /// Create a proxy over a backend API
    Proxy(commands::proxy::CreateProxy),

    /// Create a user (and set its initial password)
    User(commands::user::CreateUser),

    /// Issue an API key to an application
    #[command(name = "apikey", visible_alias = "key")]
    ApiKey(commands::apikey::CreateKey),
}

#[derive(Subcommand)]
enum ListResource {
    /// List all organizations
    #[command(visible_alias = "organizations", alias = "org")]
    Orgs,

    /// List all applications
    #[command(alias = "applications")]
    Apps,

    /// List all backend APIs
    Apis,

    /// List all proxies
    Proxies,

    /// List all users
    Users,

    /// List an application's API keys
    #[command(visible_alias = "apikeys")]
    Keys(commands::apikey::ListKeys),
}

#[derive(Subcommand)]
enum DeleteResource {
    /// Delete an organization by name
    #[command(visible_alias = "organization")]
    Org(commands::org::DeleteOrg),

    /// Delete an application by name
    App(commands::app::DeleteApp),

    /// Delete a backend API by name
    Api(commands::api::DeleteApi),

    /// Delete a proxy by name (must not be published)
    Proxy(commands::proxy::DeleteProxy),

    /// Delete a user by name
    User(commands::user::DeleteUser),

    /// Delete an application's API key by id
    #[command(name = "apikey", visible_alias = "key")]
    ApiKey(commands::apikey::DeleteKey),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apim=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).without_time())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}

/// All errors land here; `main` prints once and picks the exit code.
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login(args) => commands::login::run(&args),

        Commands::Create { resource } => {
            let transport = transport()?;
            match resource {
                CreateResource::Org(args) => commands::org::create(&transport, &args).await,
                CreateResource::App(args) => commands::app::create(&transport, &args).await,
                CreateResource::Api(args) => commands::api::create(&transport, &args).await,
                CreateResource::Proxy(args) => commands::proxy::create(&transport, &args).await,
                CreateResource::User(args) => commands::user::create(&transport, &args).await,
                CreateResource::ApiKey(args) => commands::apikey::create(&transport, &args).await,
            }
        }

        Commands::List { resource } => {
            let transport = transport()?;
            match resource {
                ListResource::Orgs => commands::org::list(&transport).await,
                ListResource::Apps => commands::app::list(&transport).await,
                ListResource::Apis => commands::api::list(&transport).await,
                ListResource::Proxies => commands::proxy::list(&transport).await,
                ListResource::Users => commands::user::list(&transport).await,
                ListResource::Keys(args) => commands::apikey::list(&transport, &args).await,
            }
        }

        Commands::Delete { resource } => {
            let transport = transport()?;
            match resource {
                DeleteResource::Org(args) => commands::org::delete(&transport, &args).await,
                DeleteResource::App(args) => commands::app::delete(&transport, &args).await,
                DeleteResource::Api(args) => commands::api::delete(&transport, &args).await,
                DeleteResource::Proxy(args) => commands::proxy::delete(&transport, &args).await,
                DeleteResource::User(args) => commands::user::delete(&transport, &args).await,
                DeleteResource::ApiKey(args) => commands::apikey::delete(&transport, &args).await,
            }
        }
    }
}

/// Configuration is read once; a missing host/credential fails here, before
/// any network call.
fn transport() -> Result<HttpTransport> {
    let config = CliConfig::load()?;
    HttpTransport::from_config(&config)
}
