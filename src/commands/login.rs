//! Login: store the gateway address and credential for later commands.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::config::CliConfig;
use crate::error::Result;

#[derive(Debug, clap::Args)]
pub struct Login {
    /// API Manager host
    #[arg(long)]
    pub host: String,

    /// API Manager port
    #[arg(long, default_value_t = 8075)]
    pub port: u16,

    /// Account user name
    #[arg(short, long)]
    pub username: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,
}

pub fn run(args: &Login) -> Result<()> {
    let credential = BASE64.encode(format!("{}:{}", args.username, args.password));
    let config = CliConfig {
        host: Some(args.host.clone()),
        port: Some(args.port),
        authorization: Some(credential),
    };
    config.save()?;
    println!("Credentials saved for {}:{}", args.host, args.port);
    Ok(())
}
