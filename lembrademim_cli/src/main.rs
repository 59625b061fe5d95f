mod commands;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lembrademim_lib::{Config, CredentialStore, Endpoints};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "lembrademim")]
#[command(about = "Manage Lembra de Mim biographies and folders from the terminal")]
struct Cli {
    /// Output format: table, json, csv, markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Backend base URL; repeat to try several in order
    #[arg(long = "api-url", global = true)]
    api_url: Vec<String>,

    /// Credential file (overrides LEMBRADEMIM_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login(commands::auth::LoginArgs),
    /// Create an account and log in
    Signup(commands::auth::SignupArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user, checking the token with the server
    Whoami,
    /// Password reset by emailed code
    Reset(commands::auth::ResetArgs),
    /// Biographies
    Bios(commands::bios::BiosArgs),
    /// Folders and their biographies
    Folders(commands::folders::FoldersArgs),
    /// Check which backend address answers
    Diagnose,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lembrademim=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        "table" => OutputFormat::Table,
        other => anyhow::bail!(
            "unknown output format '{}'. Valid values: table, json, csv, markdown",
            other
        ),
    };

    let mut config = Config::from_env()?;
    if !cli.api_url.is_empty() {
        config.endpoints = Endpoints::new(&cli.api_url)?;
    }
    if let Some(path) = cli.store {
        config.store_path = path;
    }

    tracing::debug!("Credential store at {}", config.store_path.display());
    let store: Arc<dyn CredentialStore> = Arc::new(config.open_store());
    let client = config.client(store)?;

    match &cli.command {
        Commands::Login(args) => commands::auth::login(args, &client, &format).await?,
        Commands::Signup(args) => commands::auth::signup(args, &client, &format).await?,
        Commands::Logout => commands::auth::logout(&client)?,
        Commands::Whoami => commands::auth::whoami(&client, &format).await?,
        Commands::Reset(args) => commands::auth::reset(args, &client).await?,
        Commands::Bios(args) => commands::bios::run(args, &client, &format).await?,
        Commands::Folders(args) => commands::folders::run(args, &client, &format).await?,
        Commands::Diagnose => commands::diagnose::run(&client, &format).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repeated_api_urls_keep_order() {
        let cli = Cli::try_parse_from([
            "lembrademim",
            "--api-url",
            "http://a:3000",
            "--api-url",
            "http://b:3000",
            "diagnose",
        ])
        .unwrap();
        assert_eq!(cli.api_url, vec!["http://a:3000", "http://b:3000"]);
        assert!(matches!(cli.command, Commands::Diagnose));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "lembrademim",
            "folders",
            "add",
            "--biography",
            "10",
            "--folder",
            "3",
            "--output",
            "json",
            "--store",
            "/tmp/creds.json",
        ])
        .unwrap();
        assert_eq!(cli.output, "json");
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/creds.json")));
    }

    #[test]
    fn bios_update_takes_repeated_tags() {
        let cli = Cli::try_parse_from([
            "lembrademim",
            "bios",
            "update",
            "7",
            "--tag",
            "work",
            "--tag",
            "family",
        ])
        .unwrap();
        match cli.command {
            Commands::Bios(args) => match args.command {
                commands::bios::BiosCommand::Update { id, fields } => {
                    assert_eq!(id, "7");
                    assert_eq!(fields.tags, vec!["work", "family"]);
                    assert!(fields.name.is_none());
                }
                _ => panic!("expected bios update"),
            },
            _ => panic!("expected bios"),
        }
    }

    #[test]
    fn login_requires_password() {
        assert!(Cli::try_parse_from(["lembrademim", "login", "--email", "a@b.com"]).is_err());
    }
}
