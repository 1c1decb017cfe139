//! Contact Book CLI - schema setup, contact commands and the terminal UI.
//!
//! # Usage
//!
//! ```bash
//! # Create the contacts table if it does not exist
//! cb-cli migrate
//!
//! # One-shot commands against a running API
//! cb-cli list
//! cb-cli add --first-name Jane --last-name Doe --phone 555-1212
//! cb-cli update 3 --first-name Jane --last-name Roe --phone 555-1212
//! cb-cli delete 3 --yes
//!
//! # Interactive single-view UI
//! cb-cli --api-url http://localhost:3001/api ui
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create the `contacts` table (needs `CONTACTS_DATABASE_URL`)
//! - `list`, `show`, `add`, `update`, `delete` - Contact operations over HTTP
//! - `ui` - Interactive form/list view

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};

use contact_book_client::HttpContactApi;
use contact_book_core::ContactId;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "cb-cli")]
#[command(author, version, about = "Contact Book CLI tools")]
struct Cli {
    /// Base URL of the contacts API (may include a prefix such as /api)
    #[arg(
        long,
        global = true,
        env = "CONTACTS_API_URL",
        default_value = "http://localhost:3001"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the contacts table if it does not exist
    Migrate,
    /// List all contacts, newest first
    List,
    /// Show a single contact
    Show {
        /// Contact ID
        id: ContactId,
    },
    /// Create a contact
    Add(FieldArgs),
    /// Replace a contact's fields
    Update {
        /// Contact ID
        id: ContactId,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a contact
    Delete {
        /// Contact ID
        id: ContactId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Open the interactive contacts view
    Ui,
}

/// The three contact fields as command-line flags.
#[derive(Args)]
struct FieldArgs {
    /// First name
    #[arg(short, long)]
    first_name: String,

    /// Last name
    #[arg(short, long)]
    last_name: String,

    /// Phone number
    #[arg(short, long)]
    phone: String,
}

impl From<FieldArgs> for contact_book_client::ContactDraft {
    fn from(args: FieldArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            phone: args.phone,
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing (quiet by default so output stays readable)
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if matches!(cli.command, Commands::Migrate) {
        commands::migrate::run().await?;
        return Ok(());
    }

    let api = HttpContactApi::new(&cli.api_url)?;

    match cli.command {
        Commands::Migrate => {}
        Commands::List => commands::contacts::list(api).await?,
        Commands::Show { id } => commands::contacts::show(&api, id).await?,
        Commands::Add(fields) => commands::contacts::add(api, fields.into()).await?,
        Commands::Update { id, fields } => {
            commands::contacts::update(api, id, fields.into()).await?;
        }
        Commands::Delete { id, yes } => commands::contacts::delete(api, id, yes).await?,
        Commands::Ui => ui::run(api).await?,
    }
    Ok(())
}
