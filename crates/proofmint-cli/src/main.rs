//! ProofMint CLI
//!
//! Command-line interface for the ProofMint soulbound credential registry.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::client::ApiClient;

#[derive(Parser)]
#[command(name = "proofmint")]
#[command(author, version, about = "ProofMint: soulbound credential registry", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the ProofMint server
    #[arg(long, global = true, default_value = "http://localhost:3000", env = "PROOFMINT_API")]
    api: String,

    /// Address sent as the caller of mutating requests
    #[arg(long, global = true, env = "PROOFMINT_CALLER")]
    caller: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the ProofMint server
    Server {
        /// Address to bind to
        #[arg(short, long, default_value = "0.0.0.0:3000", env = "PROOFMINT_BIND")]
        bind: String,

        /// Snapshot file (optional, in-memory registry if not set)
        #[arg(long, env = "PROOFMINT_SNAPSHOT_PATH")]
        snapshot_path: Option<PathBuf>,

        /// Deployer address for a fresh registry
        #[arg(long, env = "PROOFMINT_ADMIN")]
        admin: Option<String>,
    },

    /// Show configuration and server status
    Status,

    /// Compute the Keccak-256 metadata hash of a file
    Hash {
        /// Metadata file; JSON documents are hashed in compact form
        file: PathBuf,

        /// Hash the raw bytes even if the file is JSON
        #[arg(long)]
        raw: bool,
    },

    /// Address helpers
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },

    /// Issuer registration and lookup
    Issuer {
        #[command(subcommand)]
        action: IssuerAction,
    },

    /// Certificate type management
    CertType {
        #[command(subcommand)]
        action: CertTypeAction,
    },

    /// Credential operations
    Credential {
        #[command(subcommand)]
        action: CredentialAction,
    },

    /// Pause and role management
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Print the event journal
    Events {
        /// First sequence number to show
        #[arg(long, default_value_t = 0)]
        since: u64,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// Generate a random address for local testing
    New,

    /// Derive the address of an uncompressed secp256k1 public key
    FromKey {
        /// Hex public key (64 bytes, or 65 with the 0x04 prefix)
        public_key: String,
    },
}

#[derive(Subcommand)]
enum IssuerAction {
    /// Register the caller as an issuer
    Register {
        /// Organization name
        #[arg(short, long)]
        name: String,

        /// Organization description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Show an issuer profile
    Show {
        /// Issuer address
        address: String,
    },
}

#[derive(Subcommand)]
enum CertTypeAction {
    /// Create a certificate type owned by the caller
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Show a certificate type
    Show {
        id: u64,
    },

    /// Stop further mints against a certificate type
    Deactivate {
        id: u64,
    },
}

#[derive(Subcommand)]
enum CredentialAction {
    /// Mint a credential to a recipient
    Mint {
        /// Recipient address
        #[arg(short, long)]
        recipient: String,

        /// Certificate type id
        #[arg(short = 't', long)]
        type_id: u64,

        /// Metadata URI
        #[arg(short, long)]
        uri: String,

        /// Precomputed metadata hash (0x-prefixed hex)
        #[arg(long, conflicts_with = "metadata")]
        metadata_hash: Option<String>,

        /// Metadata file to hash instead of --metadata-hash
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Show a credential
    Show {
        token_id: u64,
    },

    /// Check whether a credential is valid
    Verify {
        token_id: u64,
    },

    /// Revoke a credential (original issuer only)
    Revoke {
        token_id: u64,

        #[arg(short, long, default_value = "")]
        reason: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Pause minting
    Pause,

    /// Resume minting
    Unpause,

    /// Grant a role (admin, issuer, pauser)
    Grant {
        role: String,
        account: String,
    },

    /// Revoke a role
    Revoke {
        role: String,
        account: String,
    },

    /// Show which roles an account holds
    Roles {
        account: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                format!(
                    "proofmint={0},proofmint_server={0},proofmint_registry={0},tower_http={0}",
                    log_level
                )
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = ApiClient::new(&cli.api, cli.caller.clone());
    tracing::debug!(api = %client.base_url(), caller = ?client.caller(), "CLI configured");

    match cli.command {
        Commands::Server {
            bind,
            snapshot_path,
            admin,
        } => {
            commands::server::run(bind, snapshot_path, admin).await?;
        }
        Commands::Status => {
            commands::status::show(&client).await?;
        }
        Commands::Hash { file, raw } => {
            commands::hash::file(&file, raw)?;
        }
        Commands::Address { action } => match action {
            AddressAction::New => commands::hash::new_address(),
            AddressAction::FromKey { public_key } => {
                commands::hash::address_from_key(&public_key)?;
            }
        },
        Commands::Issuer { action } => match action {
            IssuerAction::Register { name, description } => {
                commands::issuer::register(&client, &name, &description).await?;
            }
            IssuerAction::Show { address } => {
                commands::issuer::show(&client, &address).await?;
            }
        },
        Commands::CertType { action } => match action {
            CertTypeAction::Create { name, description } => {
                commands::cert_type::create(&client, &name, &description).await?;
            }
            CertTypeAction::Show { id } => commands::cert_type::show(&client, id).await?,
            CertTypeAction::Deactivate { id } => {
                commands::cert_type::deactivate(&client, id).await?;
            }
        },
        Commands::Credential { action } => match action {
            CredentialAction::Mint {
                recipient,
                type_id,
                uri,
                metadata_hash,
                metadata,
                description,
            } => {
                let request = commands::credential::MintArgs {
                    recipient,
                    type_id,
                    uri,
                    metadata_hash,
                    metadata,
                    description,
                };
                commands::credential::mint(&client, request).await?;
            }
            CredentialAction::Show { token_id } => {
                commands::credential::show(&client, token_id).await?;
            }
            CredentialAction::Verify { token_id } => {
                commands::credential::verify(&client, token_id).await?;
            }
            CredentialAction::Revoke { token_id, reason } => {
                commands::credential::revoke(&client, token_id, &reason).await?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Pause => commands::admin::set_paused(&client, true).await?,
            AdminAction::Unpause => commands::admin::set_paused(&client, false).await?,
            AdminAction::Grant { role, account } => {
                commands::admin::role(&client, "grant", &role, &account).await?;
            }
            AdminAction::Revoke { role, account } => {
                commands::admin::role(&client, "revoke", &role, &account).await?;
            }
            AdminAction::Roles { account } => {
                commands::admin::roles(&client, &account).await?;
            }
        },
        Commands::Events { since } => {
            commands::admin::events(&client, since).await?;
        }
    }

    Ok(())
}
