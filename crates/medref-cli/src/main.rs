use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;
use medref_cli::inspect;
use medref_config::{GuardConfig, JwtConfig};
use medref_core::{AccessPolicy, Role};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "medref-cli")]
#[command(about = "Medref CLI - Inspect and test the referral desk access policy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the access policy from the environment and report any inconsistency
    Validate,
    /// Run the page guard for one role and path
    Check {
        /// Role to check (omit for an anonymous session)
        #[arg(short = 'r', long)]
        role: Option<Role>,

        /// Requested path, e.g. /referrals/abc123
        #[arg(short = 'p', long)]
        path: String,

        /// Treat the session as still loading
        #[arg(long)]
        loading: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the permissions a role holds
    Permissions {
        #[arg(short = 'r', long)]
        role: Role,
    },
    /// List route prefixes, their permission and the roles that may open them
    Routes,
    /// Issue a signed session token for local testing
    IssueToken {
        #[arg(short = 'r', long)]
        role: Role,

        /// Email address (prompted if not provided)
        #[arg(short = 'e', long)]
        email: Option<String>,

        #[arg(long)]
        facility_id: Option<Uuid>,
    },
}

fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    let config = GuardConfig::from_env();

    match command {
        Commands::Validate => {
            let policy = load_policy(&config)?;
            println!("{}", inspect::validate_report(&config, &policy));
            println!("\n✅ Access policy is consistent");
        }
        Commands::Check {
            role,
            path,
            loading,
            json,
        } => {
            let policy = load_policy(&config)?;
            let result = inspect::check(&policy, role, &path, loading);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", inspect::check_report(&result));
            }
        }
        Commands::Permissions { role } => {
            let policy = load_policy(&config)?;
            println!("{}", inspect::permissions_report(&policy, role));
        }
        Commands::Routes => {
            let policy = load_policy(&config)?;
            println!("{}", inspect::routes_report(&policy));
        }
        Commands::IssueToken {
            role,
            email,
            facility_id,
        } => handle_issue_token(role, email, facility_id)?,
    }

    Ok(())
}

fn load_policy(config: &GuardConfig) -> anyhow::Result<AccessPolicy> {
    config
        .build_policy()
        .context("Access policy configuration is invalid")
}

fn handle_issue_token(
    role: Role,
    email: Option<String>,
    facility_id: Option<Uuid>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };
    if email.trim().is_empty() {
        bail!("Email must not be empty");
    }

    let jwt_config = JwtConfig::from_env();
    let token = medref_auth::create_access_token(
        Uuid::new_v4(),
        email.trim(),
        role,
        facility_id,
        &jwt_config,
    )
    .map_err(|e| e.error)?;

    println!("✅ Token for {} ({})", email.trim(), role);
    println!("   Expires in {} seconds", jwt_config.access_token_expiry);
    println!("\n{}", token);
    Ok(())
}
