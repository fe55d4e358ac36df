//! browseros-prefs - inspect and edit BrowserOS server preferences
//!
//! Usage:
//!   browseros-prefs list              # Registered server prefs and values
//!   browseros-prefs get <key>         # Effective value of one pref
//!   browseros-prefs set <key> <value> # Store a user value
//!   browseros-prefs reset <key>       # Revert to the default
//!   browseros-prefs ports             # Resolved server ports

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use browseros_prefs_core::local_state::{LocalState, PrefEntry, default_local_state_path};
use browseros_prefs_core::registry::PrefRegistrySimple;
use browseros_prefs_core::server_prefs::{PrefsRevision, register_local_state_prefs_for};
use browseros_prefs_core::settings::{PortSetting, ServerSettings};
use browseros_prefs_core::value::PrefValue;

#[derive(Parser)]
#[command(name = "browseros-prefs")]
#[command(about = "BrowserOS server preferences", long_about = None)]
struct Cli {
    /// Path to the Local State file (defaults to $BROWSEROS_LOCAL_STATE or the
    /// BrowserOS config directory)
    #[arg(long, global = true, value_name = "PATH")]
    local_state: Option<PathBuf>,

    /// Preference revision to register (v1 or v2)
    #[arg(long, global = true, default_value = "v2")]
    revision: PrefsRevision,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered server preferences
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the effective value of a preference
    Get {
        /// Preference key (e.g. browseros.server.cdp_port)
        key: String,
    },

    /// Store a user value for a preference
    Set {
        /// Preference key
        key: String,
        /// New value (integer or true/false, per the registered kind)
        value: String,
    },

    /// Remove the user value so the default applies again
    #[command(alias = "rm")]
    Reset {
        /// Preference key
        key: String,
    },

    /// Show the ports the servers will listen on
    Ports {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "browseros_prefs=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut state = open_local_state(cli.local_state, cli.revision)?;

    match cli.command {
        Commands::List { format } => print_entries(&state.entries(), format)?,
        Commands::Get { key } => println!("{}", state.get(&key)?),
        Commands::Set { key, value } => run_set(&mut state, &key, &value)?,
        Commands::Reset { key } => {
            if state.clear(&key)? {
                state.save()?;
            }
            println!("{key} = {} (default)", state.get(&key)?);
        }
        Commands::Ports { format } => {
            let settings = ServerSettings::from_local_state(&state)?;
            if let Err(err) = settings.validate() {
                tracing::warn!("{err}");
            }
            print_ports(&settings, format)?;
        }
    }

    Ok(())
}

fn open_local_state(path: Option<PathBuf>, revision: PrefsRevision) -> Result<LocalState> {
    let path = match path {
        Some(path) => path,
        None => default_local_state_path()?,
    };
    tracing::debug!(path = %path.display(), %revision, "Opening local state");

    let mut registry = PrefRegistrySimple::new();
    register_local_state_prefs_for(&mut registry, revision);
    LocalState::load(registry, path)
}

fn run_set(state: &mut LocalState, key: &str, raw: &str) -> Result<()> {
    let kind = state
        .registry()
        .get(key)
        .map(|pref| pref.kind())
        .ok_or_else(|| anyhow::anyhow!("Unknown preference: {key}"))?;
    let value = PrefValue::parse(kind, raw)?;
    state.set(key, value)?;
    state.save()?;
    println!("{key} = {value}");
    Ok(())
}

fn print_entries(entries: &[PrefEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entries)?),
        OutputFormat::Table => {
            let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(3);
            println!("{:<width$}  {:<8}  {:<8}  VALUE", "KEY", "KIND", "DEFAULT");
            for entry in entries {
                let marker = if entry.user_set { " *" } else { "" };
                println!(
                    "{:<width$}  {:<8}  {:<8}  {}{}",
                    entry.key,
                    entry.kind.to_string(),
                    entry.default.to_string(),
                    entry.value,
                    marker
                );
            }
        }
    }
    Ok(())
}

fn print_ports(settings: &ServerSettings, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(settings)?),
        OutputFormat::Table => {
            println!("CDP     {}", describe_port(settings.cdp_port));
            let mcp_state = if settings.mcp_enabled { "" } else { " (disabled)" };
            println!("MCP     {}{}", describe_port(settings.mcp_port), mcp_state);
            match settings.agent_port {
                Some(port) => println!("Agent   {}", describe_port(port)),
                None => println!("Agent   -"),
            }
        }
    }
    Ok(())
}

fn describe_port(port: PortSetting) -> String {
    match port {
        PortSetting::Auto => "auto (random on startup)".to_string(),
        PortSetting::Fixed(port) => port.to_string(),
    }
}
