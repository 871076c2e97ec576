mod config;
mod error;
mod host;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use lumabox_api::{ApiHost, Device, Session};
use lumabox_hub::entry::{DEFAULT_PORT, DEFAULT_SETUP_TIMEOUT};
use lumabox_hub::{
    ActionRegistry, ConfigEntry, DASHBOARD_ACTION, DOMAIN, DashboardHost, HubContext, PLATFORMS,
    dashboards, platforms, register_dashboard_action, setup_entry,
};

use crate::error::CliError;
use crate::host::{LoggingHost, MemoryDashboards};

#[derive(Parser)]
#[command(name = "lumabox", version, about = "Reference host for Lumabox devices")]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalOpts {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Identify a device and list the entities it would contribute
    Identify(IdentifyArgs),
    /// Set up all configured devices and report their entities
    Run,
    /// Set up all configured devices, then create energy dashboards
    Dashboard,
    /// Configuration helpers
    Config(ConfigArgs),
}

#[derive(Args)]
struct IdentifyArgs {
    /// Device IP or hostname
    #[arg(long)]
    host: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long)]
    username: Option<String>,

    /// Device password
    #[arg(long, env = "LUMABOX_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the config file path
    Path,
    /// Write a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Identify(args) => identify(args).await,
        Command::Run => run_entries(false).await,
        Command::Dashboard => run_entries(true).await,
        Command::Config(args) => match args.command {
            ConfigCommand::Path => {
                println!("{}", config::config_path().display());
                Ok(())
            }
            ConfigCommand::Init => {
                let path = config::config_path();
                config::write_example_config(&path)?;
                println!("wrote {}", path.display());
                Ok(())
            }
        },
    }
}

/// One-off identification against an explicit address.
async fn identify(args: IdentifyArgs) -> Result<(), CliError> {
    let session = Session::maybe_authenticated(
        args.username.as_deref(),
        args.password.map(SecretString::from),
        DEFAULT_SETUP_TIMEOUT,
    )?;
    let api = ApiHost::new(&args.host, args.port, DEFAULT_SETUP_TIMEOUT, session);

    let device = Device::identify(api).await?;

    println!("{} ({})", device.name(), device.family());
    println!("  id:       {}", device.id());
    if let Some(fw) = &device.info().firmware_version {
        println!("  firmware: {fw}");
    }
    println!("  features: {}", device.capabilities().feature_count());

    for platform in PLATFORMS {
        for entity_id in platforms::entity_ids(platform, &device) {
            println!("  - {entity_id}");
        }
    }
    Ok(())
}

/// Set up every configured device; optionally create dashboards after.
async fn run_entries(with_dashboards: bool) -> Result<(), CliError> {
    let cfg = config::load_config()?;
    if cfg.devices.is_empty() {
        return Err(CliError::NoDevices {
            path: config::config_path().display().to_string(),
        });
    }

    let ctx = Arc::new(HubContext::new());
    let platform_host = LoggingHost::new(ctx.clone());

    let mut names: Vec<&String> = cfg.devices.keys().collect();
    names.sort();

    let mut entries: Vec<ConfigEntry> = Vec::with_capacity(names.len());
    for name in names {
        entries.push(config::entry_from_profile(name, &cfg.devices[name])?);
    }

    let mut ready = 0usize;
    let mut first_err: Option<CliError> = None;
    for entry in &entries {
        match setup_entry(&ctx, &platform_host, entry).await {
            Ok(()) => ready += 1,
            Err(err) => {
                tracing::warn!(entry = %entry.id, error = %err, "setup failed");
                if first_err.is_none() {
                    first_err = Some(err.into());
                }
            }
        }
    }

    if ready == 0 {
        if let Some(err) = first_err {
            return Err(err);
        }
    }

    println!("{ready}/{} device(s) ready", entries.len());

    if with_dashboards {
        create_dashboards(&ctx, &entries).await?;
    }
    Ok(())
}

/// Invoke the registered dashboard action, then build the automatic
/// per-meter dashboards for any smart meters.
async fn create_dashboards(ctx: &Arc<HubContext>, entries: &[ConfigEntry]) -> Result<(), CliError> {
    let store = Arc::new(MemoryDashboards::default());

    let actions = ActionRegistry::new();
    register_dashboard_action(&actions, ctx.clone(), store.clone());
    actions
        .invoke(DOMAIN, DASHBOARD_ACTION)
        .await
        .map_err(CliError::Host)?;

    for entry in entries {
        let Some(device) = ctx.registry().device(&entry.id) else {
            continue;
        };
        if dashboards::is_smart_meter(&device) {
            let meters = platforms::sensor::meter_entities(&device);
            store
                .create_dashboard(dashboards::smart_meter_dashboard(entry, &meters))
                .await
                .map_err(CliError::Host)?;
        }
    }

    println!("created {} dashboard(s)", store.created().len());
    Ok(())
}
