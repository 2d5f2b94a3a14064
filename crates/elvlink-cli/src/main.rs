//! elvlink - Media Wallet deeplink launcher
//!
//! Usage:
//!   elvlink link <marketplace> <sku>          # Print a SKU deeplink
//!   elvlink sku <marketplace> <sku> [--jwt]   # Launch a SKU on the device
//!   elvlink open <url> [--jwt]                # Launch any wallet deeplink
//!   elvlink --simulate --installed <pkg> ...  # Dry run against a fake device
//!   elvlink init [--force]                    # Write elvlink.toml from the flags

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elvlink_core::config::{ConfigStore, ElvlinkConfig};
use elvlink_core::dispatch::{DeeplinkDispatcher, DispatchReport};
use elvlink_core::link::create_sku_deeplink;
use elvlink_core::platform::{AdbHost, HostPlatform, SimulatedHost};

#[derive(Parser)]
#[command(name = "elvlink")]
#[command(about = "Open Media Wallet deeplinks on an Android device", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/elvlink/elvlink.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Device serial, overrides adb.serial
    #[arg(short, long, global = true)]
    serial: Option<String>,

    /// Use a simulated device instead of adb
    #[arg(long, global = true)]
    simulate: bool,

    /// Package installed on the simulated device (repeatable, implies --simulate)
    #[arg(long = "installed", value_name = "PACKAGE", global = true)]
    installed: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the deeplink for a marketplace SKU
    Link {
        /// Marketplace identifier
        marketplace: String,
        /// SKU identifier
        sku: String,
    },

    /// Launch Media Wallet on a marketplace SKU
    Sku {
        /// Marketplace identifier
        marketplace: String,
        /// SKU identifier
        sku: String,
        /// Authorization token appended as `jwt`
        #[arg(long)]
        jwt: Option<String>,
    },

    /// Launch Media Wallet on a deeplink
    Open {
        /// elvwallet:// URL
        url: String,
        /// Authorization token appended as `jwt`
        #[arg(long)]
        jwt: Option<String>,
    },

    /// Write a config file from the current flags
    Init {
        /// Overwrite an existing config file
        #[arg(long, short = 'F')]
        force: bool,
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
                .unwrap_or_else(|_| "elvlink=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let (url, jwt) = match &cli.command {
        Commands::Link { marketplace, sku } => {
            let link = create_sku_deeplink(marketplace, sku);
            match cli.format {
                OutputFormat::Table => println!("{link}"),
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "url": link }));
                }
            }
            return Ok(());
        }
        Commands::Sku {
            marketplace,
            sku,
            jwt,
        } => (create_sku_deeplink(marketplace, sku), jwt.clone()),
        Commands::Open { url, jwt } => (url.clone(), jwt.clone()),
        Commands::Init { force } => return run_init(&cli, *force),
    };

    let config = load_config(cli.config.as_ref())?;

    let report = if cli.simulate || !cli.installed.is_empty() {
        let mut host = config.simulate.host();
        for package_id in &cli.installed {
            host.install(package_id.clone());
        }
        let installed: Vec<&str> = host.installed().collect();
        tracing::info!(?installed, "using simulated device");
        dispatch(&host, &url, jwt.as_deref())?
    } else {
        let mut adb = config.adb.clone();
        if let Some(serial) = &cli.serial {
            adb.serial = Some(serial.clone());
        }
        dispatch(&AdbHost::from_config(&adb), &url, jwt.as_deref())?
    };

    print_report(cli.format, &report)
}

fn config_store(path: Option<&PathBuf>) -> Result<ConfigStore> {
    match path {
        Some(path) => Ok(ConfigStore::from_path(path.clone())),
        None => ConfigStore::from_default_location(),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ElvlinkConfig> {
    config_store(path)?.load()
}

fn run_init(cli: &Cli, force: bool) -> Result<()> {
    let store = config_store(cli.config.as_ref())?;
    if store.config_path().exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            store.config_path().display()
        );
    }

    let config = init_config(cli);
    config.validate()?;
    store.save(&config)?;

    match cli.format {
        OutputFormat::Table => println!("Wrote {}", store.config_path().display()),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "path": store.config_path().display().to_string() })
            );
        }
    }
    Ok(())
}

fn init_config(cli: &Cli) -> ElvlinkConfig {
    let mut config = ElvlinkConfig::new();
    config.adb.serial = cli.serial.clone();
    config.simulate.installed = cli.installed.clone();
    config
}

fn dispatch<H: HostPlatform>(host: &H, url: &str, jwt: Option<&str>) -> Result<DispatchReport> {
    DeeplinkDispatcher::for_host(host)
        .launch_deeplink_with_report(url, jwt)
        .with_context(|| format!("Failed to launch {url}"))
}

fn print_report(format: OutputFormat, report: &DispatchReport) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("Result:   {}", report.result);
            println!("Target:   {}", report.target);
            if let Some(url) = &report.launched_url {
                println!("Launched: {url}");
            }
            if let Some(package) = &report.restricted_to {
                println!("Package:  {package}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .context("Failed to serialize dispatch report")?;
            println!("{json}");
        }
    }
    Ok(())
}
