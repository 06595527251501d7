//! permsync CLI - reconcile read/write permission sets on remote drive items
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`PERMSYNC_*`)
//! 3. Project config (`.permsync/config.toml` under `-C`, default: current directory)
//! 4. Global config (`~/.permsync/config.toml`, or `--config`)
//! 5. Default values (lowest priority)
//!
//! # Output
//!
//! Reports, plans and listings are printed to stdout as JSON. Logs go to
//! stderr. The exit status is 0 when every processed level succeeded and
//! 1 otherwise.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use permsync_auth::EnvTokenProvider;
use permsync_runtime::config::{ConfigLoader, ConfigResolver, MissingItemPolicy, PermsyncConfig};
use permsync_runtime::{ReconcileError, SetPermissionsCommand, UreqTransport};
use permsync_types::{DesiredPermissions, ErrorCode, GranteeSet, RemoteItem};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// permsync - remote drive permission reconciler
#[derive(Parser, Debug)]
#[command(name = "permsync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    project: Option<PathBuf>,

    /// Global config file (defaults to ~/.permsync/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Storage origin URL (also: PERMSYNC_ORIGIN)
    #[arg(long, value_name = "URL", global = true)]
    origin: Option<String>,

    /// Drive identifier (also: PERMSYNC_DRIVE_ID)
    #[arg(long, global = true)]
    drive_id: Option<String>,

    /// Environment variable holding the bearer token (also: PERMSYNC_TOKEN_ENV)
    #[arg(long, value_name = "VAR", global = true)]
    token_env: Option<String>,

    /// Treat a missing item as having no permissions
    #[arg(long, global = true)]
    allow_missing_item: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconcile an item and print the report
    Apply(DesiredArgs),
    /// Fetch and diff without mutating, print the plan
    Plan(DesiredArgs),
    /// Print the current permission records of an item
    Show {
        /// Remote item identifier
        #[arg(long)]
        item: String,
    },
}

#[derive(clap::Args, Debug)]
struct DesiredArgs {
    /// Remote item identifier
    #[arg(long)]
    item: String,

    /// JSON file with `{"read": [...], "write": [...]}`, or `-` for stdin
    #[arg(long, value_name = "FILE|-")]
    desired: String,
}

/// CLI-based configuration resolver.
///
/// Merges file/env config via [`ConfigLoader`] and applies CLI argument
/// overrides as the highest-priority layer.
struct CliConfigResolver {
    project_root: PathBuf,
    global_config: Option<PathBuf>,
    debug: bool,
    origin: Option<String>,
    drive_id: Option<String>,
    token_env: Option<String>,
    allow_missing_item: bool,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let project_root = args.project.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to get current directory, using '.'");
                PathBuf::from(".")
            })
        });

        Self {
            project_root,
            global_config: args.config.clone(),
            debug: args.debug,
            origin: args.origin.clone(),
            drive_id: args.drive_id.clone(),
            token_env: args.token_env.clone(),
            allow_missing_item: args.allow_missing_item,
        }
    }

    fn resolve(&self) -> Result<PermsyncConfig> {
        let mut loader = ConfigLoader::new().with_project_root(&self.project_root);
        if let Some(ref path) = self.global_config {
            loader = loader.with_global_config(path);
        }

        let mut config = loader.load()?;
        self.apply(&mut config);
        Ok(config)
    }
}

impl ConfigResolver for CliConfigResolver {
    fn apply(&self, config: &mut PermsyncConfig) {
        if self.debug {
            config.debug = true;
        }
        if let Some(ref origin) = self.origin {
            config.storage.origin.clone_from(origin);
        }
        if let Some(ref drive_id) = self.drive_id {
            config.storage.drive_id.clone_from(drive_id);
        }
        if let Some(ref var) = self.token_env {
            config.auth.token_env.clone_from(var);
        }
        if self.allow_missing_item {
            config.reconcile.missing_item = MissingItemPolicy::TreatAsEmpty;
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let resolver = CliConfigResolver::from_args(&args);
    let config = resolver.resolve().context("Config error")?;

    init_tracing(&args, &config);
    debug!(
        path = %resolver.project_root.display(),
        drive = %config.storage.drive_id,
        "Resolved configuration"
    );

    let desired = match &args.command {
        Command::Apply(d) | Command::Plan(d) => Some(read_desired(&d.desired)?),
        Command::Show { .. } => None,
    };

    let storage = config.storage.to_storage().context("Config error")?;
    let transport = UreqTransport::with_timeout_secs(config.http.timeout_secs);
    let tokens = EnvTokenProvider::new(config.auth.token_env.clone());
    let command = SetPermissionsCommand::new(storage, &transport, &tokens)
        .with_missing_item(config.reconcile.missing_item);

    let (item, result) = match (&args.command, desired) {
        (Command::Apply(d), Some(desired)) => {
            let item = RemoteItem::new(d.item.as_str());
            let result = command.call(&item, &desired).map(|report| {
                let ok = report.is_success();
                (report.to_json(), ok)
            });
            (item, result)
        }
        (Command::Plan(d), Some(desired)) => {
            let item = RemoteItem::new(d.item.as_str());
            let result = command
                .plan(&item, &desired)
                .map(|plan| (plan.to_json(), true));
            (item, result)
        }
        (Command::Show { item }, _) => {
            let item = RemoteItem::new(item.as_str());
            let result = command
                .fetch(&item)
                .map(|records| (json!({ "item": item.as_str(), "permissions": records }), true));
            (item, result)
        }
        (_, None) => anyhow::bail!("desired permissions are required for this command"),
    };

    let (output, ok) = match result {
        Ok(done) => done,
        Err(e) => (error_json(&item, &e), false),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    info!(item = %item, success = ok, "Done");
    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Terminal filter: --debug > --verbose > RUST_LOG env > configured level.
///
/// HTTP and TLS crates stay at WARN under --debug.
fn init_tracing(args: &Args, config: &PermsyncConfig) {
    let filter = if args.debug || config.debug {
        EnvFilter::new("debug,ureq=warn,ureq_proto=warn,rustls=warn")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .init();
}

/// Reads and validates the desired permissions document.
///
/// Unknown access level keys are rejected here, before any token is
/// acquired.
fn read_desired(source: &str) -> Result<DesiredPermissions> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read desired permissions from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read desired permissions file '{source}'"))?
    };

    let raw: BTreeMap<String, GranteeSet> = serde_json::from_str(&text)
        .with_context(|| format!("invalid desired permissions JSON in '{source}'"))?;
    let desired = DesiredPermissions::try_from(raw)?;
    debug!(levels = desired.len(), "Loaded desired permissions");
    Ok(desired)
}

fn error_json(item: &RemoteItem, err: &ReconcileError) -> Value {
    json!({
        "item": item.as_str(),
        "success": false,
        "error": {
            "kind": err.failure_kind().map(|k| k.as_str()),
            "code": err.code(),
            "message": err.to_string(),
        }
    })
}
