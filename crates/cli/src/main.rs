// badgesync CLI - mirror unread notifications onto the app badge (headless host)

mod exit_codes;
mod host;

use std::cell::Cell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use badgesync_api_client::{
    delete_auth, save_auth, ApiClient, ApiError, AuthCredentials, SavedAuth, DEFAULT_API_BASE,
};
use badgesync_badge::{
    Application, AuthorizationStatus, BackgroundFetchResult, BadgeNotifications, HttpClientFactory,
};
use badgesync_config::{config_dir, FileStore, PreferenceStore};

use exit_codes::*;
use host::LocalHost;

#[derive(Parser)]
#[command(name = "badgesync")]
#[command(about = "Keep the app badge in step with unread notifications")]
#[command(version)]
struct Cli {
    /// Directory holding badge.json, auth.json and host.json
    #[arg(long, global = true, env = "BADGESYNC_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify an API token and save the session
    Login {
        /// API token (otherwise read from BADGESYNC_TOKEN or prompted)
        #[arg(long, env = "BADGESYNC_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// API base URL
        #[arg(long, env = "BADGESYNC_API_BASE", default_value = DEFAULT_API_BASE)]
        api_base: String,
    },
    /// Forget the saved session
    Logout,
    /// Show badge state, preference and session
    Status {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Turn badge sync on (restores the stashed badge)
    Enable,
    /// Turn badge sync off (stashes and clears the badge)
    Disable,
    /// Run startup configuration: permission request and fetch schedule
    Configure,
    /// Run one background fetch and apply the unread count
    Sync,
    /// Change the host's notification permission record
    Permission {
        #[arg(value_enum)]
        action: PermissionAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PermissionAction {
    Grant,
    Deny,
    Reset,
}

type Controller<'a> =
    BadgeNotifications<FileStore, &'a LocalHost, &'a LocalHost, SavedAuth, HttpClientFactory>;

fn controller<'a>(dir: &Path, host: &'a LocalHost) -> Controller<'a> {
    BadgeNotifications::new(
        FileStore::in_dir(dir),
        host,
        host,
        SavedAuth::new(dir),
        HttpClientFactory,
    )
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let dir = config_dir(cli.config_dir);
    log::debug!("config dir: {}", dir.display());

    let result = match cli.command {
        Commands::Login { token, api_base } => cmd_login(&dir, token, api_base),
        Commands::Logout => cmd_logout(&dir),
        Commands::Status { json } => cmd_status(&dir, json),
        Commands::Enable => cmd_set_enabled(&dir, true),
        Commands::Disable => cmd_set_enabled(&dir, false),
        Commands::Configure => cmd_configure(&dir),
        Commands::Sync => cmd_sync(&dir),
        Commands::Permission { action } => cmd_permission(&dir, action),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Map an API failure onto the badge exit-code range.
    pub fn api(err: ApiError) -> Self {
        match err {
            ApiError::Http(401, _) | ApiError::Http(403, _) => {
                Self::new(EXIT_NOT_AUTH, "Invalid API token")
                    .with_hint("generate a token with the notifications scope and run `badgesync login` again")
            }
            ApiError::Network(msg) => Self::new(EXIT_NETWORK, format!("Cannot reach API: {}", msg)),
            other => Self::new(EXIT_UPSTREAM, other.to_string()),
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// login / logout
// ============================================================================

fn cmd_login(dir: &Path, token: Option<String>, api_base: String) -> Result<(), CliError> {
    // Resolve token: --token flag / BADGESYNC_TOKEN env > interactive prompt
    let token = match token.map(|t| t.trim().to_string()) {
        Some(t) if !t.is_empty() => t,
        Some(_) => {
            return Err(CliError::new(EXIT_USAGE, "Empty token"));
        }
        None if atty::is(atty::Stream::Stdin) => prompt_token()?,
        None => {
            return Err(CliError::new(EXIT_USAGE, "No token provided and stdin is not a TTY")
                .with_hint("pass --token or set BADGESYNC_TOKEN"));
        }
    };

    let creds = AuthCredentials::new(token, api_base);
    let user = ApiClient::new(&creds).verify_token().map_err(CliError::api)?;

    let creds = AuthCredentials { login: Some(user.login.clone()), ..creds };
    save_auth(dir, &creds).map_err(CliError::io)?;

    eprintln!("Authenticated as {}", user.login);
    Ok(())
}

fn prompt_token() -> Result<String, CliError> {
    eprint!("API token: ");
    io::stderr().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(|e| CliError::io(e.to_string()))?;
    let trimmed = buf.trim().to_string();
    if trimmed.is_empty() {
        return Err(CliError::new(EXIT_USAGE, "No token provided")
            .with_hint("pass --token or set BADGESYNC_TOKEN"));
    }
    Ok(trimmed)
}

fn cmd_logout(dir: &Path) -> Result<(), CliError> {
    delete_auth(dir).map_err(CliError::io)?;
    eprintln!("Logged out");
    Ok(())
}

// ============================================================================
// status
// ============================================================================

fn cmd_status(dir: &Path, json: bool) -> Result<(), CliError> {
    let host = LocalHost::in_dir(dir);
    let badge = controller(dir, &host);
    let state = smol::block_on(badge.check());
    let host_state = host.load();
    let session = SavedAuth::new(dir).load();

    if json {
        let out = serde_json::json!({
            "state": state,
            "badge": host_state.badge,
            "enabled": badge.is_enabled(),
            "count_when_disabled": badge.store().count_when_disabled(),
            "authorization": host_state.authorization,
            "background_fetch": host_state.background_fetch,
            "account": session.as_ref().map(|s| serde_json::json!({
                "login": s.login,
                "api_base": s.api_base,
            })),
        });
        let text = serde_json::to_string_pretty(&out).map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    println!("state:       {}", state);
    println!("badge:       {}", host_state.badge);
    println!("preference:  {}", if badge.is_enabled() { "on" } else { "off" });
    println!("suppressed:  {}", badge.store().count_when_disabled());
    println!(
        "fetch:       {}",
        match host_state.background_fetch {
            Some(interval) => interval.to_string(),
            None => "unset".to_string(),
        }
    );
    println!("permission:  {}", host_state.authorization);
    match session {
        Some(s) => println!(
            "account:     {} ({})",
            s.login.as_deref().unwrap_or("unknown"),
            s.api_base
        ),
        None => println!("account:     not logged in"),
    }
    Ok(())
}

// ============================================================================
// enable / disable / configure
// ============================================================================

fn cmd_set_enabled(dir: &Path, value: bool) -> Result<(), CliError> {
    let host = LocalHost::in_dir(dir);
    let badge = controller(dir, &host);
    badge.set_enabled(value);
    eprintln!(
        "Badge sync {} (badge now {})",
        if value { "enabled" } else { "disabled" },
        badge.application().badge_number()
    );
    Ok(())
}

fn cmd_configure(dir: &Path) -> Result<(), CliError> {
    let host = LocalHost::in_dir(dir);
    let badge = controller(dir, &host);

    let granted = Cell::new(None);
    let Some(answer) = badge.configure(Some(|g| granted.set(Some(g)))) else {
        eprintln!("Badge sync disabled; background fetch: never");
        return Ok(());
    };
    eprintln!("Background fetch: minimum; waiting for badge permission");
    smol::block_on(answer);

    if granted.get() == Some(true) {
        eprintln!("Badge permission granted");
        Ok(())
    } else {
        Err(CliError::new(EXIT_PERMISSION_DENIED, "Badge permission denied")
            .with_hint("run `badgesync permission grant` to allow badges"))
    }
}

// ============================================================================
// sync
// ============================================================================

fn cmd_sync(dir: &Path) -> Result<(), CliError> {
    let host = LocalHost::in_dir(dir);
    let badge = controller(dir, &host);

    let outcome = Cell::new(None);
    smol::block_on(badge.fetch(|r| outcome.set(Some(r))));

    match outcome.get() {
        Some(BackgroundFetchResult::Failed) => Err(CliError::new(EXIT_SYNC_FAILED, "Sync failed")
            .with_hint("rerun with RUST_LOG=debug for the API error")),
        Some(result) => {
            println!("{}", result);
            eprintln!("badge: {}", badge.application().badge_number());
            Ok(())
        }
        None => {
            let reason = if SavedAuth::new(dir).load().is_none() {
                "not logged in"
            } else {
                "badge sync is disabled"
            };
            Err(CliError::new(EXIT_SYNC_SKIPPED, format!("Sync skipped: {}", reason)))
        }
    }
}

// ============================================================================
// permission
// ============================================================================

fn cmd_permission(dir: &Path, action: PermissionAction) -> Result<(), CliError> {
    let status = match action {
        PermissionAction::Grant => AuthorizationStatus::Authorized,
        PermissionAction::Deny => AuthorizationStatus::Denied,
        PermissionAction::Reset => AuthorizationStatus::NotDetermined,
    };
    LocalHost::in_dir(dir)
        .set_authorization(status)
        .map_err(|e| CliError::io(e.to_string()))?;
    eprintln!("Notification permission: {}", status);
    Ok(())
}
