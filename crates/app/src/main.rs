//! MedPortal client - Main Entry Point
//!
//! Loads configuration, restores the stored session and runs one command
//! against the portal backend.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use medportal_application::api::{LoginRequest, RegisterRequest};
use medportal_application::{ApiError, AppState, Portal, SessionStore};
use medportal_domain::{ApiRequest, HttpMethod, LOGIN_PATH, Location, RouteKind, RouteTable};
use medportal_infrastructure::{FileKeyValueStorage, PortalConfig, ReqwestTransport, telemetry};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(name = "medportal", version, about = "MedPortal command line client")]
struct Cli {
    /// Configuration file (defaults to ./medportal.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured backend URL.
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and store the session.
    Login {
        /// Username or email.
        #[arg(long, short)]
        username: String,
        /// Password.
        #[arg(long, short)]
        password: String,
        /// Location to start from, e.g. `/auth/login?redirect=/pred`.
        #[arg(long)]
        from: Option<String>,
    },
    /// Create an account.
    Register {
        /// Username.
        #[arg(long, short)]
        username: String,
        /// Email address.
        #[arg(long, short)]
        email: String,
        /// Password.
        #[arg(long, short)]
        password: String,
    },
    /// Clear the stored session.
    Logout,
    /// Show the stored session.
    Status,
    /// Resolve a client route with the current session.
    Open {
        /// Location such as `/physiology/metrics?range=7d`.
        path: String,
    },
    /// Call an API endpoint and print the JSON result.
    Call {
        /// GET, POST, PUT or DELETE.
        method: String,
        /// API path, optionally with a query string.
        path: String,
        /// JSON request body.
        #[arg(long)]
        body: Option<String>,
        /// Client location the call is made from.
        #[arg(long, default_value = "/index")]
        from: String,
    },
    /// List the client route table.
    Routes,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    let mut config = PortalConfig::load(cli.config.as_deref())?;
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }

    let storage = FileKeyValueStorage::new(config.storage_path()?);
    tracing::debug!(path = %storage.path().display(), "using session storage");
    let state = Arc::new(
        AppState::init(SessionStore::new(Arc::new(storage)))
            .await
            .context("failed to restore the session")?,
    );
    let portal = Portal::new(
        state,
        ReqwestTransport::new()?,
        config.client_config(),
        RouteTable::portal(),
    );

    let result = run(&portal, cli.command).await;
    for notice in portal.take_notices() {
        eprintln!("{}", notice.message);
    }
    result
}

async fn run(portal: &Portal<ReqwestTransport>, command: Command) -> Result<()> {
    match command {
        Command::Login {
            username,
            password,
            from,
        } => {
            let from = from.as_deref().unwrap_or(LOGIN_PATH);
            portal.navigate(Location::parse(from)?)?;
            let navigation = portal
                .login(&LoginRequest { username, password })
                .await
                .context("login failed")?;
            let user = portal.state().current_user();
            println!(
                "Signed in as {}",
                user.as_ref()
                    .and_then(|u| u.display_name())
                    .unwrap_or("unknown user")
            );
            println!("Now at {}", navigation.location);
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let response = portal
                .register(&RegisterRequest {
                    username,
                    email,
                    password,
                })
                .await
                .context("registration failed")?;
            println!("{}", response.message.as_deref().unwrap_or("Registered"));
        }
        Command::Logout => {
            let navigation = portal.logout().await?;
            println!("Now at {}", navigation.location);
        }
        Command::Status => {
            let state = portal.state();
            if state.is_authenticated() {
                let user = state.current_user();
                println!(
                    "Signed in as {} (id {})",
                    user.as_ref()
                        .and_then(|u| u.display_name())
                        .unwrap_or("unknown user"),
                    state.current_user_id().as_deref().unwrap_or("-")
                );
            } else {
                println!("Signed out");
            }
        }
        Command::Open { path } => {
            let navigation = portal.navigate(Location::parse(&path)?)?;
            println!(
                "{} -> {} [{}]",
                path,
                navigation.location,
                navigation.view.as_deref().unwrap_or("-")
            );
        }
        Command::Call {
            method,
            path,
            body,
            from,
        } => {
            portal.navigate(Location::parse(&from)?)?;
            let request = build_request(&method, &path, body.as_deref())?;
            match portal.send::<Value>(&request).await {
                Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                Err(ApiError::AuthExpired) => {
                    if let Some(location) = portal.current_location() {
                        println!("Now at {location}");
                    }
                    anyhow::bail!("session expired");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Routes => {
            for (path, kind, view) in RouteTable::portal().entries() {
                let access = match kind {
                    RouteKind::Public => "public",
                    RouteKind::AuthOnly => "auth",
                    RouteKind::AuthPageOnly => "guest",
                };
                println!("{path:<24} {access:<6} {}", view.unwrap_or("-"));
            }
        }
    }
    Ok(())
}

fn build_request(method: &str, path: &str, body: Option<&str>) -> Result<ApiRequest> {
    let method: HttpMethod = method.parse()?;
    let target = Location::parse(path)?;

    let mut request = ApiRequest::new(method, target.path());
    for (key, value) in target.query_pairs() {
        request = request.query(key.as_str(), value.as_str());
    }
    if let Some(body) = body {
        let body: Value = serde_json::from_str(body).context("--body is not valid JSON")?;
        request = request.json(body);
    }
    Ok(request)
}
