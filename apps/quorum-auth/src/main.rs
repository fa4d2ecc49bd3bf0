use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use quorum_auth_core::{
    config::{ENV_SERVER_REALM, ENV_SERVICE_PRINCIPAL},
    credential::{Credential, StaticCredentialProvider},
    QuorumAuth, QuorumAuthConfig,
};
use quorum_auth_digest::DigestContextFactory;
use quorum_auth_net::{authenticate_accepted, connect_tcp};

#[derive(Parser)]
#[command(name = "quorum-auth", version, about = "Quorum peer authentication demo")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args)]
struct AuthArgs {
    /// Expected acceptor service principal, `service/host`
    #[arg(long, env = ENV_SERVICE_PRINCIPAL)]
    service_principal: Option<String>,

    /// Realm of the acceptor, when it differs from the initiator's own
    #[arg(long, env = ENV_SERVER_REALM)]
    server_realm: Option<String>,

    /// Skip the handshake entirely
    #[arg(long, default_value_t = false)]
    no_auth: bool,
}

#[derive(Subcommand)]
enum Command {
    // Accept peers in a loop, authenticate each, then echo whatever they send.
    Serve {
        // Bind address, e.g. 127.0.0.1:3888
        #[arg(long)]
        bind: String,

        /// Accepted peer, NAME=PASSWORD. Can be repeated.
        #[arg(long = "user", value_parser = parse_user)]
        users: Vec<(String, String)>,

        #[command(flatten)]
        auth: AuthArgs,
    },

    // Connect to a peer, authenticate, send a message and print the echo.
    Connect {
        // Peer address, e.g. 127.0.0.1:3888
        #[arg(long)]
        connect: String,

        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        // Message to send once authenticated
        #[arg(long, default_value = "ruok")]
        msg: String,

        #[command(flatten)]
        auth: AuthArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Serve { bind, users, auth } => run_server(bind, users, auth).await,
        Command::Connect { connect, username, password, msg, auth } => {
            run_client(connect, username, password, msg, auth).await
        }
    }
}

fn parse_user(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, password)) if !name.is_empty() => Ok((name.to_owned(), password.to_owned())),
        _ => Err(format!("expected NAME=PASSWORD, got {s:?}")),
    }
}

fn config(args: AuthArgs) -> QuorumAuthConfig {
    let mut cfg = QuorumAuthConfig::from_env().with_enabled(!args.no_auth);
    if let Some(principal) = args.service_principal {
        cfg = cfg.with_service_principal(principal);
    }
    if let Some(realm) = args.server_realm {
        cfg = cfg.with_server_realm(realm);
    }
    cfg
}

async fn run_server(bind: String, users: Vec<(String, String)>, args: AuthArgs) -> Result<()> {
    if users.is_empty() && !args.no_auth {
        return Err(anyhow!("--user is required at least once"));
    }

    let cfg = config(args);
    let server = users
        .into_iter()
        .fold(Credential::new(), |cred, (name, password)| cred.with_user_secret(name, password));
    let provider = StaticCredentialProvider::new().with_context(cfg.server_login_context.clone(), server);
    let auth = Arc::new(QuorumAuth::new(cfg, Arc::new(provider), Arc::new(DigestContextFactory::new())));

    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(%bind, "quorum-auth server listening");

    loop {
        let (mut stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!(error = %e, "accept failed");
                continue;
            }
        };

        // Each peer authenticates on its own task.
        let auth = auth.clone();
        tokio::spawn(async move {
            if let Err(e) = authenticate_accepted(&mut stream, &auth).await {
                error!(%peer, error = %e, "peer rejected");
                return;
            }
            if let Err(e) = echo(stream).await {
                error!(%peer, error = %e, "connection ended with error");
            }
        });
    }
}

async fn echo(mut stream: TcpStream) -> std::io::Result<()> {
    let mut buf = vec![0u8; 4096];
    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        stream.write_all(&buf[..n]).await?;
    }
}

async fn run_client(connect: String, username: String, password: String, msg: String, args: AuthArgs) -> Result<()> {
    let cfg = config(args);
    let client = Credential::shared_secret(username, password);
    let provider = StaticCredentialProvider::new().with_context(cfg.client_login_context.clone(), client);
    let auth = QuorumAuth::new(cfg, Arc::new(provider), Arc::new(DigestContextFactory::new()));

    let mut stream = connect_tcp(connect.as_str(), &auth)
        .await
        .with_context(|| format!("failed to authenticate to {connect}"))?;

    stream.write_all(msg.as_bytes()).await?;
    let mut echo = vec![0u8; msg.len()];
    stream.read_exact(&mut echo).await?;
    println!("{}", String::from_utf8_lossy(&echo));

    Ok(())
}
