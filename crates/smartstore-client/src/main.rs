//! Terminal dashboard for the `SmartStore` service.
//!
//! Renders the shelf grid, metrics and recent action log, and sends the
//! two store commands. `watch` polls the backend and redraws until
//! `Ctrl-C`. An unreachable backend is reported as such and never
//! confused with "No empty shelves".

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use smartstore_client::render::{render_dashboard, render_decision, render_unreachable};
use smartstore_client::{ClientError, DEFAULT_URL, StoreClient};
use smartstore_types::AutoSimulateRequest;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smartstore-dashboard")]
#[command(about = "Terminal dashboard for the SmartStore restocking simulation")]
struct Args {
    /// Base URL of the store backend
    #[arg(long, env = "SMARTSTORE_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the dashboard once (default)
    State,
    /// Simulate a shelf becoming empty
    Empty,
    /// Ask the robot to restock
    Decide,
    /// Poll and redraw the dashboard until interrupted
    Watch {
        /// Seconds between refreshes
        #[arg(long, default_value = "2")]
        interval: u64,
    },
    /// Show or change the backend's auto-simulate timer
    Auto {
        /// Switch the timer on or off; omit to show the current setting
        switch: Option<Switch>,
        /// Seconds between automatic empties (1 to 10)
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let client = StoreClient::new(&args.url, Duration::from_millis(args.timeout_ms))?;
    debug!(url = client.base_url(), "dashboard starting");

    match args.command.unwrap_or(Command::State) {
        Command::State => {
            let store = client.state().await.map_err(|e| explain(&client, e))?;
            print!("{}", render_dashboard(&store));
        }
        Command::Empty => {
            let res = client
                .simulate_empty()
                .await
                .map_err(|e| explain(&client, e))?;
            println!("{}", res.message);
        }
        Command::Decide => {
            let res = client.decide().await.map_err(|e| explain(&client, e))?;
            println!("{}", render_decision(&res));
        }
        Command::Watch { interval } => watch(&client, Duration::from_secs(interval.max(1))).await?,
        Command::Auto { switch, interval } => {
            let status = match switch {
                Some(switch) => {
                    let request = AutoSimulateRequest {
                        enabled: matches!(switch, Switch::On),
                        interval_seconds: interval,
                    };
                    client.set_auto_simulate(&request).await
                }
                None => client.auto_simulate().await,
            }
            .map_err(|e| explain(&client, e))?;
            println!(
                "auto-simulate: {} every {}s",
                if status.enabled { "on" } else { "off" },
                status.interval_seconds
            );
        }
    }

    Ok(())
}

/// Redraw the dashboard every `interval` until `Ctrl-C`.
///
/// Connectivity failures are shown in place of the dashboard and polling
/// continues, so the dashboard can be started before the backend.
async fn watch(client: &StoreClient, interval: Duration) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let frame = match client.state().await {
                    Ok(store) => render_dashboard(&store),
                    Err(e) if e.is_connectivity() => render_unreachable(client.base_url()),
                    Err(e) => return Err(e.into()),
                };
                // Clear the screen and home the cursor before each frame.
                print!("\x1b[2J\x1b[H{frame}");
            }
            res = tokio::signal::ctrl_c() => {
                res?;
                return Ok(());
            }
        }
    }
}

/// Replace a connectivity error with the friendly notice.
fn explain(client: &StoreClient, err: ClientError) -> anyhow::Error {
    if err.is_connectivity() {
        anyhow::anyhow!("{}\n({err})", render_unreachable(client.base_url()))
    } else {
        err.into()
    }
}
