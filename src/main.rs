use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use devenglish::config::Config;
use devenglish::controller::Controller;
use devenglish::generator::service_from_config;
use devenglish::host::web::{self, WatchHost};
use devenglish::runtime::Runtime;
use devenglish::ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "devenglish",
    version,
    about = "30-day technical English course with generated lessons"
)]
struct Cli {
    #[arg(short, long, help = "Path to a config file")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Address to serve on, e.g. 127.0.0.1:8080")]
    bind: Option<String>,

    #[arg(short, long, help = "Generation model name")]
    model: Option<String>,

    #[arg(long, help = "Use canned lessons instead of the generation service")]
    offline: bool,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DEVENGLISH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    config.offline |= cli.offline;
    config.normalize(&Theme::available_themes());

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {:?}", config.bind_addr))?;
    let theme = Theme::load(&config.theme).unwrap_or_default();
    let service = service_from_config(&config);

    let (host, view) = WatchHost::new();
    let controller = Controller::new(host, theme);
    let runtime = Runtime::new(
        controller,
        service,
        Duration::from_secs(config.request_timeout_secs),
    );
    let router = web::build_router(runtime.handle(), view);

    let (stop_tx, stop_rx) = watch::channel(false);
    let server = async {
        let result = web::serve(addr, router, stopped(stop_rx.clone())).await;
        stop_tx.send_replace(true);
        result
    };
    let signal = async {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    tracing::info!("ctrl-c received, shutting down");
                    stop_tx.send_replace(true);
                }
                Err(err) => tracing::warn!("could not listen for ctrl-c: {err}"),
            },
            _ = stopped(stop_rx.clone()) => {}
        }
    };

    let (served, _, _) = tokio::join!(server, runtime.run(stopped(stop_rx.clone())), signal);
    served.context("web server failed")?;
    tracing::info!("shut down");
    Ok(())
}

/// Resolves once the stop flag has been raised.
async fn stopped(mut rx: watch::Receiver<bool>) {
    // An error means the sender is gone, which also means stop.
    let _ = rx.wait_for(|stop| *stop).await;
}
