use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::{routing::get, Router};
use clap::Parser;
use dotenv::dotenv;
use gophercises::urlshort::{json_handler, map_handler, yaml_handler, RedirectService};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "urlshort", version, about = "Redirect short paths to full URLs")]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "URLSHORT_ADDR", default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// YAML file with `- path: ... url: ...` records
    #[arg(long, conflicts_with = "json")]
    yaml: Option<PathBuf>,

    /// JSON file with `[{"path": ..., "url": ...}]` records
    #[arg(long)]
    json: Option<PathBuf>,
}

fn default_routes() -> HashMap<String, String> {
    HashMap::from([
        (
            "/urlshort-godoc".to_string(),
            "https://godoc.org/github.com/gophercises/urlshort".to_string(),
        ),
        (
            "/yaml-godoc".to_string(),
            "https://godoc.org/gopkg.in/yaml.v2".to_string(),
        ),
    ])
}

fn fallback() -> Router {
    Router::new().route("/", get(|| async { "Hello, world!" }))
}

fn build_redirector(cli: &Cli) -> anyhow::Result<RedirectService<Router>> {
    let redirector = if let Some(path) = &cli.yaml {
        let document = std::fs::read(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        yaml_handler(&document, fallback())
            .with_context(|| format!("invalid route document {}", path.display()))?
    } else if let Some(path) = &cli.json {
        let document = std::fs::read(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        json_handler(&document, fallback())
            .with_context(|| format!("invalid route document {}", path.display()))?
    } else {
        map_handler(default_routes(), fallback())
    };
    Ok(redirector)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();
    let redirector = build_redirector(&cli)?;
    log::info!("Loaded {} redirect routes", redirector.routes().len());

    let app = Router::new().fallback_service(redirector);
    let listener = TcpListener::bind(cli.addr)
        .await
        .with_context(|| format!("could not bind {}", cli.addr))?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("Shutting down");
        })
        .await?;

    Ok(())
}
