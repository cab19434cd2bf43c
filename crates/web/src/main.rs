//! Web form for generating slide decks: a title, a block of text, a download.

mod page;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use slidegen_images::{ConfiguredSource, ImageSourceConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use slidegen_pptx::DeckGenerator;

use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "slidegen-web")]
#[command(author, version, about = "Web form that turns a title and text into a slide deck")]
struct Args {
    /// Address to bind the server to
    #[arg(long, env = "SLIDEGEN_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(long, env = "SLIDEGEN_PORT", default_value = "8501")]
    port: u16,

    /// Image search URL template containing {query}
    #[arg(long, env = "SLIDEGEN_IMAGE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Image request timeout in seconds
    #[arg(long, env = "SLIDEGEN_IMAGE_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Skip image lookups
    #[arg(long)]
    no_images: bool,

    /// Also write every generated deck into this directory
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = ImageSourceConfig::default()
        .with_endpoint(args.endpoint.as_str())
        .with_timeout(Duration::from_secs(args.timeout));
    let source = ConfiguredSource::from_config(config, !args.no_images)
        .context("Invalid image source configuration")?;
    let state = AppState::new(DeckGenerator::new(source), args.save_dir.clone());

    if args.no_images {
        log::info!("Image lookups disabled");
    } else {
        log::info!("Image endpoint: {}", args.endpoint);
    }

    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    log::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["slidegen-web"]).unwrap();
        assert_eq!(args.port, 8501);
        assert!(!args.no_images);
        assert!(args.save_dir.is_none());
    }

    #[test]
    fn test_custom_args() {
        let args = Args::try_parse_from([
            "slidegen-web",
            "--bind",
            "0.0.0.0",
            "--port",
            "9000",
            "--no-images",
            "--save-dir",
            "out",
        ])
        .unwrap();
        assert_eq!(args.bind, "0.0.0.0");
        assert_eq!(args.port, 9000);
        assert!(args.no_images);
        assert_eq!(args.save_dir, Some(PathBuf::from("out")));
    }
}
