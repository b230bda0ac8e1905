use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use recflix::{
    app::Controller,
    cli::{self, Command},
    config::Config,
    services::HttpProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("recflix=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::info!(api = %config.api_base_url, "Starting client");

    let provider = Arc::new(HttpProvider::new(config.api_base_url.clone()));
    let controller = Controller::new(provider, config.timings());

    controller.dispatch(recflix::app::UiEvent::Loaded).await;
    println!("{}", cli::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match cli::parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", cli::HELP),
            Ok(Command::Show) => {
                let inner = controller.state().inner.read().await;
                print!("{}", cli::describe(&inner));
            }
            Ok(Command::Html) => println!("{}", controller.render_page().await),
            Ok(Command::Event(event)) => {
                controller.dispatch(event).await;
                if controller.take_scroll_request().await {
                    let inner = controller.state().inner.read().await;
                    print!("{}", cli::describe(&inner));
                }
            }
            Err(message) => eprintln!("{}", message),
        }
    }

    Ok(())
}
