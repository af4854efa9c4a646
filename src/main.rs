use clap::Parser;
use swabox::app::Application;
use swabox::cli::Args;
use swabox::display;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "swabox=debug"
    } else {
        "swabox=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match Application::new(args) {
        Ok(mut app) => app.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        display::display_error(&e.to_string());
        std::process::exit(1);
    }
}
