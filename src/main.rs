use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use labelcheck::{Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "labelcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Chat completion model (defaults to $OPENAI_MODEL or gpt-3.5-turbo)
    #[arg(long, global = true)]
    model: Option<String>,

    /// API base URL (defaults to $OPENAI_BASE_URL or https://api.openai.com)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Answer from a canned in-process response instead of calling the API
    #[arg(long, global = true)]
    mock: bool,

    /// Do not draw the progress spinner
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // A missing .env file is fine; the key may come from the real environment.
    if let Err(e) = dotenv::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let container = Container::new(ContainerConfig {
        mock: cli.mock,
        model: cli.model,
        base_url: cli.base_url,
        show_progress: !cli.quiet,
    });

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
