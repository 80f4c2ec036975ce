use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qrdash::cli::{commands, commands::Context, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qrdash=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let api_base = cli.api_base;
    let context = || Context::load(config_path, api_base.clone());

    match cli.command {
        Commands::Init => commands::init().await,
        Commands::Login { username, password } => {
            commands::login(context()?, &username, password).await
        }
        Commands::Signup {
            username,
            email,
            password,
        } => commands::signup(context()?, &username, email, password).await,
        Commands::Logout => commands::logout(context()?).await,
        Commands::Whoami => commands::whoami(context()?).await,
        Commands::Hello => commands::hello(context()?).await,
        Commands::Time => commands::time(context()?).await,
        Commands::Echo { text, number } => commands::echo(context()?, &text, number).await,
        Commands::Qr { action } => commands::qr(context()?, action).await,
        Commands::App => commands::app(context()?).await,
        Commands::Serve { host, port } => commands::serve(config_path, host, port).await,
    }
}
