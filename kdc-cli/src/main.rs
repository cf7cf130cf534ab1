use clap::{Parser, Subcommand};
use kdc_cli::commands::{distribute, sign};
use kdc_cli::output::{self, OutputFormat};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "kdc-cli",
    about = "Key distribution center and RSA signature demonstrations",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    debug: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distribute a session key to parties through a KDC
    Distribute(distribute::DistributeArgs),
    /// Sign a message with a fresh RSA key pair and verify it
    Sign(sign::SignArgs),
}

fn main() {
    let cli = Cli::parse();

    let format = cli.format;

    // Initialize logging to stderr
    let level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("kdc_cli={},kdc_crypto={}", level, level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .init();

    debug!(version = kdc_crypto::VERSION, "starting demo");

    let result = match cli.command {
        Commands::Distribute(ref args) => distribute::handle(args, format),
        Commands::Sign(ref args) => sign::handle(args, format),
    };

    if let Err(e) = result {
        output::print_error(format, &e.to_string());
        std::process::exit(1);
    }
}
