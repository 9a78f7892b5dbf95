use cadence_modernizer_core::{execute_modernizer_flow, style, CoreCliArgs, Parser};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli_args = CoreCliArgs::parse();

    // RUST_LOG wins, otherwise --debug decides
    let default_level = if cli_args.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match execute_modernizer_flow(cli_args.clone()).await {
        Ok(outcome) => {
            if outcome.failed(&cli_args.command) {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!(
                "{} {} {}",
                style("❌"),
                style("cadence-modernizer failed:").red().bold(),
                style(format!("{e:#}")).red()
            );
            std::process::exit(1);
        }
    }
}
