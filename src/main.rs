use clap::Parser;
use s3_lister::ListerError;
use s3_lister::config::ConfigSource;
use s3_lister::infrastructure::storage;
use s3_lister::services::session::{self, SessionOutcome};
use s3_lister::utils::format;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Print a numbered listing of the objects in an S3 bucket.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _args = Args::parse();

    // Diagnostics go to stderr so they never mix with the listing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "s3_lister=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run(&mut out).await {
        Ok(outcome) => {
            info!(?outcome, "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "listing failed");
            if let Err(write_err) = format::write_error(&mut out, &err) {
                error!(error = %write_err, "failed to print error report");
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run<W: Write>(out: &mut W) -> Result<SessionOutcome, ListerError> {
    let source = ConfigSource::load()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    session::run(
        &source,
        |config| async move { storage::setup_storage(&config).await },
        &mut input,
        out,
    )
    .await
}
