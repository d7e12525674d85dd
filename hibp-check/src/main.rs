use std::io;

use clap::Parser;
use hibp_check::report::{password_report, summary_line};
use hibp_check::{
    Args, BuildOutcome, Config, Error, HashFileBuilder, Mode, PasswordSource, TerminalPassword,
    check_hash_file, run_builder,
};
use hibp_range::BreachChecker;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let Config { mode, client, concurrent_checks, progress } = Args::parse().into_config()?;

    match mode {
        Mode::Generate(path) => {
            let builder = HashFileBuilder::open(&path)?;
            let outcome = run_builder(
                builder,
                io::stdin().lock(),
                &mut io::stdout().lock(),
                &mut TerminalPassword::default(),
            )?;
            if let BuildOutcome::Written { added } = outcome {
                info!(path = %path.display(), added, "hash file written");
            }
        }
        Mode::CheckFile(path) => {
            let checker = BreachChecker::from_config(&client)?;
            let summary = check_hash_file(&checker, &path, concurrent_checks, progress).await?;
            println!("{}", summary_line(&summary));

            if summary.failed > 0 {
                return Err(Error::BatchFailures { failed: summary.failed, total: summary.total });
            }
        }
        Mode::Interactive => {
            let checker = BreachChecker::from_config(&client)?;
            let password = TerminalPassword::default().read_password()?;
            let result = checker.check_password(&password).await?;
            println!("{}", password_report(&result));
        }
    }

    Ok(())
}
