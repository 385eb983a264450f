use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use markdown_normalizer::config::Config;
use markdown_normalizer::{runner, watch};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    if let Some(path) = &config.config_file {
        log::debug!("Using configuration file {}", path.display());
    }

    let outcome = {
        let mut stdout = io::stdout().lock();
        let outcome = runner::run(&config, io::stdin().lock(), &mut stdout)?;
        stdout.flush()?;
        outcome
    };

    if config.watch {
        watch::watch(&config).await?;
    }

    Ok(ExitCode::from(outcome.exit_status(config.mode)))
}
