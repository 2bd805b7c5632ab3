// SPDX-License-Identifier: MPL-2.0
use snapbooth::app::{self, paths, Cli, USAGE};
use snapbooth::config;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::parse(pico_args::Arguments::from_env()) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    paths::init_cli_overrides(cli.config_dir.clone());
    let (config, warning) = config::load();
    if let Some(warning) = warning {
        log::warn!("{warning}");
    }

    let base_url = cli
        .server
        .clone()
        .unwrap_or_else(|| config.server.base_url());
    let mut stdout = std::io::stdout().lock();
    match app::run(cli, config, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_auth_required() => {
            eprintln!("{}", app::login_hint(&base_url));
            ExitCode::from(3)
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
