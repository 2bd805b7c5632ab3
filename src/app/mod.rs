// SPDX-License-Identifier: MPL-2.0
//! Application entry layer: command-line parsing, gesture scripts and the
//! session driver that runs the editor against a camera and the server.

pub mod command;
pub mod paths;
pub mod script;
pub mod session;

pub use command::{Cli, Command, USAGE};
pub use session::{Outcome, Session};

use crate::config::{Config, ENV_SESSION};
use crate::error::Result;
use crate::infrastructure::ApiClient;
use crate::ui::editor::EditorSettings;
use std::io::Write;

/// Runs a parsed command line with the loaded configuration.
///
/// `--server` takes precedence over `[server] base_url`.
pub async fn run<W: Write>(cli: Cli, mut config: Config, out: &mut W) -> Result<()> {
    if let Some(server) = cli.server {
        config.server.base_url = Some(server);
    }
    let settings = EditorSettings::from_config(&config);
    let api = ApiClient::new(&config.server)?;
    log::debug!("Using server {}", api.base_url());
    command::execute(cli.command, settings, &api, out).await
}

/// Text shown when the server rejects the session.
#[must_use]
pub fn login_hint(base_url: &str) -> String {
    format!(
        "Authentication required. Log in at {}/login, then set the session cookie \
         with {ENV_SESSION} or `session` under [server] in settings.toml.",
        base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_hint_points_at_login_route() {
        let hint = login_hint("http://localhost:8080/");
        assert!(hint.contains("http://localhost:8080/login"));
        assert!(hint.contains(ENV_SESSION));
    }
}
