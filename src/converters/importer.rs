use super::ConvertToCooklang;
use crate::config::ImporterConfig;
use crate::error::GatewayError;
use crate::model::RecipeSource;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Url;
use std::io;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Runs the `cooklang-import` command-line tool.
///
/// The importer receives the recipe URL (or `--text <text>`), optionally
/// preceded by `--provider <name>`, and prints Cooklang on stdout.
#[derive(Debug, Clone)]
pub struct ExternalImporter {
    command: String,
    leading_args: Vec<String>,
    provider: Option<String>,
    timeout: Duration,
}

impl ExternalImporter {
    pub fn new(command: impl Into<String>, leading_args: Vec<String>, timeout: Duration) -> Self {
        ExternalImporter {
            command: command.into(),
            leading_args,
            provider: None,
            timeout,
        }
    }

    pub fn from_config(config: &ImporterConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone(), config.timeout())
    }

    /// A copy of this importer that forwards `provider` to the tool.
    pub fn for_provider(&self, provider: Option<String>) -> Self {
        ExternalImporter {
            provider,
            ..self.clone()
        }
    }

    /// Per-request arguments, without the configured leading ones.
    pub fn args(&self, source: &RecipeSource) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(provider) = &self.provider {
            args.push("--provider".to_string());
            args.push(provider.clone());
        }
        match source {
            RecipeSource::Url(url) => args.push(url.clone()),
            RecipeSource::Text(text) | RecipeSource::Html(text) => {
                args.push("--text".to_string());
                args.push(text.clone());
            }
        }
        args
    }
}

#[async_trait]
impl ConvertToCooklang for ExternalImporter {
    fn name(&self) -> &str {
        "cooklang-import"
    }

    async fn convert(&self, source: &RecipeSource) -> Result<String, GatewayError> {
        if let RecipeSource::Url(url) = source {
            check_web_url(url)?;
        }

        let args = self.args(source);
        debug!(
            "Running {} with {} argument(s), provider {:?}",
            self.command,
            self.leading_args.len() + args.len(),
            self.provider
        );

        let mut command = Command::new(&self.command);
        command
            .args(&self.leading_args)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GatewayError::configuration(format!(
                    "{} binary not found",
                    self.command
                )));
            }
            Ok(Err(e)) => {
                return Err(GatewayError::configuration(format!(
                    "Failed to run {}: {e}",
                    self.command
                )));
            }
            Err(_) => {
                warn!("{} exceeded {:?}", self.command, self.timeout);
                return Err(GatewayError::Timeout("Import timed out".to_string()));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let diagnostics = [stderr.trim(), stdout.trim()]
                .into_iter()
                .find(|text| !text.is_empty())
                .unwrap_or("Unknown error")
                .to_string();
            warn!("{} exited with {}: {}", self.command, output.status, diagnostics);
            return Err(GatewayError::ProcessFailure(diagnostics));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Only absolute http(s) URLs reach the importer, so a source can never be
/// read as one of its flags.
fn check_web_url(url: &str) -> Result<(), GatewayError> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(GatewayError::upstream(400, format!("Invalid URL: {url}"))),
    }
}
