use crate::cli::command::Cli;
use crate::domain::WritePolicy;
use crate::errors::AppError;
use crate::remote::is_valid_url;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings resolved from `.env`, the environment and CLI flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub contacts_api_url: String,
    pub seed_api_url: String,
    pub seed_count: usize,
    pub cache_path: PathBuf,
    pub form_fields_path: PathBuf,
    pub write_policy: WritePolicy,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        if !is_valid_url(&cli.api_url) {
            return Err(AppError::Validation(format!(
                "CONTACTS_API_URL is not a valid URL: {}",
                cli.api_url
            )));
        }
        if !is_valid_url(&cli.seed_url) {
            return Err(AppError::Validation(format!(
                "SEED_API_URL is not a valid URL: {}",
                cli.seed_url
            )));
        }
        if cli.seed_count == 0 {
            return Err(AppError::Validation(
                "SEED_COUNT must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            contacts_api_url: cli.api_url.clone(),
            seed_api_url: cli.seed_url.clone(),
            seed_count: cli.seed_count,
            cache_path: cli.cache_path.clone(),
            form_fields_path: cli.form_fields_path.clone(),
            write_policy: WritePolicy::parse(&cli.write_policy)?,
            request_timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}
