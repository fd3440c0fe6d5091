mod cli;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use zoomkit_api::{MeetingService, Record, ZoomApiHelper};
use zoomkit_core::{CacheBackend, Config};

use crate::cli::{CacheAction, Cli, Command, ConfigAction};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    zoomkit_core::init()?;

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)?;

    if let Command::Config { action } = &cli.command {
        return Ok(run_config(action, &config, &config_path));
    }

    let config = match config.into_validated() {
        Ok((config, _)) => config,
        Err(e) => {
            tracing::error!(code = e.code(), error = %e, "Configuration rejected");
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    match cli.command {
        Command::Upcoming { skip_cache } => {
            let Some(helper) = helper(&config) else {
                return Ok(print_result(None));
            };
            Ok(print_result(helper.get_upcoming_meetings(skip_cache).await))
        }
        Command::Recordings {
            from,
            to,
            skip_cache,
        } => {
            let Some(helper) = helper(&config) else {
                return Ok(print_result(None));
            };
            Ok(print_result(helper.get_recordings(from, to, skip_cache).await))
        }
        Command::Cache {
            action: CacheAction::Clear,
        } => {
            println!("{}", clear_requests_cache(&config)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { action } => Ok(run_config(&action, &config, &config_path)),
    }
}

fn run_config(action: &ConfigAction, config: &Config, config_path: &Path) -> ExitCode {
    match action {
        ConfigAction::Check => {
            let validation = config.validate();
            for warning in &validation.warnings {
                println!("warning: {}", warning);
            }
            for error in &validation.errors {
                println!("error: {}", error);
            }
            if validation.is_valid() {
                println!("Configuration OK ({})", config_path.display());
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
            ExitCode::SUCCESS
        }
    }
}

/// Clear the configured backend. The memory backend lives only inside a
/// running process, so there is nothing on disk to clear.
fn clear_requests_cache(config: &Config) -> Result<&'static str> {
    match config.cache.backend {
        CacheBackend::Memory => Ok("Memory cache is process-local; nothing to clear"),
        CacheBackend::Disabled => Ok("Cache is disabled; nothing to clear"),
        CacheBackend::Sqlite => {
            zoomkit_api::cache::from_config(config)?.clear()?;
            Ok("Cache cleared")
        }
    }
}

fn helper(config: &Config) -> Option<ZoomApiHelper> {
    match MeetingService::from_config(config) {
        Ok(service) => Some(ZoomApiHelper::new(Arc::new(service))),
        Err(e) => {
            tracing::error!(code = e.code(), error = %e, "Could not set up Zoom client");
            eprintln!("{}", e.user_message());
            None
        }
    }
}

fn print_result(result: Option<Vec<Record>>) -> ExitCode {
    match result.map(|items| serde_json::to_string_pretty(&items)) {
        Some(Ok(json)) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Some(Err(e)) => {
            tracing::error!(error = %e, "Could not render results");
            println!("false");
            ExitCode::FAILURE
        }
        None => {
            println!("false");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use serde_json::json;
    use zoomkit_api::{RequestsCache, SqliteCache};

    #[test]
    fn test_clear_memory_cache_reports_nothing_to_clear() {
        let config = Config::default();
        let message = clear_requests_cache(&config).unwrap();
        assert!(message.contains("nothing to clear"));
    }

    #[test]
    fn test_clear_sqlite_cache_removes_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.config_dir = dir.path().to_path_buf();
        config.cache.backend = CacheBackend::Sqlite;

        SqliteCache::open(config.cache_path(), None)
            .unwrap()
            .set("upcomingMeetings", &[json!({"id": 1})])
            .unwrap();

        assert_eq!(clear_requests_cache(&config).unwrap(), "Cache cleared");
        let cache = SqliteCache::open(config.cache_path(), None).unwrap();
        assert!(cache.get("upcomingMeetings").unwrap().is_none());
    }
}
