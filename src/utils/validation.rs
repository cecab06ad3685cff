// Validation utilities
// Author: Gabriel Demetrios Lafis

use super::{AppError, AppResult, Config};

/// Largest sample the engine will accept
pub const MAX_SAMPLE_SIZE: usize = 1_000_000;

/// Validate that a numeric value is in range
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    min: T,
    max: T,
    name: &str,
) -> Result<(), String> {
    if value < min || value > max {
        Err(format!(
            "'{}' must be between {} and {}",
            name, min, max
        ))
    } else {
        Ok(())
    }
}

/// Validate a requested sample size
pub fn validate_sample_size(sample_size: usize) -> Result<(), String> {
    validate_range(sample_size, 1, MAX_SAMPLE_SIZE, "sample_size")
}

/// Validate a loaded configuration
pub fn validate_config(config: &Config) -> AppResult<()> {
    validate_sample_size(config.engine.sample_size).map_err(AppError::Config)?;

    if config.server.host.trim().is_empty() {
        return Err(AppError::Config("'server.host' cannot be empty".to_string()));
    }

    if let Some(workers) = config.server.workers {
        validate_range(workers, 1, 1024, "server.workers").map_err(AppError::Config)?;
    }

    Ok(())
}
