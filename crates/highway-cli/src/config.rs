use anyhow::{Context, Result};
use highway_lib::{HighwayConfig, DEFAULT_POOL_CAPACITY};

/// Environment variable consulted when `--pool-capacity` is not given.
pub const POOL_CAPACITY_ENV: &str = "HIGHWAY_POOL_CAPACITY";

/// Build the highway configuration from the command line and the environment.
pub fn resolve_config(pool_capacity: Option<usize>) -> Result<HighwayConfig> {
    let from_env = std::env::var(POOL_CAPACITY_ENV).ok();
    let pool_capacity = resolve_pool_capacity(pool_capacity, from_env.as_deref())?;
    Ok(HighwayConfig { pool_capacity })
}

/// The flag wins over the environment, which wins over the default.
pub fn resolve_pool_capacity(flag: Option<usize>, env_value: Option<&str>) -> Result<usize> {
    if let Some(capacity) = flag {
        return Ok(capacity);
    }
    match env_value.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => raw.parse().with_context(|| {
            format!("{POOL_CAPACITY_ENV} must be a non-negative integer, got '{raw}'")
        }),
        None => Ok(DEFAULT_POOL_CAPACITY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_takes_precedence() {
        assert_eq!(resolve_pool_capacity(Some(4), Some("9")).unwrap(), 4);
    }

    #[test]
    fn environment_overrides_default() {
        assert_eq!(resolve_pool_capacity(None, Some(" 9 ")).unwrap(), 9);
        assert_eq!(
            resolve_pool_capacity(None, None).unwrap(),
            DEFAULT_POOL_CAPACITY
        );
        assert_eq!(
            resolve_pool_capacity(None, Some("")).unwrap(),
            DEFAULT_POOL_CAPACITY
        );
    }

    #[test]
    fn malformed_environment_value_is_an_error() {
        let error = resolve_pool_capacity(None, Some("lots")).unwrap_err();
        assert!(error.to_string().contains(POOL_CAPACITY_ENV));
    }
}
