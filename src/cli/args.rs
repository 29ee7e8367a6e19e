use clap::Parser;
use std::path::PathBuf;

use crate::config::{AppConfig, ConfigError};
use crate::transfer::LockOrder;

pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Manage users and transfer balances against PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "user_ledger", version = VERSION)]
#[command(about = "Manage users and transfer balances against PostgreSQL", long_about = None)]
pub struct CliArgs {
    /// Environment name; loads config/<ENV>.yaml
    #[arg(short = 'e', long = "env", value_name = "ENV", default_value = "dev")]
    pub env: String,

    /// Explicit config file, takes precedence over --env
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// PostgreSQL connection URL, overrides DATABASE_URL and the config file
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,

    /// Row lock order for transfers: 'role' (sender first) or 'id' (lowest id first)
    #[arg(long = "lock-order", value_name = "ORDER")]
    pub lock_order: Option<LockOrder>,

    /// Give up on a row lock after this many milliseconds
    #[arg(long = "lock-timeout-ms", value_name = "MS")]
    pub lock_timeout_ms: Option<u64>,

    /// Create the users table if it does not exist
    #[arg(long = "init-schema")]
    pub init_schema: bool,
}

impl CliArgs {
    /// Load the config file and apply command-line overrides.
    ///
    /// A missing `config/<env>.yaml` falls back to defaults; a missing
    /// explicit `--config` file is an error.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => match AppConfig::load(&self.env) {
                Ok(config) => config,
                Err(ConfigError::Read { path, .. }) => {
                    eprintln!("config {} not found, using defaults", path);
                    AppConfig::default()
                }
                Err(e) => return Err(e),
            },
        };
        self.apply_overrides(&mut config);
        config.transfer.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(lock_order) = self.lock_order {
            config.transfer.lock_order = lock_order;
        }
        if let Some(ms) = self.lock_timeout_ms {
            config.transfer.lock_timeout_ms = Some(ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    #[case::defaults(&["program"], "dev", None)]
    #[case::short_env(&["program", "-e", "test"], "test", None)]
    #[case::lock_order_id(&["program", "--lock-order", "id"], "dev", Some(LockOrder::Id))]
    #[case::lock_order_role(&["program", "--env", "prod", "--lock-order", "role"], "prod", Some(LockOrder::Role))]
    fn test_args_parsing(
        #[case] args: &[&str],
        #[case] env: &str,
        #[case] lock_order: Option<LockOrder>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.env, env);
        assert_eq!(parsed.lock_order, lock_order);
        assert!(!parsed.init_schema);
    }

    #[rstest]
    #[case::bad_lock_order(&["program", "--lock-order", "random"])]
    #[case::bad_timeout(&["program", "--lock-timeout-ms", "soon"])]
    #[case::unknown_flag(&["program", "--force"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let args = CliArgs::try_parse_from([
            "program",
            "--lock-order",
            "id",
            "--lock-timeout-ms",
            "750",
            "--init-schema",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        args.apply_overrides(&mut config);

        assert!(args.init_schema);
        assert_eq!(config.transfer.lock_order, LockOrder::Id);
        assert_eq!(
            config.transfer.lock_timeout(),
            Some(Duration::from_millis(750))
        );
    }

    #[test]
    fn test_no_overrides_keep_config_values() {
        let args = CliArgs::try_parse_from(["program"]).unwrap();
        let mut config = AppConfig::default();
        config.transfer.lock_timeout_ms = Some(100);
        args.apply_overrides(&mut config);
        assert_eq!(config.transfer.lock_order, LockOrder::Role);
        assert_eq!(config.transfer.lock_timeout_ms, Some(100));
    }

    #[rstest]
    #[case::zero("0")]
    #[case::above_int_max("2147483648")]
    fn test_out_of_range_lock_timeout_rejected(#[case] ms: &str) {
        let args = CliArgs::try_parse_from(["program", "--env", "no-such-env", "--lock-timeout-ms", ms])
            .unwrap();
        assert!(matches!(
            args.load_config(),
            Err(ConfigError::InvalidLockTimeout { .. })
        ));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let args =
            CliArgs::try_parse_from(["program", "--config", "/nonexistent/ledger.yaml"]).unwrap();
        assert!(matches!(args.load_config(), Err(ConfigError::Read { .. })));
    }
}
