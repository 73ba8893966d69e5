//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use qmiloc_config::Config;

use crate::bootstrap::ConfigLoader;

/// Loader returning the defaults with quiet logging.
pub struct TestConfigLoader {
    config: Config,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config {
            log_filter: String::from("warn"),
            ..Config::default()
        })
    }

    #[must_use]
    pub const fn with_config(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Loader that intentionally fails by passing an out-of-range session id.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("qmilocd"),
            OsString::from("--session-id"),
            OsString::from("300"),
        ];
        Config::load_from_iter(args)
    }
}
