//! Configuration.
//!
//! Settings live in an INI file at `~/.vimetile/config.ini`. Everything has a
//! default, so a missing file is not an error.

mod file;

pub use file::{
    config_file_path, CacheSettings, ConfigError, ConfigFile, HttpSettings, LoggingSettings,
};

use std::time::Duration;

use crate::transport::{AsyncReqwestClient, TransportError};

impl ConfigFile {
    /// Builds the HTTP client described by the `[http]` section.
    pub fn http_client(&self) -> Result<AsyncReqwestClient, TransportError> {
        AsyncReqwestClient::with_options(
            Duration::from_secs(self.http.timeout),
            &self.http.user_agent,
        )
    }
}
