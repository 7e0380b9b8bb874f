//! YAML configuration for tools built on the bindings.
//!
//! ```yaml
//! rpc_url: http://localhost:8545
//! request_timeout_ms: 30000
//! poll_interval_ms: 2000
//! max_block_range: 10000
//! artifacts_dir: build/contracts
//! log:
//!   level: info
//!   components:
//!     renbind-core: debug
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, Bytecode};
use crate::error::BindError;
use crate::http::{HttpConfig, HttpTransport};
use crate::opts::{FilterOpts, WatchOpts};
use crate::tracing_setup::LogConfig;
use crate::transport::RpcTransport;

/// Environment variable that overrides `rpc_url`.
pub const RPC_URL_ENV: &str = "RENBIND_RPC_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    pub rpc_url: String,
    pub request_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub max_block_range: u64,
    /// Directory of truffle build artifacts (`<Name>.json`).
    pub artifacts_dir: Option<PathBuf>,
    pub log: LogConfig,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".into(),
            request_timeout_ms: 30_000,
            poll_interval_ms: 2_000,
            max_block_range: 10_000,
            artifacts_dir: None,
            log: LogConfig::default(),
        }
    }
}

impl BindConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, BindError> {
        let cfg: Self = serde_yaml::from_str(yaml).map_err(|e| BindError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, BindError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Apply `RENBIND_RPC_URL` if it is set.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    fn apply_env_from(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(RPC_URL_ENV).filter(|u| !u.is_empty()) {
            tracing::debug!(url = %url, "rpc_url overridden from environment");
            self.rpc_url = url;
        }
    }

    fn validate(&self) -> Result<(), BindError> {
        if self.rpc_url.is_empty() {
            return Err(BindError::Config("rpc_url must not be empty".into()));
        }
        if self.max_block_range == 0 {
            return Err(BindError::Config("max_block_range must be at least 1".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(BindError::Config("poll_interval_ms must be at least 1".into()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// HTTP transport for `rpc_url`.
    pub fn transport(&self) -> Result<Arc<dyn RpcTransport>, BindError> {
        let http = HttpTransport::new(
            self.rpc_url.clone(),
            HttpConfig {
                request_timeout: Duration::from_millis(self.request_timeout_ms),
            },
        )?;
        Ok(Arc::new(http))
    }

    pub fn filter_opts(&self, start: u64, end: Option<u64>) -> FilterOpts {
        FilterOpts {
            start,
            end,
            max_block_range: self.max_block_range,
        }
    }

    pub fn watch_opts(&self, start: Option<u64>) -> WatchOpts {
        WatchOpts {
            start,
            poll_interval: self.poll_interval(),
            max_block_range: self.max_block_range,
        }
    }

    /// Load the artifact for `contract` from `artifacts_dir`.
    pub fn artifact(&self, contract: &str) -> Result<Artifact, BindError> {
        let dir = self
            .artifacts_dir
            .as_deref()
            .ok_or_else(|| BindError::Config("artifacts_dir is not set".into()))?;
        Artifact::load(dir, contract)
    }

    /// Creation bytecode of `contract` from `artifacts_dir`.
    pub fn bytecode(&self, contract: &str) -> Result<Bytecode, BindError> {
        self.artifact(contract)?.bytecode()
    }
}
