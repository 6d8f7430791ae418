//! Monitor configuration.

use serde::{Deserialize, Serialize};

/// Default for [`MonitorConfig::enable_liveness_checker`].
const DEFAULT_ENABLE_LIVENESS_CHECKER: bool = true;

/// Runtime configuration for the verification engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Whether verified and diverging checkpoints are recorded on the
    /// checklist for the liveness checker. When disabled the checklist is
    /// never written.
    #[serde(default = "default_enable_liveness_checker")]
    pub enable_liveness_checker: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enable_liveness_checker: DEFAULT_ENABLE_LIVENESS_CHECKER,
        }
    }
}

fn default_enable_liveness_checker() -> bool {
    DEFAULT_ENABLE_LIVENESS_CHECKER
}
