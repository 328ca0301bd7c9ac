//! Chat behaviour configuration

use serde::Deserialize;

/// Chat configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Report generation failures as a normal reply reading `"Error: ..."`
    /// rather than a 502.
    #[serde(default = "default_degrade")]
    pub degrade_generation_errors: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            degrade_generation_errors: default_degrade(),
        }
    }
}

fn default_degrade() -> bool {
    true
}
