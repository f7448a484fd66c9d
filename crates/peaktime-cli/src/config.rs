//! TOML analysis configuration.
//!
//! Optional config file with a `[policy]` table and a top-level `seed`;
//! command-line flags override file values.
//!
//! ```toml
//! seed = 42
//!
//! [policy]
//! num_peaks = 3
//! min_spacing_hours = 3
//! default_hours = [9, 14, 19]
//! ```

use std::error::Error;
use std::fs;
use std::path::Path;

use peaktime_core::SelectorPolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub policy: SelectorPolicy,
    /// Seed for the random baseline; None draws from entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let config = toml::from_str(&content)
            .map_err(|e| format!("invalid config {}: {e}", path.display()))?;
        Ok(config)
    }
}
