//! Group configuration.

use plume_particle::StoreConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a particle group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    /// Sizing policy of the group's particle store.
    pub store: StoreConfig,
    /// Whether `update` ages particles and snapshots `last_position` /
    /// `last_velocity` during compaction.
    pub apply_time_step: bool,
}

impl GroupConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the number of particle slots allocated up front.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.store.initial_capacity = capacity;
        self
    }

    /// Override the store growth multiplier.
    #[must_use]
    pub fn with_growth_factor(mut self, factor: f32) -> Self {
        self.store.growth_factor = factor;
        self
    }

    /// Enable or disable the per-update time step.
    #[must_use]
    pub fn with_time_step(mut self, enabled: bool) -> Self {
        self.apply_time_step = enabled;
        self
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            apply_time_step: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let config = GroupConfig::new()
            .with_initial_capacity(16)
            .with_growth_factor(3.0)
            .with_time_step(false);
        assert_eq!(config.store.initial_capacity, 16);
        assert_eq!(config.store.growth_factor, 3.0);
        assert!(!config.apply_time_step);
    }

    #[test]
    fn test_deserialise_partial_config() {
        let config: GroupConfig =
            serde_json::from_str(r#"{ "store": { "growth_factor": 4.0 } }"#).unwrap();
        assert_eq!(config.store.growth_factor, 4.0);
        assert_eq!(config.store.initial_capacity, 100);
        assert!(config.apply_time_step);
    }
}
