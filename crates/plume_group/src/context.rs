//! Explicit resolution of the default particle system.
//!
//! Groups built through a [`ParticleContext`] register with the context's
//! default system unless told otherwise. There is no process-wide default:
//! the host owns the context and passes it where groups are created.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::GroupConfig;
use crate::group::{Group, GroupBuilder};
use crate::system::{ControllerRegistry, SharedSystem};

/// Holds the default particle system and group configuration for a host.
pub struct ParticleContext {
    /// System new groups register with unless overridden.
    default_system: SharedSystem,
    /// Configuration applied to new groups unless overridden.
    config: GroupConfig,
}

impl ParticleContext {
    /// Create a context whose groups register with `default_system`.
    #[must_use]
    pub fn new(default_system: SharedSystem) -> Self {
        Self {
            default_system,
            config: GroupConfig::default(),
        }
    }

    /// Override the configuration given to new groups.
    #[must_use]
    pub fn with_config(mut self, config: GroupConfig) -> Self {
        self.config = config;
        self
    }

    /// The default particle system.
    #[must_use]
    pub fn default_system(&self) -> &SharedSystem {
        &self.default_system
    }

    /// The configuration given to new groups.
    #[must_use]
    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    /// Start building a group bound to the default system.
    pub fn group(&self) -> GroupBuilder {
        Group::builder()
            .config(self.config.clone())
            .system(Rc::clone(&self.default_system))
    }
}

impl Default for ParticleContext {
    /// A context whose default system is an empty [`ControllerRegistry`].
    fn default() -> Self {
        Self::new(Rc::new(RefCell::new(ControllerRegistry::new())))
    }
}

impl std::fmt::Debug for ParticleContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
