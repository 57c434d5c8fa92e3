//! Fixed-timestep tick loop.
//!
//! Each tick updates the group by the tick duration and then draws it.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, ensure};
use plume_group::{Group, GroupError};
use tracing::{debug, info, warn};

/// Configuration for the tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

/// Drives one particle group.
#[derive(Debug)]
pub struct TickLoop {
    tick_id: u64,
    config: TickConfig,
    group: Group,
}

impl TickLoop {
    #[must_use]
    pub fn new(config: TickConfig, group: Group) -> Self {
        Self {
            tick_id: 0,
            config,
            group,
        }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    #[must_use]
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Run one tick: update the group by `dt` seconds, then draw it.
    pub fn tick(&mut self, dt: f32) -> Result<(), GroupError> {
        self.tick_id += 1;
        debug!(tick_id = self.tick_id, dt, "tick start");
        self.group.update(dt)?;
        self.group.draw()
    }

    /// Run for the configured number of ticks, or until a tick fails.
    ///
    /// # Errors
    ///
    /// Fails without ticking if the tick rate is not a positive finite
    /// number, and stops on the first [`GroupError`].
    pub fn run(&mut self) -> Result<()> {
        let tick_rate = self.config.tick_rate;
        ensure!(
            tick_rate.is_finite() && tick_rate > 0.0,
            "tick rate must be positive, got {tick_rate}"
        );
        let tick_duration = Duration::try_from_secs_f64(1.0 / tick_rate)
            .with_context(|| format!("tick rate {tick_rate} has no representable period"))?;
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            "starting tick loop"
        );

        loop {
            let start = Instant::now();

            self.tick(tick_duration.as_secs_f32())?;

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, "tick loop complete");
                return Ok(());
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.tick_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use plume_group::{BoxError, ParticleTemplate, shared_controller};

    use super::*;

    #[test]
    fn test_tick_advances_counter() {
        let group = Group::builder().build().unwrap();
        let mut tick_loop = TickLoop::new(TickConfig::default(), group);
        assert_eq!(tick_loop.tick_id(), 0);
        tick_loop.tick(1.0 / 60.0).unwrap();
        tick_loop.tick(1.0 / 60.0).unwrap();
        assert_eq!(tick_loop.tick_id(), 2);
        assert_eq!(tick_loop.group().generation(), 2);
    }

    #[test]
    fn test_run_limited_ticks() {
        let spawn = |_dt: f32, group: &mut Group| -> Result<(), BoxError> {
            group.new_particle(&ParticleTemplate::new())?;
            Ok(())
        };
        let group = Group::builder()
            .controller(shared_controller(spawn))
            .build()
            .unwrap();
        let config = TickConfig {
            tick_rate: 1000.0, // fast for testing
            max_ticks: 5,
        };
        let mut tick_loop = TickLoop::new(config, group);
        tick_loop.run().unwrap();
        assert_eq!(tick_loop.tick_id(), 5);
        // The particle staged on the last tick is still pending.
        assert_eq!(tick_loop.group().len(), 4);
        assert_eq!(tick_loop.group().new_count(), 1);
    }

    #[test]
    fn test_run_stops_on_controller_error() {
        let fail = |_dt: f32, _group: &mut Group| -> Result<(), BoxError> { Err("stop".into()) };
        let group = Group::builder()
            .controller(shared_controller(fail))
            .build()
            .unwrap();
        let mut tick_loop = TickLoop::new(TickConfig::default(), group);
        let err = tick_loop.run().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GroupError>(),
            Some(GroupError::Controller(_))
        ));
        assert_eq!(tick_loop.tick_id(), 1);
    }

    #[test]
    fn test_run_rejects_bad_tick_rate() {
        for tick_rate in [0.0, -60.0, f64::NAN] {
            let group = Group::builder().build().unwrap();
            let config = TickConfig {
                tick_rate,
                max_ticks: 1,
            };
            let mut tick_loop = TickLoop::new(config, group);
            assert!(tick_loop.run().is_err());
            assert_eq!(tick_loop.tick_id(), 0);
        }
    }
}
