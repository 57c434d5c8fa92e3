//! A renderer that reports the group through `tracing` instead of drawing.

use plume_group::{BoxError, Group, Renderer};
use tracing::{debug, info};

/// Logs a summary each frame, and at `info` once per `every` frames.
#[derive(Debug)]
pub struct LogRenderer {
    frames: u64,
    every: u64,
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self {
            frames: 0,
            every: 60,
        }
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, group: &Group) -> Result<(), BoxError> {
        self.frames += 1;
        let (count, height) = group
            .alive_records()
            .fold((0usize, 0.0f32), |(n, y), p| (n + 1, y.max(p.position.y)));

        debug!(
            frame = self.frames,
            particles = count,
            peak = height,
            killed = group.killed_count(),
            "frame drawn"
        );
        if self.frames % self.every == 0 {
            info!(
                frame = self.frames,
                particles = count,
                capacity = group.capacity(),
                "fountain status"
            );
        }
        Ok(())
    }
}
