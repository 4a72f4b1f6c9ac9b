/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
///
/// Unlike a free-running accumulator, leftover whole steps beyond
/// `max_steps` are dropped: only the sub-step remainder carries over to the
/// next frame, so a long stall never replays as a burst of catch-up ticks.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Upper bound on ticks executed for a single frame.
    max_steps: u32,
    /// Accumulator cap, expressed in ticks.
    catch_up: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self::with_limits(dt, 1, 5)
    }

    pub fn with_limits(dt: f32, max_steps: u32, catch_up: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
            catch_up: catch_up.max(1),
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.dt * self.catch_up as f32);
        let steps = ((self.accumulator / self.dt) as u32).min(self.max_steps);
        if steps == 0 {
            return 0;
        }
        self.accumulator -= steps as f32 * self.dt;
        if steps == self.max_steps {
            self.accumulator %= self.dt;
        }
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }
}
