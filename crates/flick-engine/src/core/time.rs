/// Turns variable frame times into a whole number of fixed ticks.
///
/// Leftover time carries into the next frame. A long stall (tab in the
/// background) runs at most [`Self::MAX_STEPS_PER_FRAME`] ticks and drops
/// the rest instead of fast-forwarding the table.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    carry: f32,
}

impl FixedTimestep {
    pub const MAX_STEPS_PER_FRAME: u32 = 10;

    /// `dt` is seconds per tick.
    pub fn new(dt: f32) -> Self {
        Self { dt, carry: 0.0 }
    }

    pub fn from_hz(hz: f32) -> Self {
        Self::new(1.0 / hz)
    }

    /// Add one frame's elapsed seconds; returns how many ticks to run now.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        let budget = self.dt * Self::MAX_STEPS_PER_FRAME as f32;
        let pending = self.carry + frame_dt.max(0.0);
        if pending > budget {
            let dropped = pending - budget;
            log::debug!("frame of {:.3}s over the tick cap, dropping {:.3}s", frame_dt, dropped);
        }
        self.carry = pending.min(budget);
        // Rounding slack so exactly N ticks' worth of time yields N.
        let steps = ((self.carry / self.dt + 1e-4) as u32).min(Self::MAX_STEPS_PER_FRAME);
        self.carry = (self.carry - steps as f32 * self.dt).max(0.0);
        steps
    }

    /// Fraction of a tick left over, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.carry / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_hz_frames_run_two_ticks_at_120_hz() {
        let mut ts = FixedTimestep::from_hz(120.0);
        assert_eq!(ts.accumulate(1.0 / 60.0 + 1e-5), 2);
        assert!((ts.dt() - 1.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn short_frames_carry_over() {
        let mut ts = FixedTimestep::from_hz(120.0);
        assert_eq!(ts.accumulate(0.005), 0);
        assert!(ts.alpha() > 0.5 && ts.alpha() < 0.7);
        assert_eq!(ts.accumulate(0.005), 1);
    }

    #[test]
    fn stall_is_capped() {
        let mut ts = FixedTimestep::from_hz(120.0);
        assert_eq!(ts.accumulate(2.0), FixedTimestep::MAX_STEPS_PER_FRAME);
        assert_eq!(ts.accumulate(0.0), 0);
    }

    #[test]
    fn negative_frame_time_counts_as_zero() {
        let mut ts = FixedTimestep::from_hz(120.0);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.alpha(), 0.0);
    }
}
