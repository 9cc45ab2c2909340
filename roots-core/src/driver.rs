//! Frame-driven loop that keeps a [`Simulation`] ticking.
//!
//! The host decides when frames happen. It calls [`Driver::frame`] from its
//! per-frame callback, and the driver asks for the next frame through a
//! [`FrameScheduler`]. Nothing ever stops the loop; it ends when the host
//! stops delivering frames.

use rand::Rng;

use crate::{
    clock::Clock,
    simulation::{Simulation, TickReport},
    surface::RenderSurface,
};

/// Host primitive that runs the frame callback again before the next
/// repaint.
pub trait FrameScheduler {
    fn schedule_frame(&mut self);
}

pub struct Driver<S, R, C> {
    sim: Simulation<S, R, C>,
    frames: u64,
}

impl<S: RenderSurface, R: Rng, C: Clock> Driver<S, R, C> {
    pub fn new(sim: Simulation<S, R, C>) -> Self {
        Self { sim, frames: 0 }
    }

    /// Runs the first frame, which schedules every later one.
    pub fn start<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) -> TickReport {
        self.frame(scheduler)
    }

    /// Ticks the simulation exactly once and requests the next frame.
    pub fn frame<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) -> TickReport {
        let report = self.sim.tick();
        self.frames += 1;
        scheduler.schedule_frame();
        report
    }

    pub fn simulation(&self) -> &Simulation<S, R, C> {
        &self.sim
    }

    /// Frames delivered since the driver was created.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::ManualClock, config::GrowthConfig, surface::SvgSurface};
    use rand::{SeedableRng, rngs::StdRng};

    /// Delivers queued frames one at a time, like a display refresh.
    #[derive(Default)]
    struct QueueScheduler {
        pending: usize,
        requested: usize,
    }

    impl FrameScheduler for QueueScheduler {
        fn schedule_frame(&mut self) {
            self.pending += 1;
            self.requested += 1;
        }
    }

    fn driver(clock: &ManualClock) -> Driver<SvgSurface, StdRng, &ManualClock> {
        let cfg = GrowthConfig::default();
        let surface = SvgSurface::new(cfg.canvas_size, cfg.stroke_width);
        Driver::new(Simulation::new(cfg, surface, StdRng::seed_from_u64(1), clock))
    }

    #[test]
    fn each_frame_ticks_once_and_reschedules() {
        let clock = ManualClock::new();
        let mut driver = driver(&clock);
        let mut scheduler = QueueScheduler::default();

        driver.start(&mut scheduler);
        assert_eq!(driver.frames(), 1);
        assert_eq!(driver.simulation().ticks(), 1);
        assert_eq!(scheduler.pending, 1);

        // The loop keeps itself alive for as long as frames are delivered.
        for _ in 0..99 {
            assert_eq!(scheduler.pending, 1);
            scheduler.pending -= 1;
            driver.frame(&mut scheduler);
        }

        assert_eq!(driver.frames(), 100);
        assert_eq!(driver.simulation().ticks(), 100);
        assert_eq!(scheduler.requested, 100);
    }

    #[test]
    fn frames_draw_into_the_surface() {
        let clock = ManualClock::new();
        let mut driver = driver(&clock);
        let mut scheduler = QueueScheduler::default();

        driver.start(&mut scheduler);

        let sim = driver.simulation();
        let root = &sim.agents()[0];
        let entry = sim.surface().get(root.path()).unwrap();
        assert_eq!(entry.points.len(), 2);
    }
}
