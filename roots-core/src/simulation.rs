//! The population of growth agents and the surface they draw on.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, trace};

use crate::{
    agent::{AgentSeed, GrowthAgent},
    clock::Clock,
    config::GrowthConfig,
    phases,
    surface::RenderSurface,
    types::Point,
};

/// What happened during one [`Simulation::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Branch agents created from seeds staged this tick.
    pub branched: usize,
    /// Agents removed because they finished fading.
    pub died: usize,
    /// Whether a new root was spawned.
    pub root_spawned: bool,
}

/// Owns the live agents together with the render surface, random source
/// and clock they depend on.
///
/// All roots of a run grow from the same origin, chosen at construction and
/// on [`Simulation::reset`].
pub struct Simulation<S, R, C> {
    cfg: GrowthConfig,
    agents: Vec<GrowthAgent>,
    surface: S,
    rng: R,
    clock: C,
    origin: Point,
    last_spawn: Duration,
    ticks: u64,
}

impl<S: RenderSurface, R: Rng, C: Clock> Simulation<S, R, C> {
    /// Creates a simulation with `cfg.initial_roots` roots at a random origin.
    pub fn new(cfg: GrowthConfig, surface: S, mut rng: R, clock: C) -> Self {
        let origin = random_origin(&cfg, &mut rng);
        let last_spawn = clock.now();
        let mut sim = Self {
            cfg,
            agents: Vec::new(),
            surface,
            rng,
            clock,
            origin,
            last_spawn,
            ticks: 0,
        };
        sim.seed_roots();
        sim
    }

    /// Advances every agent by one tick and maintains the root population.
    pub fn tick(&mut self) -> TickReport {
        let seeds = phases::growth_phase(
            &mut self.agents,
            &self.cfg,
            &mut self.rng,
            &mut self.surface,
        );
        let branched = phases::spawn_phase(
            &mut self.agents,
            seeds,
            &self.cfg,
            &mut self.rng,
            &mut self.surface,
        );
        let died = phases::sweep_phase(&mut self.agents, &mut self.surface);
        let root_spawned = self.replenish_roots();

        self.ticks += 1;
        trace!(
            tick = self.ticks,
            agents = self.agents.len(),
            branched,
            died,
            "tick complete"
        );

        TickReport {
            branched,
            died,
            root_spawned,
        }
    }

    /// Releases every path and starts over from a new random origin.
    pub fn reset(&mut self) {
        for agent in self.agents.drain(..) {
            self.surface.remove_path(agent.into_path());
        }
        self.origin = random_origin(&self.cfg, &mut self.rng);
        self.last_spawn = self.clock.now();
        self.ticks = 0;
        self.seed_roots();
    }

    pub fn agents(&self) -> &[GrowthAgent] {
        &self.agents
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &GrowthConfig {
        &self.cfg
    }

    /// Point every root of this run grows from.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Ticks since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn active_roots(&self) -> usize {
        phases::count_active_roots(&self.agents)
    }

    fn seed_roots(&mut self) {
        for _ in 0..self.cfg.initial_roots {
            self.spawn_root();
        }
        debug!(
            x = self.origin.x,
            y = self.origin.y,
            roots = self.cfg.initial_roots,
            "simulation seeded"
        );
    }

    /// Spawns a root when none is growing, or when the cooldown has passed
    /// and fewer than `min_active_roots` are growing.
    fn replenish_roots(&mut self) -> bool {
        let active = phases::count_active_roots(&self.agents);
        let now = self.clock.now();
        let cooled_down = now.saturating_sub(self.last_spawn) > self.cfg.spawn_interval;

        if active == 0 || (cooled_down && active < self.cfg.min_active_roots) {
            self.spawn_root();
            self.last_spawn = now;
            debug!(tick = self.ticks, active, "spawned root");
            true
        } else {
            false
        }
    }

    fn spawn_root(&mut self) {
        let seed = AgentSeed {
            origin: self.origin,
            angle: self.rng.random_range(0.0..std::f32::consts::TAU),
            speed: self.rng.random_range(self.cfg.speed_range.clone()),
            depth: 0,
        };
        let agent = GrowthAgent::spawn(seed, &self.cfg, &mut self.rng, &mut self.surface);
        self.agents.push(agent);
    }
}

fn random_origin(cfg: &GrowthConfig, rng: &mut impl Rng) -> Point {
    Point::new(
        rng.random_range(cfg.origin_range.clone()),
        rng.random_range(cfg.origin_range.clone()),
    )
}
