//! A single growing, branching, fading polyline.
//!
//! An agent extends its polyline by one point per tick until it has
//! traveled its target length, then idles until its lifespan runs out and
//! fades to transparent. While growing it may propose a branch, returned as
//! an [`AgentSeed`] for the simulation to turn into a new agent.

use glam::Vec2;
use rand::Rng;

use crate::{
    config::GrowthConfig,
    noise,
    surface::RenderSurface,
    types::{PathId, Point},
};

/// Where and how a new agent starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSeed {
    pub origin: Point,
    /// Base growth angle in radians.
    pub angle: f32,
    /// Traveled length per tick.
    pub speed: f32,
    /// Branching generation; 0 for roots.
    pub depth: u32,
}

/// Per-agent randomized parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentTraits {
    pub max_length: f32,
    /// Noise phase offset.
    pub phase: f32,
    /// Age in ticks after which the agent starts fading.
    pub lifespan: f32,
}

impl AgentTraits {
    pub fn random(cfg: &GrowthConfig, rng: &mut impl Rng) -> Self {
        Self {
            max_length: rng.random_range(cfg.max_length_range.clone()),
            phase: rng.random_range(cfg.phase_range.clone()),
            lifespan: rng.random_range(cfg.lifespan_range.clone()),
        }
    }
}

/// Lifecycle state, derived from an agent's fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentState {
    Growing,
    Idle,
    Fading,
    Dead,
}

/// Opacity of an agent of the given age.
///
/// Fully opaque up to `lifespan`, then linear decay to zero over
/// `fade_ticks` ticks.
pub fn fade_opacity(age: u32, lifespan: f32, fade_ticks: f32) -> f32 {
    let over = age as f32 - lifespan;
    if over <= 0.0 {
        return 1.0;
    }
    (1.0 - over / fade_ticks).max(0.0)
}

/// One polyline of the drawing, from its first point until it has faded out.
///
/// The agent owns the [`PathId`] it draws into; the handle goes back to the
/// surface through [`GrowthAgent::into_path`] once the agent is swept.
/// Points are only ever appended, and the traveled length is clamped to
/// the target so it never overshoots.
#[derive(Debug)]
pub struct GrowthAgent {
    angle: f32,
    speed: f32,
    points: Vec<Point>,
    length: f32,
    max_length: f32,
    phase: f32,
    time: f32,
    depth: u32,
    age: u32,
    lifespan: f32,
    opacity: f32,
    dead: bool,
    path: PathId,
}

impl GrowthAgent {
    /// Builds an agent from explicit parameters around an existing path.
    ///
    /// ### Parameters
    /// - `seed` - Start point, base angle, speed and depth.
    /// - `traits` - Target length, noise phase and lifespan.
    /// - `path` - Handle of an empty path the agent will draw into.
    pub fn new(seed: AgentSeed, traits: AgentTraits, path: PathId) -> Self {
        Self {
            angle: seed.angle,
            speed: seed.speed,
            points: vec![seed.origin],
            length: 0.0,
            max_length: traits.max_length,
            phase: traits.phase,
            time: 0.0,
            depth: seed.depth,
            age: 0,
            lifespan: traits.lifespan,
            opacity: 1.0,
            dead: false,
            path,
        }
    }

    /// Builds an agent with random traits and a fresh path on `surface`.
    ///
    /// ### Parameters
    /// - `seed` - Start point, base angle, speed and depth.
    /// - `cfg` - Ranges the traits are drawn from.
    /// - `rng` - Random source for the traits.
    /// - `surface` - Surface the new path is created on.
    pub fn spawn<S: RenderSurface + ?Sized>(
        seed: AgentSeed,
        cfg: &GrowthConfig,
        rng: &mut impl Rng,
        surface: &mut S,
    ) -> Self {
        let traits = AgentTraits::random(cfg, rng);
        Self::new(seed, traits, surface.create_path())
    }

    /// Base growth angle in radians, before wander.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Traveled length added per growing tick.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// The polyline so far, starting at the origin.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Last point of the polyline.
    pub fn tip(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Distance traveled so far; never exceeds [`Self::max_length`].
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Traveled length at which the agent stops growing.
    pub fn max_length(&self) -> f32 {
        self.max_length
    }

    /// Branching generation; 0 for roots.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Ticks since the agent was created.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Age after which the agent starts fading.
    pub fn lifespan(&self) -> f32 {
        self.lifespan
    }

    /// Current opacity in `[0, 1]`, as last written to the path.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn path(&self) -> &PathId {
        &self.path
    }

    pub fn is_growing(&self) -> bool {
        self.length < self.max_length
    }

    /// Whether the fade has completed and the agent awaits removal.
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// A depth-0 agent that is still extending.
    pub fn is_active_root(&self) -> bool {
        self.depth == 0 && self.is_growing()
    }

    /// Lifecycle state derived from length, age and the dead flag.
    ///
    /// Fading takes precedence over growing: an agent whose lifespan runs
    /// out before it reaches its target length keeps extending while it
    /// fades.
    pub fn state(&self) -> AgentState {
        if self.dead {
            AgentState::Dead
        } else if self.age as f32 > self.lifespan {
            AgentState::Fading
        } else if self.is_growing() {
            AgentState::Growing
        } else {
            AgentState::Idle
        }
    }

    /// Advances the agent by one tick and writes its new look to `surface`.
    ///
    /// A growing agent steps `cfg.step_distance` along its wandering
    /// heading and may propose a branch. Every live agent then ages by one
    /// tick; past its lifespan its opacity decays and is written to the
    /// path. The polyline is written only on ticks that extended it.
    ///
    /// ### Parameters
    /// - `cfg` - Growth, branching and fade constants.
    /// - `rng` - Random source for the branching draw and branch angle.
    /// - `surface` - Surface holding the agent's path.
    ///
    /// ### Returns
    /// - `Some(seed)` if the agent branched this tick; the caller decides
    ///   whether and when the seed becomes an agent.
    /// - `None` otherwise, and always once the agent is dead.
    pub fn update<S: RenderSurface + ?Sized>(
        &mut self,
        cfg: &GrowthConfig,
        rng: &mut impl Rng,
        surface: &mut S,
    ) -> Option<AgentSeed> {
        if self.dead {
            return None;
        }

        let mut branch = None;

        if self.is_growing() {
            self.length = (self.length + self.speed).min(self.max_length);
            self.time += cfg.time_step;

            let heading = self.angle + noise::wander(self.time, self.phase);
            let tip = self.tip() + Vec2::from_angle(heading) * cfg.step_distance;
            self.points.push(tip);
            surface.append_geometry(&self.path, &self.points);

            if self.length > cfg.branch_min_length
                && self.depth < cfg.max_depth
                && rng.random_bool(cfg.branch_probability.clamp(0.0, 1.0))
            {
                branch = Some(self.branch_seed(tip, cfg, rng));
            }
        }

        self.age = self.age.saturating_add(1);
        if self.age as f32 > self.lifespan {
            self.opacity = fade_opacity(self.age, self.lifespan, cfg.fade_ticks).min(self.opacity);
            surface.set_opacity(&self.path, self.opacity);
            if self.opacity <= 0.0 {
                self.dead = true;
            }
        }

        branch
    }

    fn branch_seed(&self, origin: Point, cfg: &GrowthConfig, rng: &mut impl Rng) -> AgentSeed {
        let offset = (rng.random::<f32>() - 0.5) * cfg.branch_spread;
        AgentSeed {
            origin,
            angle: self.angle + offset,
            speed: self.speed,
            depth: self.depth + 1,
        }
    }

    /// Gives up the agent, handing back its path for release.
    pub fn into_path(self) -> PathId {
        self.path
    }
}
