//! Per-tick phases of the population update.
//!
//! A tick runs, in order:
//! 1. [`growth_phase`]: every agent present at the start of the tick is
//!    updated once; the branch seeds they return are collected.
//! 2. [`spawn_phase`]: the collected seeds become new agents. They are
//!    first updated on the following tick.
//! 3. [`sweep_phase`]: dead agents are removed and their paths released.
//!
//! Root replenishment depends on the spawn cooldown and lives in
//! [`crate::simulation::Simulation::tick`].

use rand::Rng;
use tracing::debug;

use crate::{
    agent::{AgentSeed, GrowthAgent},
    config::GrowthConfig,
    surface::RenderSurface,
};

/// Updates every agent once and returns the branch seeds they produced.
///
/// Seeds are only collected here, so agents created from them are not
/// updated during the tick that produced them.
///
/// ### Parameters
/// - `agents` - Agents present at the start of the tick.
/// - `cfg` - Growth, branching and fade constants.
/// - `rng` - Random source shared by every agent's update.
/// - `surface` - Surface the agents write their paths to.
///
/// ### Returns
/// The staged branch seeds, in agent order.
pub fn growth_phase<S: RenderSurface + ?Sized>(
    agents: &mut [GrowthAgent],
    cfg: &GrowthConfig,
    rng: &mut impl Rng,
    surface: &mut S,
) -> Vec<AgentSeed> {
    let mut seeds = Vec::new();
    for agent in agents.iter_mut() {
        if let Some(seed) = agent.update(cfg, rng, surface) {
            seeds.push(seed);
        }
    }
    seeds
}

/// Turns staged seeds into agents appended to `agents`.
///
/// Seeds deeper than `cfg.max_depth` are discarded, as are seeds that would
/// grow the population past `cfg.max_population`.
///
/// ### Parameters
/// - `agents` - The population; new agents are appended at the end.
/// - `seeds` - Seeds staged by [`growth_phase`].
/// - `cfg` - Depth and population caps, and the trait ranges.
/// - `rng` - Random source for the new agents' traits.
/// - `surface` - Surface the new paths are created on.
///
/// ### Returns
/// The number of agents created.
pub fn spawn_phase<S: RenderSurface + ?Sized>(
    agents: &mut Vec<GrowthAgent>,
    seeds: Vec<AgentSeed>,
    cfg: &GrowthConfig,
    rng: &mut impl Rng,
    surface: &mut S,
) -> usize {
    let room = cfg.max_population.saturating_sub(agents.len());
    let staged = seeds.len();

    let before = agents.len();
    for seed in seeds
        .into_iter()
        .filter(|s| s.depth <= cfg.max_depth)
        .take(room)
    {
        debug!(
            depth = seed.depth,
            x = seed.origin.x,
            y = seed.origin.y,
            "spawned branch"
        );
        agents.push(GrowthAgent::spawn(seed, cfg, rng, surface));
    }
    let spawned = agents.len() - before;

    if spawned < staged {
        debug!(staged, spawned, "dropped branch seeds");
    }
    spawned
}

/// Removes dead agents and releases their paths.
///
/// Relative order of the survivors is kept.
///
/// ### Parameters
/// - `agents` - The population to sweep.
/// - `surface` - Surface the released paths are removed from.
///
/// ### Returns
/// The number of agents removed.
pub fn sweep_phase<S: RenderSurface + ?Sized>(
    agents: &mut Vec<GrowthAgent>,
    surface: &mut S,
) -> usize {
    if !agents.iter().any(GrowthAgent::is_dead) {
        return 0;
    }

    let (dead, live): (Vec<_>, Vec<_>) = std::mem::take(agents)
        .into_iter()
        .partition(GrowthAgent::is_dead);
    *agents = live;

    let removed = dead.len();
    for agent in dead {
        debug!(depth = agent.depth(), age = agent.age(), "agent died");
        surface.remove_path(agent.into_path());
    }
    removed
}

/// Number of depth-0 agents that are still growing.
pub fn count_active_roots(agents: &[GrowthAgent]) -> usize {
    agents.iter().filter(|a| a.is_active_root()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{agent::AgentTraits, surface::SvgSurface, types::Point};
    use rand::{SeedableRng, rngs::StdRng};

    fn seed(depth: u32) -> AgentSeed {
        AgentSeed {
            origin: Point::new(40.0, 60.0),
            angle: 0.5,
            speed: 0.02,
            depth,
        }
    }

    fn agent(
        surface: &mut SvgSurface,
        depth: u32,
        max_length: f32,
        lifespan: f32,
    ) -> GrowthAgent {
        let traits = AgentTraits {
            max_length,
            phase: 1.0,
            lifespan,
        };
        GrowthAgent::new(seed(depth), traits, surface.create_path())
    }

    #[test]
    fn growth_phase_updates_each_agent_once() {
        let cfg = GrowthConfig {
            branch_probability: 0.0,
            ..GrowthConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut surface = SvgSurface::new(100.0, 0.2);
        let mut agents = vec![
            agent(&mut surface, 0, 20.0, 800.0),
            agent(&mut surface, 1, 20.0, 800.0),
        ];

        let seeds = growth_phase(&mut agents, &cfg, &mut rng, &mut surface);

        assert!(seeds.is_empty());
        assert!(agents.iter().all(|a| a.age() == 1 && a.points().len() == 2));
    }

    #[test]
    fn growth_phase_collects_branch_seeds() {
        let cfg = GrowthConfig {
            branch_probability: 1.0,
            branch_min_length: 0.0,
            ..GrowthConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let mut surface = SvgSurface::new(100.0, 0.2);
        let mut agents = vec![
            agent(&mut surface, 0, 20.0, 800.0),
            agent(&mut surface, cfg.max_depth, 20.0, 800.0),
        ];

        let seeds = growth_phase(&mut agents, &cfg, &mut rng, &mut surface);

        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].depth, 1);
        // Staging only; the population is untouched.
        assert_eq!(agents.len(), 2);
    }

    #[test]
    fn spawn_phase_appends_fresh_agents_with_own_paths() {
        let cfg = GrowthConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut surface = SvgSurface::new(100.0, 0.2);
        let mut agents = vec![agent(&mut surface, 0, 20.0, 800.0)];

        let spawned = spawn_phase(
            &mut agents,
            vec![seed(1), seed(2)],
            &cfg,
            &mut rng,
            &mut surface,
        );

        assert_eq!(spawned, 2);
        assert_eq!(agents.len(), 3);
        assert_eq!(surface.len(), 3);
        let child = &agents[1];
        assert_eq!(child.depth(), 1);
        assert_eq!(child.age(), 0);
        assert_eq!(child.length(), 0.0);
        assert_eq!(child.points(), &[Point::new(40.0, 60.0)]);
    }

    #[test]
    fn spawn_phase_rejects_seeds_past_max_depth() {
        let cfg = GrowthConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut surface = SvgSurface::new(100.0, 0.2);
        let mut agents = Vec::new();

        let spawned = spawn_phase(
            &mut agents,
            vec![seed(cfg.max_depth + 1)],
            &cfg,
            &mut rng,
            &mut surface,
        );

        assert_eq!(spawned, 0);
        assert!(agents.is_empty());
        assert!(surface.is_empty());
    }

    #[test]
    fn spawn_phase_respects_population_cap() {
        let cfg = GrowthConfig {
            max_population: 2,
            ..GrowthConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut surface = SvgSurface::new(100.0, 0.2);
        let mut agents = vec![agent(&mut surface, 0, 20.0, 800.0)];

        let spawned = spawn_phase(
            &mut agents,
            vec![seed(1), seed(1), seed(1)],
            &cfg,
            &mut rng,
            &mut surface,
        );

        assert_eq!(spawned, 1);
        assert_eq!(agents.len(), 2);
    }

    #[test]
    fn sweep_phase_removes_dead_and_releases_paths() {
        let cfg = GrowthConfig {
            branch_probability: 0.0,
            ..GrowthConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(6);
        let mut surface = SvgSurface::new(100.0, 0.2);
        // Lifespan 0 with a one-tick fade dies on its first update.
        let short_lived = GrowthConfig {
            fade_ticks: 1.0,
            ..cfg.clone()
        };
        let mut agents = vec![
            agent(&mut surface, 0, 20.0, 800.0),
            agent(&mut surface, 1, 20.0, 0.0),
            agent(&mut surface, 2, 20.0, 800.0),
        ];
        growth_phase(&mut agents, &short_lived, &mut rng, &mut surface);
        assert!(agents[1].is_dead());

        let removed = sweep_phase(&mut agents, &mut surface);

        assert_eq!(removed, 1);
        assert_eq!(agents.len(), 2);
        assert_eq!(surface.len(), 2);
        assert_eq!(agents[0].depth(), 0);
        assert_eq!(agents[1].depth(), 2);
        assert!(agents.iter().all(|a| !a.is_dead()));
    }

    #[test]
    fn sweep_phase_without_dead_agents_is_a_no_op() {
        let mut surface = SvgSurface::new(100.0, 0.2);
        let mut agents = vec![agent(&mut surface, 0, 20.0, 800.0)];

        assert_eq!(sweep_phase(&mut agents, &mut surface), 0);
        assert_eq!(agents.len(), 1);
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn count_active_roots_ignores_branches_and_grown_roots() {
        let cfg = GrowthConfig {
            branch_probability: 0.0,
            ..GrowthConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let mut surface = SvgSurface::new(100.0, 0.2);
        let mut agents = vec![
            agent(&mut surface, 0, 20.0, 800.0),
            agent(&mut surface, 0, 0.01, 800.0),
            agent(&mut surface, 1, 20.0, 800.0),
        ];
        assert_eq!(count_active_roots(&agents), 2);

        // The second root reaches its length in a single tick.
        growth_phase(&mut agents, &cfg, &mut rng, &mut surface);

        assert_eq!(count_active_roots(&agents), 1);
    }
}
