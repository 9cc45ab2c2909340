use std::ops::RangeInclusive;
use std::time::Duration;

/// Tunable constants of the growth simulation.
///
/// The defaults reproduce the reference look of the drawing: one slow root,
/// sparse branching three generations deep, and a long fade.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthConfig {
    /// Side length of the square view box.
    pub canvas_size: f32,
    /// Range for each axis of the point all roots of a run grow from.
    pub origin_range: RangeInclusive<f32>,
    /// Number of roots spawned when the simulation starts.
    pub initial_roots: usize,

    /// Root speed, in length units per tick.
    pub speed_range: RangeInclusive<f32>,
    pub max_length_range: RangeInclusive<f32>,
    /// Age (in ticks) after which an agent starts fading.
    pub lifespan_range: RangeInclusive<f32>,
    pub phase_range: RangeInclusive<f32>,

    /// Added to an agent's noise clock on every growing tick.
    pub time_step: f32,
    /// Distance between two consecutive points of a polyline.
    pub step_distance: f32,

    /// Traveled length an agent must exceed before it may branch.
    pub branch_min_length: f32,
    pub branch_probability: f64,
    /// Full width of the branch angle offset, centered on the parent angle.
    pub branch_spread: f32,
    pub max_depth: u32,
    /// Branch seeds that would grow the population past this are dropped.
    /// The depth cap alone admits thousands of live agents under the default
    /// branching rate.
    pub max_population: usize,

    /// Ticks between the end of the lifespan and full transparency.
    pub fade_ticks: f32,

    /// Below this many growing roots a new root may be spawned.
    pub min_active_roots: usize,
    /// Cooldown between two root spawns that were not forced.
    pub spawn_interval: Duration,

    pub stroke_width: f32,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            canvas_size: 100.0,
            origin_range: 30.0..=70.0,
            initial_roots: 1,
            speed_range: 0.01..=0.02,
            max_length_range: 15.0..=40.0,
            lifespan_range: 800.0..=1400.0,
            phase_range: 0.0..=1000.0,
            time_step: 0.0005,
            step_distance: 0.3,
            branch_min_length: 2.0,
            branch_probability: 0.08,
            branch_spread: std::f32::consts::PI / 1.5,
            max_depth: 3,
            max_population: 128,
            fade_ticks: 200.0,
            min_active_roots: 1,
            spawn_interval: Duration::from_millis(2000),
            stroke_width: 0.2,
        }
    }
}
