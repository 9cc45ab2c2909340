//! Vector drawing target the agents write their polylines into.
//!
//! [`RenderSurface`] is the seam between the simulation and whatever
//! displays it. [`SvgSurface`] is a retained implementation: it keeps the
//! current geometry and opacity of every live path, which a viewer can
//! paint each frame and which can be serialized as an SVG document.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::types::{PathId, Point};

/// A persistent surface of stroked polylines in normalized coordinates.
pub trait RenderSurface {
    /// Creates an empty, fully opaque path and returns its handle.
    fn create_path(&mut self) -> PathId;

    /// Replaces the geometry of `path` with a polyline through `points`.
    fn set_geometry(&mut self, path: &PathId, points: &[Point]);

    /// Writes a polyline that extends the one last written to `path`.
    ///
    /// `points` must start with every point previously written; only the
    /// tail is new. Surfaces that retain geometry can copy just that tail.
    /// The default replaces the whole polyline.
    fn append_geometry(&mut self, path: &PathId, points: &[Point]) {
        self.set_geometry(path, points);
    }

    /// Sets the opacity of `path`; values are clamped to `[0, 1]`.
    fn set_opacity(&mut self, path: &PathId, opacity: f32);

    /// Destroys `path` and frees its resources.
    fn remove_path(&mut self, path: PathId);
}

/// Geometry and opacity of one path as last written.
#[derive(Clone, Debug, PartialEq)]
pub struct PathEntry {
    /// Points rounded to one decimal place.
    pub points: Vec<Point>,
    pub opacity: f32,
}

impl PathEntry {
    /// The SVG `d` attribute for this path, e.g. `M 50.0 50.0 L 50.3 50.0`.
    ///
    /// Empty while the path has no points.
    pub fn path_data(&self) -> String {
        let mut d = String::with_capacity(self.points.len() * 12);
        for (i, p) in self.points.iter().enumerate() {
            let cmd = if i == 0 { "M" } else { " L" };
            let _ = write!(d, "{cmd} {:.1} {:.1}", p.x, p.y);
        }
        d
    }
}

/// Retained render surface that can be serialized as SVG.
#[derive(Debug)]
pub struct SvgSurface {
    size: f32,
    stroke_width: f32,
    paths: BTreeMap<u64, PathEntry>,
    next_id: u64,
}

impl SvgSurface {
    /// Creates an empty surface with a `size`×`size` view box.
    pub fn new(size: f32, stroke_width: f32) -> Self {
        Self {
            size,
            stroke_width,
            paths: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Number of live paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, path: &PathId) -> Option<&PathEntry> {
        self.paths.get(&path.0)
    }

    /// Live paths in creation order, which is also paint order.
    pub fn paths(&self) -> impl Iterator<Item = &PathEntry> {
        self.paths.values()
    }

    /// Serializes the surface as a standalone SVG document.
    ///
    /// Paths with no geometry yet are skipped.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {s} {s}" preserveAspectRatio="xMidYMid slice" shape-rendering="geometricPrecision">"#,
            s = self.size
        );
        for entry in self.paths.values().filter(|e| e.points.len() > 1) {
            let _ = writeln!(
                out,
                r##"  <path d="{}" stroke="#000000" stroke-width="{}" fill="none" stroke-linecap="round" opacity="{}"/>"##,
                entry.path_data(),
                self.stroke_width,
                entry.opacity
            );
        }
        out.push_str("</svg>\n");
        out
    }
}

fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

impl RenderSurface for SvgSurface {
    fn create_path(&mut self) -> PathId {
        let id = self.next_id;
        self.next_id += 1;
        self.paths.insert(
            id,
            PathEntry {
                points: Vec::new(),
                opacity: 1.0,
            },
        );
        PathId(id)
    }

    fn set_geometry(&mut self, path: &PathId, points: &[Point]) {
        if let Some(entry) = self.paths.get_mut(&path.0) {
            entry.points.clear();
            entry
                .points
                .extend(points.iter().map(|p| Point::new(round1(p.x), round1(p.y))));
        }
    }

    fn append_geometry(&mut self, path: &PathId, points: &[Point]) {
        if let Some(entry) = self.paths.get_mut(&path.0) {
            let drawn = entry.points.len().min(points.len());
            entry
                .points
                .extend(points[drawn..].iter().map(|p| Point::new(round1(p.x), round1(p.y))));
        }
    }

    fn set_opacity(&mut self, path: &PathId, opacity: f32) {
        if let Some(entry) = self.paths.get_mut(&path.0) {
            entry.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn remove_path(&mut self, path: PathId) {
        self.paths.remove(&path.0);
    }
}
