use glam::Vec2;

/// A position in the normalized drawing space (0–100 on each axis).
pub type Point = Vec2;

/// Handle to a drawable path on a [`crate::surface::RenderSurface`].
///
/// The handle is not `Clone`: exactly one agent holds it for
/// its whole lifetime, and releasing the path consumes the handle via
/// [`crate::surface::RenderSurface::remove_path`].
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathId(pub(crate) u64);

impl PathId {
    /// Raw numeric value of the handle, stable for the surface's lifetime.
    pub fn raw(&self) -> u64 {
        self.0
    }
}
