//! Celestial body descriptors and runtime state.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// How a body's surface responds to the scene light.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shading {
    /// Unlit, full-brightness texture. Used for the self-luminous sun.
    Flat,
    /// Shaded by the scene's light source. Used for all planets.
    Lit,
}

/// A decorative annulus attached to a body, co-moving with it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyRing {
    /// Inner radius in scene units.
    pub inner: f64,
    /// Outer radius in scene units.
    pub outer: f64,
}

/// Static configuration record for one celestial body.
///
/// The scene is built from an ordered table of these; nothing is added or
/// removed after [`Scene::build`](crate::Scene::build).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    /// Unique body name ("sun", "earth", ...).
    pub name: String,
    /// Texture file reference, resolved by the asset collaborator. The
    /// model only ever holds this opaque name, never pixel data.
    pub texture: String,
    /// Render radius in scene units. No physical meaning.
    pub radius: f64,
    /// Distance from the sun at which the circular orbit is computed.
    /// Zero marks the primary body (the sun itself).
    pub orbit_radius: f64,
    /// Per-body multiplier on elapsed time controlling angular velocity
    /// around the sun. Ignored for the primary.
    pub revolution_speed: f64,
    /// Surface shading mode.
    pub shading: Shading,
    /// Optional decorative ring (Saturn carries one).
    #[serde(default)]
    pub ring: Option<BodyRing>,
}

/// Runtime state of a celestial body: its spec plus the two animated
/// degrees of freedom.
///
/// `rotation` (spin about the body's own +Y axis) and orbital position are
/// independent: rotation accumulates per update call, while `position` is
/// recomputed from elapsed time on every call and never accumulated.
#[derive(Clone, Debug)]
pub struct CelestialBody {
    /// The configuration this body was built from.
    pub spec: BodySpec,
    /// Spin about the body's own axis, in radians. Monotonically increasing.
    pub rotation: f64,
    /// Current position in scene units, derived each frame.
    pub position: DVec3,
}

impl CelestialBody {
    /// Whether this body is the primary (the sun, orbit radius 0).
    pub fn is_primary(&self) -> bool {
        self.spec.orbit_radius == 0.0
    }
}
