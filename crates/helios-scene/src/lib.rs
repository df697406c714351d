//! Orbit scene model for the Helios orrery.
//!
//! Owns the table of celestial bodies and orbit-path guides, and the
//! per-frame update rule that advances each body's spin and orbital
//! position as a pure function of elapsed time. Rendering, camera control,
//! and asset resolution are collaborators that consume this state.

mod body;
mod catalog;
mod error;
mod scene;

pub use body::{BodyRing, BodySpec, CelestialBody, Shading};
pub use catalog::solar_system;
pub use error::SceneError;
pub use scene::{
    CameraLimits, ORBIT_GUIDE_WIDTH, ORBIT_SPEED_SCALE, OrbitRing, ROTATION_STEP, Scene,
    SceneConfig,
};
