//! Scene assembly and the per-frame advancement rule.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::body::{BodySpec, CelestialBody};
use crate::error::SceneError;

/// Spin added to every body per [`Scene::advance`] call, in radians.
///
/// This is a per-call increment, not a time rate: spin speed tracks the
/// display refresh rate while revolution is time-based. Preserved as a
/// documented property of the scene.
pub const ROTATION_STEP: f64 = 0.005;

/// Converts elapsed milliseconds into orbital radians (before the per-body
/// revolution-speed multiplier). A speed-1 body sweeps 1 radian per second.
pub const ORBIT_SPEED_SCALE: f64 = 0.001;

/// Radial width of the orbit-path guide rings, in scene units.
pub const ORBIT_GUIDE_WIDTH: f64 = 0.1;

/// A purely visual orbit-path guide at a fixed radius around the origin.
/// Stateless after creation, never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitRing {
    /// Ring radius in scene units (equal to some body's orbit radius).
    pub radius: f64,
    /// Radial width of the drawn band.
    pub width: f64,
}

/// Distance bounds the orbit-control camera must stay within.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraLimits {
    /// Closest allowed camera distance from the origin.
    pub min_distance: f64,
    /// Farthest allowed camera distance from the origin.
    pub max_distance: f64,
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            min_distance: 12.0,
            max_distance: 1000.0,
        }
    }
}

impl CameraLimits {
    /// Clamp a requested camera distance into the allowed range.
    pub fn clamp(&self, distance: f64) -> f64 {
        distance.clamp(self.min_distance, self.max_distance)
    }
}

/// Input table for [`Scene::build`]: an ordered list of body records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Bodies in canonical order (primary first, then increasing orbit
    /// radius by convention; the ordering is not enforced).
    pub bodies: Vec<BodySpec>,
}

/// The assembled scene: all bodies, their orbit-path guides, one light
/// pinned to the sun, and the camera distance bounds.
///
/// Built once, then advanced by [`Scene::advance`] every frame. No bodies
/// are added, removed, or resized during a session.
#[derive(Clone, Debug)]
pub struct Scene {
    bodies: Vec<CelestialBody>,
    guides: Vec<OrbitRing>,
    light: DVec3,
    camera_limits: CameraLimits,
    primary: usize,
}

impl Scene {
    /// Validate a body table and assemble the scene.
    ///
    /// Every body starts at orbital angle 0 relative to the positive
    /// x-axis: `position = (sun.x + orbit_radius, sun.y, sun.z)`. One
    /// orbit guide is derived per positive orbit radius. The light source
    /// is placed at the primary's position and is never moved afterwards
    /// (the primary itself never moves, so the pin stays valid).
    pub fn build(config: &SceneConfig) -> Result<Self, SceneError> {
        for spec in &config.bodies {
            if spec.texture.is_empty() {
                return Err(SceneError::MissingTexture {
                    body: spec.name.clone(),
                });
            }
            if spec.orbit_radius < 0.0 {
                return Err(SceneError::NegativeOrbitRadius {
                    body: spec.name.clone(),
                    radius: spec.orbit_radius,
                });
            }
        }

        let primaries: Vec<usize> = config
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, s)| s.orbit_radius == 0.0)
            .map(|(i, _)| i)
            .collect();
        if primaries.len() != 1 {
            return Err(SceneError::PrimaryCount {
                count: primaries.len(),
            });
        }
        let primary = primaries[0];
        let sun = DVec3::ZERO;

        let bodies: Vec<CelestialBody> = config
            .bodies
            .iter()
            .map(|spec| CelestialBody {
                spec: spec.clone(),
                rotation: 0.0,
                position: sun + DVec3::new(spec.orbit_radius, 0.0, 0.0),
            })
            .collect();

        let guides: Vec<OrbitRing> = config
            .bodies
            .iter()
            .filter(|s| s.orbit_radius > 0.0)
            .map(|s| OrbitRing {
                radius: s.orbit_radius,
                width: ORBIT_GUIDE_WIDTH,
            })
            .collect();

        Ok(Self {
            bodies,
            guides,
            light: sun,
            camera_limits: CameraLimits::default(),
            primary,
        })
    }

    /// Advance the animation to `elapsed_ms` milliseconds.
    ///
    /// Every body's spin grows by [`ROTATION_STEP`] per call. Every
    /// orbiting body's position is recomputed from scratch as
    /// `sun + r * (cos a, 0, sin a)` with
    /// `a = elapsed_ms * ORBIT_SPEED_SCALE * revolution_speed`; orbits are
    /// coplanar on the x-z plane. The primary never moves. Calling twice
    /// with the same `elapsed_ms` yields identical positions — only spin
    /// accumulates across calls. Monotonicity of the input clock is the
    /// caller's concern and is not enforced here.
    pub fn advance(&mut self, elapsed_ms: f64) {
        let sun = self.bodies[self.primary].position;
        for body in &mut self.bodies {
            body.rotation += ROTATION_STEP;
            if body.spec.orbit_radius > 0.0 {
                let angle = elapsed_ms * ORBIT_SPEED_SCALE * body.spec.revolution_speed;
                body.position = DVec3::new(
                    sun.x + body.spec.orbit_radius * angle.cos(),
                    sun.y,
                    sun.z + body.spec.orbit_radius * angle.sin(),
                );
            }
        }
    }

    /// All bodies in table order.
    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Orbit-path guides, one per orbiting body.
    pub fn guides(&self) -> &[OrbitRing] {
        &self.guides
    }

    /// The primary body (the sun).
    pub fn primary(&self) -> &CelestialBody {
        &self.bodies[self.primary]
    }

    /// Position of the scene's light source. Pinned at build time.
    pub fn light(&self) -> DVec3 {
        self.light
    }

    /// Camera distance bounds for the orbit controller.
    pub fn camera_limits(&self) -> CameraLimits {
        self.camera_limits
    }

    /// Look up a body by name.
    pub fn body(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.spec.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Shading;
    use crate::catalog::solar_system;

    fn spec(name: &str, orbit_radius: f64, speed: f64) -> BodySpec {
        BodySpec {
            name: name.to_string(),
            texture: format!("{name}.jpg"),
            radius: 1.0,
            orbit_radius,
            revolution_speed: speed,
            shading: Shading::Lit,
            ring: None,
        }
    }

    #[test]
    fn test_build_places_bodies_at_angle_zero() {
        let mut scene = Scene::build(&solar_system()).unwrap();
        scene.advance(0.0);
        let sun = scene.primary().position;
        for body in scene.bodies() {
            let expected = DVec3::new(sun.x + body.spec.orbit_radius, sun.y, sun.z);
            assert!(
                (body.position - expected).length() < 1e-12,
                "{} not at angle 0: {:?}",
                body.spec.name,
                body.position
            );
        }
    }

    #[test]
    fn test_position_law() {
        let mut scene = Scene::build(&solar_system()).unwrap();
        let t = 4321.0;
        scene.advance(t);
        let sun = scene.primary().position;
        for body in scene.bodies().iter().filter(|b| !b.is_primary()) {
            let r = body.spec.orbit_radius;
            let angle = t * ORBIT_SPEED_SCALE * body.spec.revolution_speed;
            assert!(
                (body.position.x - sun.x - r * angle.cos()).abs() < 1e-9,
                "{} x off-law",
                body.spec.name
            );
            assert!(
                (body.position.z - sun.z - r * angle.sin()).abs() < 1e-9,
                "{} z off-law",
                body.spec.name
            );
            assert_eq!(body.position.y, sun.y, "{} left the orbit plane", body.spec.name);
        }
    }

    #[test]
    fn test_earth_at_one_second() {
        // t = 1000 ms at speed 1 sweeps exactly 1 radian.
        let mut scene = Scene::build(&solar_system()).unwrap();
        scene.advance(1000.0);
        let earth = scene.body("earth").unwrap();
        assert!((earth.position.x - 75.0 * 1.0_f64.cos()).abs() < 1e-9);
        assert!((earth.position.z - 75.0 * 1.0_f64.sin()).abs() < 1e-9);
        // ~ (40.49, 0, 63.09)
        assert!((earth.position.x - 40.49).abs() < 0.01);
        assert!((earth.position.z - 63.09).abs() < 0.01);
    }

    #[test]
    fn test_rotation_is_call_count_driven() {
        // N advance calls add exactly N * ROTATION_STEP regardless of the
        // elapsed-time sequence. This is a design property, not a bug.
        let mut scene = Scene::build(&solar_system()).unwrap();
        let times = [0.0, 16.7, 16.7, 500.0, 250.0, 1e6, 0.0];
        for &t in &times {
            scene.advance(t);
        }
        let expected = times.len() as f64 * ROTATION_STEP;
        for body in scene.bodies() {
            assert!(
                (body.rotation - expected).abs() < 1e-12,
                "{} rotation {} != {}",
                body.spec.name,
                body.rotation,
                expected
            );
        }
    }

    #[test]
    fn test_sun_is_stationary() {
        let mut scene = Scene::build(&solar_system()).unwrap();
        let before = scene.primary().position;
        for i in 0..1000 {
            scene.advance(i as f64 * 33.0);
        }
        assert_eq!(scene.primary().position, before);
    }

    #[test]
    fn test_light_stays_pinned_to_build_time_sun() {
        let mut scene = Scene::build(&solar_system()).unwrap();
        let pinned = scene.light();
        assert_eq!(pinned, scene.primary().position);
        for i in 0..100 {
            scene.advance(i as f64 * 100.0);
        }
        assert_eq!(scene.light(), pinned);
    }

    #[test]
    fn test_advance_is_idempotent_in_position() {
        let mut a = Scene::build(&solar_system()).unwrap();
        let mut b = Scene::build(&solar_system()).unwrap();
        a.advance(7777.0);
        b.advance(7777.0);
        b.advance(7777.0);
        for (x, y) in a.bodies().iter().zip(b.bodies()) {
            assert_eq!(x.position, y.position, "{} diverged", x.spec.name);
        }
        // Spin is the one thing that accumulates.
        assert!((b.bodies()[0].rotation - 2.0 * ROTATION_STEP).abs() < 1e-12);
    }

    #[test]
    fn test_orbit_radii_strictly_increase() {
        let config = solar_system();
        let radii: Vec<f64> = config
            .bodies
            .iter()
            .filter(|s| s.orbit_radius > 0.0)
            .map(|s| s.orbit_radius)
            .collect();
        assert_eq!(radii, vec![50.0, 65.0, 75.0, 85.0, 110.0, 125.0, 145.0, 170.0]);
        for pair in radii.windows(2) {
            assert!(pair[0] < pair[1], "orbit radii out of order: {pair:?}");
        }
    }

    #[test]
    fn test_one_guide_per_orbiting_body() {
        let scene = Scene::build(&solar_system()).unwrap();
        assert_eq!(scene.guides().len(), 8);
        for (guide, body) in scene
            .guides()
            .iter()
            .zip(scene.bodies().iter().filter(|b| !b.is_primary()))
        {
            assert_eq!(guide.radius, body.spec.orbit_radius);
            assert_eq!(guide.width, ORBIT_GUIDE_WIDTH);
        }
    }

    #[test]
    fn test_saturn_carries_its_ring() {
        let scene = Scene::build(&solar_system()).unwrap();
        let ring = scene.body("saturn").unwrap().spec.ring.unwrap();
        assert_eq!(ring.inner, 9.0);
        assert_eq!(ring.outer, 12.0);
        let ringed = scene.bodies().iter().filter(|b| b.spec.ring.is_some()).count();
        assert_eq!(ringed, 1, "only saturn is ringed");
    }

    #[test]
    fn test_build_rejects_negative_orbit_radius() {
        let config = SceneConfig {
            bodies: vec![spec("sun", 0.0, 0.0), spec("rogue", -5.0, 1.0)],
        };
        match Scene::build(&config) {
            Err(SceneError::NegativeOrbitRadius { body, radius }) => {
                assert_eq!(body, "rogue");
                assert_eq!(radius, -5.0);
            }
            other => panic!("expected NegativeOrbitRadius, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_missing_texture() {
        let mut bad = spec("venus", 65.0, 1.5);
        bad.texture.clear();
        let config = SceneConfig {
            bodies: vec![spec("sun", 0.0, 0.0), bad],
        };
        assert!(matches!(
            Scene::build(&config),
            Err(SceneError::MissingTexture { .. })
        ));
    }

    #[test]
    fn test_build_rejects_wrong_primary_count() {
        let config = SceneConfig {
            bodies: vec![spec("earth", 75.0, 1.0)],
        };
        assert!(matches!(
            Scene::build(&config),
            Err(SceneError::PrimaryCount { count: 0 })
        ));

        let config = SceneConfig {
            bodies: vec![spec("sun", 0.0, 0.0), spec("sun2", 0.0, 0.0)],
        };
        assert!(matches!(
            Scene::build(&config),
            Err(SceneError::PrimaryCount { count: 2 })
        ));
    }

    #[test]
    fn test_camera_limits_clamp() {
        let limits = CameraLimits::default();
        assert_eq!(limits.clamp(5.0), 12.0);
        assert_eq!(limits.clamp(100.0), 100.0);
        assert_eq!(limits.clamp(5000.0), 1000.0);
    }
}
