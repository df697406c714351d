//! The default nine-body solar-system table.

use crate::body::{BodyRing, BodySpec, Shading};
use crate::scene::SceneConfig;

fn body(
    name: &str,
    texture: &str,
    radius: f64,
    orbit_radius: f64,
    revolution_speed: f64,
    shading: Shading,
) -> BodySpec {
    BodySpec {
        name: name.to_string(),
        texture: texture.to_string(),
        radius,
        orbit_radius,
        revolution_speed,
        shading,
        ring: None,
    }
}

/// The canonical solar-system table: the sun plus eight planets in
/// increasing orbit-radius order. Radii are render sizes, not physical.
pub fn solar_system() -> SceneConfig {
    let mut saturn = body("saturn", "saturn_hd.jpg", 8.0, 125.0, 0.4, Shading::Lit);
    saturn.ring = Some(BodyRing {
        inner: 9.0,
        outer: 12.0,
    });

    SceneConfig {
        bodies: vec![
            body("sun", "sun_hd.jpg", 20.0, 0.0, 0.0, Shading::Flat),
            body("mercury", "mercury_hd.jpg", 2.0, 50.0, 1.8, Shading::Lit),
            body("venus", "venus_hd.jpg", 3.0, 65.0, 1.5, Shading::Lit),
            body("earth", "earth_hd.jpg", 4.0, 75.0, 1.0, Shading::Lit),
            body("mars", "mars_hd.jpg", 3.5, 85.0, 0.9, Shading::Lit),
            body("jupiter", "jupiter_hd.jpg", 10.0, 110.0, 0.5, Shading::Lit),
            saturn,
            body("uranus", "uranus_hd.jpg", 6.0, 145.0, 0.35, Shading::Lit),
            body("neptune", "neptune_hd.jpg", 5.0, 170.0, 0.3, Shading::Lit),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_nine_bodies() {
        assert_eq!(solar_system().bodies.len(), 9);
    }

    #[test]
    fn test_only_the_sun_is_flat_shaded() {
        for spec in &solar_system().bodies {
            if spec.name == "sun" {
                assert_eq!(spec.shading, Shading::Flat);
                assert_eq!(spec.orbit_radius, 0.0);
            } else {
                assert_eq!(spec.shading, Shading::Lit, "{} should be lit", spec.name);
                assert!(spec.orbit_radius > 0.0);
            }
        }
    }

    #[test]
    fn test_revolution_slows_with_distance() {
        let config = solar_system();
        let speeds: Vec<f64> = config
            .bodies
            .iter()
            .filter(|s| s.orbit_radius > 0.0)
            .map(|s| s.revolution_speed)
            .collect();
        for pair in speeds.windows(2) {
            assert!(
                pair[0] > pair[1],
                "outer planets should revolve slower: {pair:?}"
            );
        }
    }

    #[test]
    fn test_every_body_names_a_texture() {
        for spec in &solar_system().bodies {
            assert!(
                spec.texture.ends_with(".jpg"),
                "{} texture looks wrong: {}",
                spec.name,
                spec.texture
            );
        }
    }
}
