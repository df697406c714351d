//! Scene construction error types.

/// Errors rejected by [`Scene::build`](crate::Scene::build).
///
/// The default table is a compile-time constant, so these paths are
/// unreachable in normal operation, but user-supplied tables (e.g. loaded
/// from config) go through the same validation.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A body's texture reference is empty.
    #[error("body `{body}` has no texture reference")]
    MissingTexture {
        /// Name of the offending body.
        body: String,
    },

    /// A body's orbit radius is negative.
    #[error("body `{body}` has negative orbit radius {radius}")]
    NegativeOrbitRadius {
        /// Name of the offending body.
        body: String,
        /// The rejected radius.
        radius: f64,
    },

    /// The table does not contain exactly one primary body. The light
    /// source is pinned to the primary at build time, so this is fatal.
    #[error("scene requires exactly one body with orbit radius 0, found {count}")]
    PrimaryCount {
        /// Number of bodies with orbit radius 0.
        count: usize,
    },
}
