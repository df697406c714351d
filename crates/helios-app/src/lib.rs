//! Helios application shell.
//!
//! Window creation, the frame loop, orbit camera control, and the glue
//! that draws the scene model each frame.

pub mod frame;
pub mod orbit;
pub mod scene_renderer;
pub mod window;
