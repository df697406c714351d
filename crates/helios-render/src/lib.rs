//! wgpu rendering collaborator for the Helios orrery: GPU context and
//! surface management, reverse-Z camera, mesh generation and buffers,
//! texture resolution with degraded-material fallback, and the three
//! pipelines the scene draws with (unlit textured, lit textured, flat
//! ring).

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod lit_pipeline;
pub mod mesh;
pub mod ring_pipeline;
pub mod texture;
pub mod unlit_pipeline;

pub use buffer::{BufferAllocator, MeshBuffer, VertexPositionNormalUv};
pub use camera::{Camera, CameraUniform};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use lit_pipeline::{LIT_SHADER_SOURCE, LightUniform, LitTexturedPipeline};
pub use mesh::{MeshData, annulus, skybox_faces, uv_sphere};
pub use ring_pipeline::{RING_SHADER_SOURCE, RingPipeline, RingUniform};
pub use texture::{ManagedTexture, TextureError, TextureManager};
pub use unlit_pipeline::{ModelUniform, UNLIT_TEXTURED_SHADER_SOURCE, UnlitTexturedPipeline};
