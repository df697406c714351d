//! Flat-color ring pipeline: alpha-blended, double-sided annuli for the
//! orbit-path guides and Saturn's ring.

use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;

use crate::buffer::{MeshBuffer, VertexPositionNormalUv};
use crate::depth::DepthBuffer;

/// Per-ring uniform: model matrix plus flat RGBA color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct RingUniform {
    /// Model (local-to-world) matrix, column-major.
    pub model: [[f32; 4]; 4],
    /// Flat color with alpha (guides are opaque white, Saturn's ring is
    /// grey at 0.6 alpha).
    pub color: [f32; 4],
}

/// Ring pipeline: camera at group 0, ring uniform at group 1.
pub struct RingPipeline {
    /// The underlying wgpu render pipeline.
    pub pipeline: wgpu::RenderPipeline,
    /// Camera uniform bind group layout (group 0).
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
    /// Ring uniform bind group layout (group 1).
    pub ring_bind_group_layout: wgpu::BindGroupLayout,
}

impl RingPipeline {
    /// Create the ring pipeline.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ring-shader"),
            source: wgpu::ShaderSource::Wgsl(RING_SHADER_SOURCE.into()),
        });

        let camera_bind_group_layout =
            crate::unlit_pipeline::uniform_layout(device, "ring-camera-bgl", 64);

        let ring_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("ring-uniform-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(
                            std::mem::size_of::<RingUniform>() as u64
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ring-pipeline-layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &ring_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ring-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[VertexPositionNormalUv::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // rings are visible from both sides
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: false, // translucent, drawn after opaques
                depth_compare: DepthBuffer::COMPARE_FUNCTION,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            camera_bind_group_layout,
            ring_bind_group_layout,
        }
    }
}

/// Draw one ring.
pub fn draw_ring<'a>(
    render_pass: &mut wgpu::RenderPass<'a>,
    pipeline: &RingPipeline,
    camera_bind_group: &'a wgpu::BindGroup,
    ring_bind_group: &'a wgpu::BindGroup,
    mesh: &'a MeshBuffer,
) {
    render_pass.set_pipeline(&pipeline.pipeline);
    render_pass.set_bind_group(0, camera_bind_group, &[]);
    render_pass.set_bind_group(1, ring_bind_group, &[]);
    mesh.bind(render_pass);
    mesh.draw(render_pass);
}

/// WGSL shader source for flat-color ring rendering.
pub const RING_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
};

struct RingUniform {
    model: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

@group(1) @binding(0)
var<uniform> ring: RingUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> @builtin(position) vec4<f32> {
    return camera.view_proj * ring.model * vec4<f32>(in.position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return ring.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_uniform_size() {
        // mat4x4 (64) + vec4 (16).
        assert_eq!(std::mem::size_of::<RingUniform>(), 80);
        assert_eq!(std::mem::size_of::<RingUniform>() % 16, 0);
    }

    #[test]
    fn test_shader_entry_points_exist() {
        assert!(RING_SHADER_SOURCE.contains("fn vs_main"));
        assert!(RING_SHADER_SOURCE.contains("fn fs_main"));
    }
}
