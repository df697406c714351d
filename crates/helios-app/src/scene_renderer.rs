//! Per-frame drawing of the orbit scene model.
//!
//! Owns the GPU state derived from a built [`Scene`]: one sphere mesh and
//! model uniform per body, annulus meshes for the orbit guides and
//! Saturn's ring, the six skybox faces, and the pinned light uniform. The
//! scene model itself stays GPU-free; this module reads its state every
//! frame and writes the uniforms.

use std::sync::Arc;

use glam::Mat4;
use wgpu::util::DeviceExt;

use helios_config::AssetConfig;
use helios_render::{
    BufferAllocator, Camera, DepthBuffer, LightUniform, LitTexturedPipeline, ManagedTexture,
    MeshBuffer, ModelUniform, RenderContext, RingPipeline, RingUniform, SurfaceError,
    TextureManager, UnlitTexturedPipeline, annulus, skybox_faces,
    lit_pipeline::draw_lit_textured, ring_pipeline::draw_ring,
    unlit_pipeline::draw_unlit_textured, uv_sphere,
};
use helios_scene::{CelestialBody, Scene, Shading};

/// Orbit-path guides are opaque white.
const GUIDE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Saturn's ring is grey at 0.6 alpha.
const BODY_RING_COLOR: [f32; 4] = [0.667, 0.667, 0.667, 0.6];

/// Half edge length of the skybox cube (edge 1000 scene units).
const SKYBOX_HALF: f32 = 500.0;

/// Sphere tessellation for all bodies.
const SPHERE_SEGMENTS: u32 = 64;
const SPHERE_RINGS: u32 = 48;

/// Annulus tessellation: guides are thin, the body ring is wide.
const GUIDE_SEGMENTS: u32 = 100;
const BODY_RING_SEGMENTS: u32 = 64;

/// Space-black clear color behind the skybox.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.01,
    a: 1.0,
};

/// GPU state for one translucent annulus.
struct RingDraw {
    mesh: MeshBuffer,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    color: [f32; 4],
}

/// GPU state for one celestial body.
struct BodyDraw {
    shading: Shading,
    mesh: MeshBuffer,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    texture: Arc<ManagedTexture>,
    /// Decorative ring co-moving with the body (Saturn).
    ring: Option<RingDraw>,
}

/// Draws a built scene. Created once; consumes scene state every frame.
pub struct SceneRenderer {
    unlit: UnlitTexturedPipeline,
    lit: LitTexturedPipeline,
    ring_pipeline: RingPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bg_unlit: wgpu::BindGroup,
    camera_bg_lit: wgpu::BindGroup,
    camera_bg_ring: wgpu::BindGroup,
    light_bind_group: wgpu::BindGroup,
    skybox: Vec<(MeshBuffer, Arc<ManagedTexture>)>,
    skybox_model_bind_group: wgpu::BindGroup,
    bodies: Vec<BodyDraw>,
    guides: Vec<RingDraw>,
}

impl SceneRenderer {
    /// Build all GPU state for a scene: meshes, uniforms, textures.
    ///
    /// Missing textures degrade to placeholders inside the texture
    /// manager; scene construction never fails past this point.
    pub fn new(ctx: &RenderContext, scene: &Scene, assets: &AssetConfig) -> Self {
        let device = &ctx.device;
        let mut textures = TextureManager::new(device);

        let unlit = UnlitTexturedPipeline::new(device, ctx.surface_format, textures.bind_group_layout());
        let lit = LitTexturedPipeline::new(device, ctx.surface_format, textures.bind_group_layout());
        let ring_pipeline = RingPipeline::new(device, ctx.surface_format);

        let allocator = BufferAllocator::new(device);

        // One camera buffer shared by all pipelines, bound per layout.
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera-uniform"),
            contents: bytemuck::bytes_of(&Camera::default().to_uniform()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bg = |layout: &wgpu::BindGroupLayout, label: &str| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            })
        };
        let camera_bg_unlit = camera_bg(&unlit.camera_bind_group_layout, "camera-bg-unlit");
        let camera_bg_lit = camera_bg(&lit.camera_bind_group_layout, "camera-bg-lit");
        let camera_bg_ring = camera_bg(&ring_pipeline.camera_bind_group_layout, "camera-bg-ring");

        // The light is pinned to the sun at build time and never updated.
        let light_pos = scene.light().as_vec3();
        let light = LightUniform {
            position: [light_pos.x, light_pos.y, light_pos.z, 0.0],
            ..LightUniform::default()
        };
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("light-uniform"),
            contents: bytemuck::bytes_of(&light),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("light-bg"),
            layout: &lit.light_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        });

        // Skybox: six static faces sharing one identity model uniform.
        let skybox_model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("skybox-model"),
            contents: bytemuck::bytes_of(&ModelUniform {
                model: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let skybox_model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("skybox-model-bg"),
            layout: &unlit.model_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: skybox_model_buffer.as_entire_binding(),
            }],
        });
        let skybox = skybox_faces(SKYBOX_HALF)
            .into_iter()
            .zip(&assets.skybox_faces)
            .enumerate()
            .map(|(i, (face, name))| {
                let mesh = face.upload(&allocator, &format!("skybox-{i}"));
                let texture =
                    textures.load_or_placeholder(device, &ctx.queue, &assets.texture_dir, name);
                (mesh, texture)
            })
            .collect();

        let bodies = scene
            .bodies()
            .iter()
            .map(|body| {
                let spec = &body.spec;
                let mesh = uv_sphere(spec.radius as f32, SPHERE_SEGMENTS, SPHERE_RINGS)
                    .upload(&allocator, &spec.name);

                let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{}-model", spec.name)),
                    contents: bytemuck::bytes_of(&ModelUniform {
                        model: body_model(body).to_cols_array_2d(),
                    }),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let model_layout = match spec.shading {
                    Shading::Flat => &unlit.model_bind_group_layout,
                    Shading::Lit => &lit.model_bind_group_layout,
                };
                let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("{}-model-bg", spec.name)),
                    layout: model_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: model_buffer.as_entire_binding(),
                    }],
                });

                let texture = textures.load_or_placeholder(
                    device,
                    &ctx.queue,
                    &assets.texture_dir,
                    &spec.texture,
                );

                let ring = spec.ring.map(|r| {
                    make_ring_draw(
                        device,
                        &ring_pipeline,
                        &allocator,
                        &format!("{}-ring", spec.name),
                        annulus(r.inner as f32, r.outer as f32, BODY_RING_SEGMENTS),
                        body_ring_model(body),
                        BODY_RING_COLOR,
                        true,
                    )
                });

                BodyDraw {
                    shading: spec.shading,
                    mesh,
                    model_buffer,
                    model_bind_group,
                    texture,
                    ring,
                }
            })
            .collect();

        let guides = scene
            .guides()
            .iter()
            .enumerate()
            .map(|(i, guide)| {
                make_ring_draw(
                    device,
                    &ring_pipeline,
                    &allocator,
                    &format!("orbit-guide-{i}"),
                    annulus(
                        (guide.radius - guide.width) as f32,
                        guide.radius as f32,
                        GUIDE_SEGMENTS,
                    ),
                    Mat4::IDENTITY,
                    GUIDE_COLOR,
                    false,
                )
            })
            .collect();

        tracing::info!(
            "Scene renderer ready: {} bodies, {} orbit guides, 6 skybox faces",
            scene.bodies().len(),
            scene.guides().len(),
        );

        Self {
            unlit,
            lit,
            ring_pipeline,
            camera_buffer,
            camera_bg_unlit,
            camera_bg_lit,
            camera_bg_ring,
            light_bind_group,
            skybox,
            skybox_model_bind_group,
            bodies,
            guides,
        }
    }

    /// Write the per-frame uniforms from the current scene state.
    fn upload_frame_state(&self, queue: &wgpu::Queue, camera: &Camera, scene: &Scene) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&camera.to_uniform()),
        );

        for (draw, body) in self.bodies.iter().zip(scene.bodies()) {
            queue.write_buffer(
                &draw.model_buffer,
                0,
                bytemuck::bytes_of(&ModelUniform {
                    model: body_model(body).to_cols_array_2d(),
                }),
            );
            if let Some(ring) = &draw.ring {
                queue.write_buffer(
                    &ring.buffer,
                    0,
                    bytemuck::bytes_of(&RingUniform {
                        model: body_ring_model(body).to_cols_array_2d(),
                        color: ring.color,
                    }),
                );
            }
        }
    }

    /// Draw one frame of the current scene state.
    pub fn render(
        &self,
        ctx: &RenderContext,
        depth: &DepthBuffer,
        camera: &Camera,
        scene: &Scene,
    ) -> Result<(), SurfaceError> {
        self.upload_frame_state(&ctx.queue, camera, scene);

        let surface_texture = ctx.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for (mesh, texture) in &self.skybox {
                draw_unlit_textured(
                    &mut pass,
                    &self.unlit,
                    &self.camera_bg_unlit,
                    &self.skybox_model_bind_group,
                    &texture.bind_group,
                    mesh,
                );
            }

            for draw in &self.bodies {
                match draw.shading {
                    Shading::Flat => draw_unlit_textured(
                        &mut pass,
                        &self.unlit,
                        &self.camera_bg_unlit,
                        &draw.model_bind_group,
                        &draw.texture.bind_group,
                        &draw.mesh,
                    ),
                    Shading::Lit => draw_lit_textured(
                        &mut pass,
                        &self.lit,
                        &self.camera_bg_lit,
                        &draw.model_bind_group,
                        &draw.texture.bind_group,
                        &self.light_bind_group,
                        &draw.mesh,
                    ),
                }
            }

            // Translucent rings last: depth-tested but not depth-written.
            for guide in &self.guides {
                draw_ring(
                    &mut pass,
                    &self.ring_pipeline,
                    &self.camera_bg_ring,
                    &guide.bind_group,
                    &guide.mesh,
                );
            }
            for draw in &self.bodies {
                if let Some(ring) = &draw.ring {
                    draw_ring(
                        &mut pass,
                        &self.ring_pipeline,
                        &self.camera_bg_ring,
                        &ring.bind_group,
                        &ring.mesh,
                    );
                }
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}

/// Model matrix for a body: orbital translation then spin about +Y.
fn body_model(body: &CelestialBody) -> Mat4 {
    Mat4::from_translation(body.position.as_vec3())
        * Mat4::from_rotation_y(body.rotation as f32)
}

/// Model matrix for a body's decorative ring: co-moves and co-rotates.
fn body_ring_model(body: &CelestialBody) -> Mat4 {
    body_model(body)
}

#[allow(clippy::too_many_arguments)]
fn make_ring_draw(
    device: &wgpu::Device,
    pipeline: &RingPipeline,
    allocator: &BufferAllocator,
    label: &str,
    mesh: helios_render::MeshData,
    model: Mat4,
    color: [f32; 4],
    dynamic: bool,
) -> RingDraw {
    let mesh = mesh.upload(allocator, label);
    let usage = if dynamic {
        wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST
    } else {
        wgpu::BufferUsages::UNIFORM
    };
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(&RingUniform {
            model: model.to_cols_array_2d(),
            color,
        }),
        usage,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &pipeline.ring_bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    RingDraw {
        mesh,
        buffer,
        bind_group,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use helios_scene::{BodySpec, solar_system};

    fn body_at(position: DVec3, rotation: f64) -> CelestialBody {
        let spec: BodySpec = solar_system().bodies[3].clone(); // earth
        CelestialBody {
            spec,
            rotation,
            position,
        }
    }

    #[test]
    fn test_body_model_translates_to_position() {
        let body = body_at(DVec3::new(75.0, 0.0, -3.0), 0.0);
        let model = body_model(&body);
        let origin = model * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin.truncate() - glam::Vec3::new(75.0, 0.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn test_body_model_spins_about_y() {
        let body = body_at(DVec3::ZERO, std::f64::consts::FRAC_PI_2);
        let model = body_model(&body);
        // +X rotates toward -Z after a quarter turn about +Y.
        let rotated = model * glam::Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!((rotated.x).abs() < 1e-5);
        assert!((rotated.z + 1.0).abs() < 1e-5);
        // Y axis is untouched by the spin.
        let up = model * glam::Vec4::new(0.0, 1.0, 0.0, 0.0);
        assert!((up.truncate() - glam::Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_ring_colors_are_white_guides_and_grey_band() {
        assert_eq!(GUIDE_COLOR[3], 1.0, "guides are opaque");
        assert!((BODY_RING_COLOR[3] - 0.6).abs() < 1e-6, "body ring is 0.6 alpha");
        // #aaaaaa grey.
        assert!((BODY_RING_COLOR[0] - 0.667).abs() < 1e-3);
    }

    #[test]
    fn test_skybox_edge_is_1000_units() {
        assert_eq!(SKYBOX_HALF * 2.0, 1000.0);
    }
}
