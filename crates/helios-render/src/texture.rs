//! Texture resolution and GPU upload.
//!
//! The scene model only holds opaque texture names; [`TextureManager`]
//! resolves them against the asset directory. A texture that fails to
//! resolve degrades to a procedural placeholder with a warning — asset
//! failures never abort the frame loop.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Error type for texture resolution failures.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// The image file could not be opened or decoded.
    #[error("failed to load texture `{path}`: {source}")]
    Load {
        /// Path that failed to resolve.
        path: PathBuf,
        /// Underlying decode/io error.
        source: image::ImageError,
    },
}

/// A GPU texture with its view and ready-to-bind group.
pub struct ManagedTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
}

/// Resolves texture names to GPU textures, caching by name.
///
/// Owns the texture bind group layout (texture + sampler at group
/// bindings 0/1) shared by every textured pipeline.
pub struct TextureManager {
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    cache: HashMap<String, Arc<ManagedTexture>>,
}

/// Placeholder checkerboard edge length in texels.
const PLACEHOLDER_SIZE: u32 = 64;

impl TextureManager {
    /// Create a manager, its shared bind group layout, and sampler.
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texture-sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            bind_group_layout,
            sampler,
            cache: HashMap::new(),
        }
    }

    /// The layout every textured pipeline binds its texture group with.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Resolve `name` against `dir`, decode, and upload. Cached by name.
    pub fn load(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        dir: &Path,
        name: &str,
    ) -> Result<Arc<ManagedTexture>, TextureError> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(cached.clone());
        }

        let path = dir.join(name);
        let image = image::open(&path)
            .map_err(|source| TextureError::Load {
                path: path.clone(),
                source,
            })?
            .to_rgba8();

        let (width, height) = image.dimensions();
        let texture = self.upload_rgba8(device, queue, name, width, height, image.as_raw());
        log::debug!("Loaded texture `{name}` ({width}x{height})");

        let texture = Arc::new(texture);
        self.cache.insert(name.to_string(), texture.clone());
        Ok(texture)
    }

    /// Resolve `name`, degrading to the placeholder on failure.
    ///
    /// This is the asset-failure policy: warn and draw untextured rather
    /// than abort the frame loop.
    pub fn load_or_placeholder(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        dir: &Path,
        name: &str,
    ) -> Arc<ManagedTexture> {
        match self.load(device, queue, dir, name) {
            Ok(texture) => texture,
            Err(err) => {
                log::warn!("{err}; using placeholder material");
                self.placeholder(device, queue)
            }
        }
    }

    /// The shared two-tone placeholder texture.
    pub fn placeholder(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Arc<ManagedTexture> {
        if let Some(cached) = self.cache.get("__placeholder") {
            return cached.clone();
        }

        let data = placeholder_rgba8(PLACEHOLDER_SIZE);
        let texture = Arc::new(self.upload_rgba8(
            device,
            queue,
            "placeholder",
            PLACEHOLDER_SIZE,
            PLACEHOLDER_SIZE,
            &data,
        ));
        self.cache.insert("__placeholder".to_string(), texture.clone());
        texture
    }

    /// Number of distinct textures resident (placeholder included).
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether no textures have been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn upload_rgba8(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> ManagedTexture {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        ManagedTexture {
            texture,
            view,
            bind_group,
        }
    }
}

/// Build the placeholder checkerboard: 8x8 blocks in two grays.
fn placeholder_rgba8(size: u32) -> Vec<u8> {
    let block = size / 8;
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dark = ((x / block) + (y / block)) % 2 == 0;
            let value = if dark { 64 } else { 160 };
            data.extend_from_slice(&[value, value, value, 255]);
        }
    }
    data
}
