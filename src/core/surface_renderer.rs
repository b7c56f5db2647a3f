use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use image::RgbaImage;
use wgpu::util::DeviceExt;
use wgpu::{BindGroup, BindGroupLayout, Buffer, Device, RenderPipeline, Sampler, Surface, SurfaceConfiguration, SurfaceTexture, Texture};
use winit::window::Window as WinitWindow;

use super::gpu_context::GpuContext;
use crate::error::WindowError;
use crate::traits::{FrameRenderer, TextureHandle};

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct Vertex {
    position: [f32; 2],
    uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Two triangles covering clip space; uv (0, 0) is the top-left texel
const QUAD: [Vertex; 6] = [
    Vertex { position: [-1.0, 1.0], uv: [0.0, 0.0] },
    Vertex { position: [-1.0, -1.0], uv: [0.0, 1.0] },
    Vertex { position: [1.0, -1.0], uv: [1.0, 1.0] },
    Vertex { position: [-1.0, 1.0], uv: [0.0, 0.0] },
    Vertex { position: [1.0, -1.0], uv: [1.0, 1.0] },
    Vertex { position: [1.0, 1.0], uv: [1.0, 0.0] },
];

/// Frame texture currently bound for drawing
struct FrameTexture {
    handle: TextureHandle,
    _texture: Texture,
    bind_group: BindGroup,
}

/// Presents composited frames on a window surface.
///
/// Each upload replaces the previous texture; the drawn surface texture is
/// held until the next `begin_frame` presents it.
pub struct SurfaceRenderer {
    window: Arc<WinitWindow>,
    gpu: GpuContext,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    pipeline: RenderPipeline,
    bind_group_layout: BindGroupLayout,
    sampler: Sampler,
    vertex_buffer: Buffer,
    frame: Option<FrameTexture>,
    pending: Option<SurfaceTexture>,
    next_handle: u64,
}

impl SurfaceRenderer {
    pub fn new(window: Arc<WinitWindow>) -> Result<Self, WindowError> {
        let (gpu, surface) = pollster::block_on(GpuContext::for_window(window.clone()))?;
        let size = window.inner_size();

        let caps = surface.get_capabilities(gpu.adapter());
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| WindowError::SurfaceCreation("surface reports no formats".into()))?;
        let alpha_mode = caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(gpu.device(), &surface_config);

        let bind_group_layout = Self::create_bind_group_layout(gpu.device());
        let pipeline = Self::create_pipeline(gpu.device(), &bind_group_layout, format);
        let sampler = gpu.device().create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Frame Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let vertex_buffer = gpu.device().create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Quad"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!(
            "surface configured {}x{} as {:?}",
            surface_config.width,
            surface_config.height,
            format
        );

        Ok(Self {
            window,
            gpu,
            surface,
            surface_config,
            pipeline,
            bind_group_layout,
            sampler,
            vertex_buffer,
            frame: None,
            pending: None,
            next_handle: 0,
        })
    }

    /// Reconfigure the surface if the native window changed size
    fn sync_surface_size(&mut self) {
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }
        if size.width != self.surface_config.width || size.height != self.surface_config.height {
            self.surface_config.width = size.width;
            self.surface_config.height = size.height;
            self.surface.configure(self.gpu.device(), &self.surface_config);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(self.gpu.device(), &self.surface_config);
    }

    fn create_bind_group_layout(device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
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
        })
    }

    fn create_pipeline(device: &Device, layout: &BindGroupLayout, format: wgpu::TextureFormat) -> RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Frame Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../blit.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Frame Pipeline Layout"),
            bind_group_layouts: &[layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Frame Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }
}

impl FrameRenderer for SurfaceRenderer {
    fn begin_frame(&mut self) -> Result<(), WindowError> {
        if let Some(frame) = self.pending.take() {
            self.window.pre_present_notify();
            frame.present();
        }
        self.sync_surface_size();
        Ok(())
    }

    fn upload(&mut self, image: &RgbaImage) -> Result<TextureHandle, WindowError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            self.frame = None;
            return Ok(TextureHandle::NONE);
        }

        let device = self.gpu.device();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Frame Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.gpu.queue().write_texture(
            texture.as_image_copy(),
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
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

        self.next_handle += 1;
        let handle = TextureHandle(self.next_handle);
        // Replacing the previous entry releases its texture.
        self.frame = Some(FrameTexture {
            handle,
            _texture: texture,
            bind_group,
        });
        Ok(handle)
    }

    fn draw(&mut self) -> Result<(), WindowError> {
        let Some(frame) = self.frame.as_ref() else {
            return Ok(());
        };

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.reconfigure();
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };
        let target = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &frame.bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.draw(0..QUAD.len() as u32, 0..1);
        }

        self.gpu.queue().submit(Some(encoder.finish()));
        log::trace!("drew texture {:?}", frame.handle);
        self.pending = Some(surface_texture);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_clip_space() {
        let xs: Vec<f32> = QUAD.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = QUAD.iter().map(|v| v.position[1]).collect();
        assert!(xs.contains(&-1.0) && xs.contains(&1.0));
        assert!(ys.contains(&-1.0) && ys.contains(&1.0));
    }

    #[test]
    fn test_top_left_vertex_samples_first_texel() {
        let top_left = QUAD
            .iter()
            .find(|v| v.position == [-1.0, 1.0])
            .map(|v| v.uv);
        assert_eq!(top_left, Some([0.0, 0.0]));
    }

    #[test]
    fn test_vertex_stride() {
        assert_eq!(Vertex::layout().array_stride, 16);
    }
}
