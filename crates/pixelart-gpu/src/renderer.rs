use wgpu::{BindGroupLayout, Device, RenderPipeline, Sampler, TextureFormat};

use crate::panel_texture::PanelTexture;

/// Panel quad shader.
///
/// The vertex shader builds the panel's quad from vertex indices (no vertex
/// buffer) inside the clip-space rectangle held in `quad`. The fragment shader
/// samples the panel texture, which is already premultiplied.
pub const PANEL_WGSL: &str = r#"
struct VertexOut {
    @builtin(position) pos: vec4<f32>,
    @location(0)       uv:  vec2<f32>,
};

struct Quad {
    // left, top, right, bottom in clip space
    rect: vec4<f32>,
};

@group(0) @binding(0) var t_panel: texture_2d<f32>;
@group(0) @binding(1) var s_panel: sampler;
@group(0) @binding(2) var<uniform> quad: Quad;

@vertex
fn vs_main(@builtin(vertex_index) vi: u32) -> VertexOut {
    var corners = array<vec2<f32>, 6>(
        vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0),
        vec2(0.0, 1.0), vec2(1.0, 0.0), vec2(1.0, 1.0),
    );
    let uv = corners[vi];
    var out: VertexOut;
    out.pos = vec4(
        mix(quad.rect.x, quad.rect.z, uv.x),
        mix(quad.rect.y, quad.rect.w, uv.y),
        0.0,
        1.0,
    );
    out.uv = uv;
    return out;
}

@fragment
fn fs_main(in: VertexOut) -> @location(0) vec4<f32> {
    return textureSample(t_panel, s_panel, in.uv);
}
"#;

/// Draws panel textures onto the surface with premultiplied-alpha blending.
pub struct Presenter {
    pipeline: RenderPipeline,
    layout: BindGroupLayout,
    sampler: Sampler,
}

impl Presenter {
    pub fn new(device: &Device, surface_format: TextureFormat) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("panel_bgl"),
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
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("panel_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("panel_pl"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("panel_quad"),
            source: wgpu::ShaderSource::Wgsl(PANEL_WGSL.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("panel_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
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
        });

        Self {
            pipeline,
            layout,
            sampler,
        }
    }

    pub fn create_texture(&self, device: &Device, width: u32, height: u32) -> PanelTexture {
        PanelTexture::new(device, &self.layout, &self.sampler, width, height)
    }

    /// Record one quad per panel, in order (later panels draw on top).
    pub fn draw<'a>(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        panels: impl IntoIterator<Item = &'a PanelTexture>,
    ) {
        pass.set_pipeline(&self.pipeline);
        for panel in panels {
            pass.set_bind_group(0, panel.bind_group(), &[]);
            pass.draw(0..6, 0..1);
        }
    }
}
