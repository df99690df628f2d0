use glam::Vec2;
use pixelart_core::Frame;
use wgpu::{BindGroup, BindGroupLayout, Buffer, Device, Queue, Sampler, Texture};

/// Where a panel's quad lands, in clip space: left, top, right, bottom.
/// Must match `Quad` in the presenter's WGSL.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadUniforms {
    pub rect: [f32; 4],
}

impl QuadUniforms {
    /// Convert a pixel rectangle (origin top-left) on a surface of `surface`
    /// pixels into clip space (origin centre, y up).
    pub fn from_pixels(origin: Vec2, size: Vec2, surface: Vec2) -> Self {
        let surface = surface.max(Vec2::ONE);
        let to_clip = |p: Vec2| {
            let n = p / surface * 2.0 - 1.0;
            Vec2::new(n.x, -n.y)
        };
        let top_left = to_clip(origin);
        let bottom_right = to_clip(origin + size);
        Self {
            rect: [top_left.x, top_left.y, bottom_right.x, bottom_right.y],
        }
    }
}

/// GPU copy of one panel's latest frame plus the quad it is drawn into.
///
/// Size is fixed at creation; callers re-create the texture when the panel
/// size changes.
pub struct PanelTexture {
    texture: Texture,
    uniform_buf: Buffer,
    bind_group: BindGroup,
    width: u32,
    height: u32,
}

impl PanelTexture {
    pub fn new(
        device: &Device,
        layout: &BindGroupLayout,
        sampler: &Sampler,
        width: u32,
        height: u32,
    ) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("panel_texture"),
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
        let view = texture.create_view(&Default::default());

        let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("panel_quad"),
            size: std::mem::size_of::<QuadUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("panel_bg"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform_buf.as_entire_binding(),
                },
            ],
        });

        Self {
            texture,
            uniform_buf,
            bind_group,
            width,
            height,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        (self.width, self.height) == (width, height)
    }

    pub fn bind_group(&self) -> &BindGroup {
        &self.bind_group
    }

    /// Copy `frame` (premultiplied) into the texture. Frames of another size
    /// are skipped.
    pub fn upload(&self, queue: &Queue, frame: &Frame) {
        if !self.matches(frame.width(), frame.height()) {
            log::warn!(
                "frame {}×{} does not fit panel texture {}×{}; upload skipped",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            );
            return;
        }
        let texels = frame.to_rgba8();
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&texels),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    pub fn place(&self, queue: &Queue, quad: QuadUniforms) {
        queue.write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(&quad));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_uniforms_are_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<QuadUniforms>(), 16);
    }

    #[test]
    fn full_surface_maps_to_full_clip_space() {
        let surface = Vec2::new(800.0, 600.0);
        let q = QuadUniforms::from_pixels(Vec2::ZERO, surface, surface);
        assert_eq!(q.rect, [-1.0, 1.0, 1.0, -1.0]);
    }

    #[test]
    fn top_half_strip() {
        let q =
            QuadUniforms::from_pixels(Vec2::ZERO, Vec2::new(400.0, 100.0), Vec2::new(400.0, 200.0));
        assert_eq!(q.rect, [-1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn offset_panel_moves_right_and_down() {
        let q = QuadUniforms::from_pixels(
            Vec2::new(200.0, 150.0),
            Vec2::new(200.0, 150.0),
            Vec2::new(800.0, 600.0),
        );
        assert!((q.rect[0] - -0.5).abs() < 1e-6, "got {}", q.rect[0]);
        assert!((q.rect[1] - 0.5).abs() < 1e-6, "got {}", q.rect[1]);
        assert!((q.rect[2] - 0.0).abs() < 1e-6, "got {}", q.rect[2]);
        assert!((q.rect[3] - 0.0).abs() < 1e-6, "got {}", q.rect[3]);
    }

    #[test]
    fn zero_surface_does_not_divide_by_zero() {
        let q = QuadUniforms::from_pixels(Vec2::ZERO, Vec2::splat(10.0), Vec2::ZERO);
        assert!(q.rect.iter().all(|v| v.is_finite()));
    }
}
