use std::sync::Arc;

use glam::{Vec2, Vec3, Vec4};

use crate::error::{PixelError, PixelResult};
use crate::image::Bitmap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    Float,
    Float2,
    Float3,
    Float4,
    Image,
}

/// One declared input of a kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformSlot {
    pub name: &'static str,
    pub kind: UniformKind,
}

impl UniformSlot {
    pub const fn new(name: &'static str, kind: UniformKind) -> Self {
        Self { name, kind }
    }
}

pub const RESOLUTION: UniformSlot = UniformSlot::new("resolution", UniformKind::Float2);
pub const TIME: UniformSlot = UniformSlot::new("time", UniformKind::Float);
pub const TINT: UniformSlot = UniformSlot::new("tint", UniformKind::Float4);
pub const TAP: UniformSlot = UniformSlot::new("tap", UniformKind::Float2);
pub const TEXTURE: UniformSlot = UniformSlot::new("texture", UniformKind::Image);

#[derive(Debug, Clone)]
pub enum UniformValue {
    Float(f32),
    Float2(Vec2),
    Float3(Vec3),
    Float4(Vec4),
    Image(Arc<Bitmap>),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Float2(_) => UniformKind::Float2,
            UniformValue::Float3(_) => UniformKind::Float3,
            UniformValue::Float4(_) => UniformKind::Float4,
            UniformValue::Image(_) => UniformKind::Image,
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        UniformValue::Float2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Float3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        UniformValue::Float4(v)
    }
}

impl From<Arc<Bitmap>> for UniformValue {
    fn from(v: Arc<Bitmap>) -> Self {
        UniformValue::Image(v)
    }
}

// ---------------------------------------------------------------------------
// Uniforms: the bindings of one kernel instance
// ---------------------------------------------------------------------------

/// Current values for the declared slots of a single kernel instance.
///
/// Writes are checked against the declaration (name and type). Reads of an
/// unbound scalar or vector slot return zero, which is what a fragment program
/// sees for a uniform the host never set.
#[derive(Debug, Clone)]
pub struct Uniforms {
    kernel: &'static str,
    slots: &'static [UniformSlot],
    values: Vec<Option<UniformValue>>,
}

impl Uniforms {
    pub fn new(kernel: &'static str, slots: &'static [UniformSlot]) -> Self {
        Self {
            kernel,
            slots,
            values: vec![None; slots.len()],
        }
    }

    pub fn slots(&self) -> &'static [UniformSlot] {
        self.slots
    }

    pub fn declares(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn set(&mut self, name: &str, value: impl Into<UniformValue>) -> PixelResult<()> {
        let value = value.into();
        let idx = self
            .index_of(name)
            .ok_or_else(|| PixelError::UnknownUniform {
                kernel: self.kernel,
                name: name.to_string(),
            })?;
        let slot = self.slots[idx];
        if slot.kind != value.kind() {
            return Err(PixelError::UniformType {
                name: slot.name,
                expected: slot.kind,
                found: value.kind(),
            });
        }
        self.values[idx] = Some(value);
        Ok(())
    }

    /// Forget a bound value; subsequent reads fall back to the default.
    pub fn clear(&mut self, name: &str) {
        if let Some(idx) = self.index_of(name) {
            self.values[idx] = None;
        }
    }

    pub fn clear_all(&mut self) {
        self.values.iter_mut().for_each(|v| *v = None);
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.index_of(name).and_then(|idx| self.values[idx].as_ref())
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn float(&self, name: &str) -> f32 {
        match self.get(name) {
            Some(UniformValue::Float(v)) => *v,
            _ => 0.0,
        }
    }

    pub fn float2(&self, name: &str) -> Vec2 {
        match self.get(name) {
            Some(UniformValue::Float2(v)) => *v,
            _ => Vec2::ZERO,
        }
    }

    pub fn float3(&self, name: &str) -> Vec3 {
        match self.get(name) {
            Some(UniformValue::Float3(v)) => *v,
            _ => Vec3::ZERO,
        }
    }

    pub fn float4(&self, name: &str) -> Vec4 {
        match self.get(name) {
            Some(UniformValue::Float4(v)) => *v,
            _ => Vec4::ZERO,
        }
    }

    pub fn image(&self, name: &str) -> Option<&Arc<Bitmap>> {
        match self.get(name) {
            Some(UniformValue::Image(bitmap)) => Some(bitmap),
            _ => None,
        }
    }

    pub fn resolution(&self) -> Vec2 {
        self.float2(RESOLUTION.name)
    }

    pub fn time(&self) -> f32 {
        self.float(TIME.name)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.name == name)
    }
}
