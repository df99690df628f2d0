use crate::uniforms::UniformKind;

#[derive(Debug, thiserror::Error)]
pub enum PixelError {
    #[error("kernel '{kernel}' declares no uniform named '{name}'")]
    UnknownUniform {
        kernel: &'static str,
        name: String,
    },
    #[error("uniform '{name}' expects a {expected:?} value, got {found:?}")]
    UniformType {
        name: &'static str,
        expected: UniformKind,
        found: UniformKind,
    },
    #[error("bitmap of {width}x{height} needs {expected} bytes, got {actual}")]
    BitmapSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("panel index {0} is out of range")]
    UnknownPanel(usize),
}

pub type PixelResult<T> = Result<T, PixelError>;
