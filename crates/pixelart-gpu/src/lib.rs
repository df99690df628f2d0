pub mod context;
pub mod error;
pub mod panel_texture;
pub mod renderer;

pub use context::GpuContext;
pub use error::GpuError;
pub use panel_texture::{PanelTexture, QuadUniforms};
pub use renderer::Presenter;
