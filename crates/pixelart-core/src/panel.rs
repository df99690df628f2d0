//! A panel: one rectangular region of a screen, its base content and the
//! compositor that turns that content into the displayed frame.

use std::sync::Arc;

use glam::{UVec2, Vec2, Vec4};

use crate::binder::UniformBinder;
use crate::compositor::Compositor;
use crate::error::PixelResult;
use crate::image::{Bitmap, Frame};
use crate::uniforms::TAP;
use crate::FrameContext;

/// What a panel shows before any stage runs.
#[derive(Debug, Clone)]
pub enum Content {
    /// Backing bitmap, stretched to the panel size.
    Photo(Arc<Bitmap>),
    /// Solid premultiplied colour.
    Fill(Vec4),
}

impl Content {
    pub fn bitmap(&self) -> Option<&Arc<Bitmap>> {
        match self {
            Content::Photo(bitmap) => Some(bitmap),
            Content::Fill(_) => None,
        }
    }

    fn base_frame(&self, size: UVec2) -> Frame {
        match self {
            Content::Photo(bitmap) => Frame::resampled(bitmap.as_ref(), size.x, size.y),
            Content::Fill(color) => Frame::filled(size.x, size.y, *color),
        }
    }
}

#[derive(Debug)]
pub struct Panel {
    name: &'static str,
    content: Option<Content>,
    compositor: Compositor,
    binder: UniformBinder,
    offset: Vec2,
    draggable: bool,
    /// Last tap on this panel, in panel pixels.
    tap: Option<Vec2>,
    base: Option<Frame>,
    output: Option<Frame>,
}

impl Panel {
    pub fn new(name: &'static str, content: Content, compositor: Compositor) -> Self {
        Self {
            name,
            content: Some(content),
            compositor,
            binder: UniformBinder::new(),
            offset: Vec2::ZERO,
            draggable: false,
            tap: None,
            base: None,
            output: None,
        }
    }

    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> Option<UVec2> {
        self.binder.resolution()
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Torn-down panels hold nothing and ignore every call.
    pub fn is_live(&self) -> bool {
        self.content.is_some()
    }

    pub fn backing(&self) -> Option<&Arc<Bitmap>> {
        self.content.as_ref().and_then(Content::bitmap)
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Whether any kernel of this panel reacts to taps.
    pub fn accepts_taps(&self) -> bool {
        self.compositor
            .instances()
            .any(|instance| instance.uniforms().declares(TAP.name))
    }

    pub fn tap(&self) -> Option<Vec2> {
        self.tap
    }

    /// Keep `position` as this panel's tap. Returns `false`, keeping nothing,
    /// when no kernel here reacts to taps or the panel is torn down.
    pub fn record_tap(&mut self, position: Vec2) -> bool {
        if !self.is_live() || !self.accepts_taps() {
            return false;
        }
        self.tap = Some(position);
        true
    }

    pub fn resize(&mut self, width: u32, height: u32) -> PixelResult<()> {
        let Some(content) = &self.content else {
            return Ok(());
        };
        if self.size() == Some(UVec2::new(width, height)) {
            return Ok(());
        }
        self.binder
            .resize(width, height, self.compositor.instances_mut())?;
        self.base = self.binder.resolution().map(|size| content.base_frame(size));
        self.output = None;
        log::debug!("panel '{}' resized to {width}x{height}", self.name);
        Ok(())
    }

    pub fn drag_by(&mut self, delta: Vec2) {
        if self.draggable && self.is_live() {
            self.offset += delta;
        }
    }

    /// Bind this frame's values and run the stages. `None` while the panel has
    /// no usable size (or after teardown); no kernel runs in that case.
    pub fn render(&mut self, ctx: &FrameContext) -> PixelResult<Option<&Frame>> {
        let (Some(content), Some(base)) = (&self.content, &self.base) else {
            log::trace!("panel '{}' has no size yet; frame skipped", self.name);
            return Ok(None);
        };
        let bound = self
            .binder
            .bind_frame(ctx, content.bitmap(), self.tap, self.compositor.instances_mut())?;
        if !bound {
            return Ok(None);
        }
        self.output = Some(self.compositor.run(base.clone()));
        Ok(self.output.as_ref())
    }

    /// Last rendered frame, if any.
    pub fn output(&self) -> Option<&Frame> {
        self.output.as_ref()
    }

    /// Release the backing bitmap and every binding. Idempotent.
    pub fn teardown(&mut self) {
        if self.content.take().is_none() {
            return;
        }
        for instance in self.compositor.instances_mut() {
            instance.uniforms_mut().clear_all();
        }
        self.binder = UniformBinder::new();
        self.tap = None;
        self.base = None;
        self.output = None;
        log::debug!("panel '{}' torn down", self.name);
    }
}
