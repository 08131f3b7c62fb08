//! Renderer trait abstraction.

use inkpage_core::camera::Camera;
use inkpage_core::image::BaseImage;
use inkpage_core::session::SessionContext;
use inkpage_core::strokes::Stroke;
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Export failed: {0}")]
    Export(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Pen colors offered by the toolbar.
///
/// Ink style belongs to the frame, not to a stroke: pages persist bare point
/// lists, so every stroke on the page is drawn with the context's
/// [`ink_color`](RenderContext::ink_color) and
/// [`ink_width`](RenderContext::ink_width).
pub const INK_BLACK: Color = Color::from_rgba8(0, 0, 0, 255);
pub const INK_RED: Color = Color::from_rgba8(0xE5, 0x39, 0x35, 255);
pub const INK_BLUE: Color = Color::from_rgba8(0x1E, 0x88, 0xE5, 255);

/// Default pen width in content pixels.
pub const DEFAULT_INK_WIDTH: f64 = 4.0;

/// Everything needed to draw one frame. Borrowed, never modified.
pub struct RenderContext<'a> {
    /// Content-to-screen mapping.
    pub camera: &'a Camera,
    /// Base photo; anything but `Ready` is drawn as background only.
    pub image: &'a BaseImage,
    /// Sealed strokes in drawing order.
    pub strokes: &'a [Stroke],
    /// Stroke still being drawn, drawn on top.
    pub current_stroke: Option<&'a Stroke>,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    pub background_color: Color,
    pub ink_color: Color,
    /// Pen width in content pixels, so ink thickens as the photo is zoomed.
    pub ink_width: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a render context from individual parts.
    pub fn new(
        camera: &'a Camera,
        image: &'a BaseImage,
        strokes: &'a [Stroke],
        viewport_size: Size,
    ) -> Self {
        Self {
            camera,
            image,
            strokes,
            current_stroke: None,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            ink_color: INK_BLACK,
            ink_width: DEFAULT_INK_WIDTH,
        }
    }

    /// Create a render context showing a session's current state.
    pub fn from_session(session: &'a SessionContext, viewport_size: Size) -> Self {
        Self::new(
            session.camera(),
            session.image(),
            session.strokes().strokes(),
            viewport_size,
        )
        .with_current_stroke(session.strokes().current())
    }

    /// Set the in-progress stroke.
    pub fn with_current_stroke(mut self, stroke: Option<&'a Stroke>) -> Self {
        self.current_stroke = stroke;
        self
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the pen color and width for every stroke in the frame.
    pub fn with_ink(mut self, color: Color, width: f64) -> Self {
        self.ink_color = color;
        self.ink_width = width;
        self
    }

    /// Strokes in the order they are drawn: sealed first, then the current one.
    pub fn strokes_in_order(&self) -> impl Iterator<Item = &'a Stroke> + 'a {
        self.strokes.iter().chain(self.current_stroke)
    }
}

/// Trait for rendering backends.
///
/// Implementations must draw the same pixels for the same context and must
/// not feed anything back into input handling.
pub trait Renderer {
    /// Draw a complete frame: clear, base image, then ink.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpage_core::input::PointerEvent;

    #[test]
    fn test_from_session_includes_current_stroke() {
        let mut session = SessionContext::default();
        session.dispatch(PointerEvent::down(1, 0.0, 0.0));
        session.dispatch(PointerEvent::up(1, 0.0, 0.0));
        session.dispatch(PointerEvent::down(1, 5.0, 5.0));

        let ctx = RenderContext::from_session(&session, Size::new(10.0, 10.0));
        assert_eq!(ctx.strokes.len(), 1);
        assert!(ctx.current_stroke.is_some());
        assert_eq!(ctx.strokes_in_order().count(), 2);
    }

    #[test]
    fn test_builder_overrides() {
        let camera = Camera::new();
        let image = BaseImage::Missing;
        let ctx = RenderContext::new(&camera, &image, &[], Size::new(1.0, 1.0))
            .with_ink(INK_RED, 2.0)
            .with_scale_factor(2.0);
        assert_eq!(ctx.ink_color, INK_RED);
        assert_eq!(ctx.ink_width, 2.0);
        assert_eq!(ctx.scale_factor, 2.0);
    }
}
