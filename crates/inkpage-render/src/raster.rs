//! Software renderer drawing into a tiny-skia pixmap.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use inkpage_core::image::{DecodedImage, ImageId};
use inkpage_core::strokes::Stroke;
use kurbo::Affine;
use peniko::Color;
use tiny_skia::{
    FilterQuality, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Transform,
};

/// CPU rasterizer for frames and PNG export.
#[derive(Default)]
pub struct RasterRenderer {
    /// Last rendered frame.
    pixmap: Option<Pixmap>,
    /// Premultiplied copy of the base image. A session shows one photo at a
    /// time, so a single slot is enough.
    image_cache: Option<(ImageId, Pixmap)>,
}

impl RasterRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last rendered frame.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Encode the last rendered frame as PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let pixmap = self
            .pixmap
            .as_ref()
            .ok_or_else(|| RendererError::Export("nothing rendered yet".to_string()))?;
        pixmap
            .encode_png()
            .map_err(|e| RendererError::Export(e.to_string()))
    }

    fn cached_image(&mut self, image: &DecodedImage) -> RenderResult<()> {
        if self.image_cache.as_ref().is_some_and(|(id, _)| *id == image.id()) {
            return Ok(());
        }
        let size = IntSize::from_wh(image.width(), image.height())
            .ok_or_else(|| RendererError::RenderFailed("empty base image".to_string()))?;
        let pixmap = Pixmap::from_vec(premultiply(image.rgba()), size)
            .ok_or_else(|| RendererError::RenderFailed("base image size mismatch".to_string()))?;
        log::debug!("cached base image {}x{}", image.width(), image.height());
        self.image_cache = Some((image.id(), pixmap));
        Ok(())
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let width = (ctx.viewport_size.width * ctx.scale_factor).round();
        let height = (ctx.viewport_size.height * ctx.scale_factor).round();
        if !(width >= 1.0 && height >= 1.0) {
            return Err(RendererError::Surface(format!(
                "viewport {}x{} has no pixels",
                ctx.viewport_size.width, ctx.viewport_size.height
            )));
        }

        let ready_image = ctx.image.ready();
        if let Some(image) = ready_image {
            self.cached_image(image)?;
        }

        let transform = to_skia(Affine::scale(ctx.scale_factor) * ctx.camera.affine());
        let background = self.background_color(ctx);

        let pixmap = frame_target(&mut self.pixmap, width as u32, height as u32)?;
        pixmap.fill(to_skia_color(background));

        if let (Some(_), Some((_, image))) = (ready_image, &self.image_cache) {
            let paint = PixmapPaint {
                quality: FilterQuality::Bilinear,
                ..Default::default()
            };
            pixmap.draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
        }

        let mut paint = Paint::default();
        paint.set_color(to_skia_color(ctx.ink_color));
        paint.anti_alias = true;
        let pen = tiny_skia::Stroke {
            width: ctx.ink_width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        for stroke in ctx.strokes_in_order() {
            if let Some(path) = stroke_path(stroke) {
                pixmap.stroke_path(&path, &paint, &pen, transform, None);
            }
        }

        Ok(())
    }
}

/// Reuse the previous frame's pixmap when the size is unchanged.
fn frame_target(slot: &mut Option<Pixmap>, width: u32, height: u32) -> RenderResult<&mut Pixmap> {
    let reuse = slot
        .as_ref()
        .is_some_and(|p| p.width() == width && p.height() == height);
    if !reuse {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RendererError::Surface(format!("cannot allocate {width}x{height} frame"))
        })?;
        *slot = Some(pixmap);
    }
    slot.as_mut()
        .ok_or_else(|| RendererError::Surface("frame missing".to_string()))
}

/// Polyline through the stroke's points in content space.
///
/// A lone point becomes a zero-length segment so the round cap shows a dot.
fn stroke_path(stroke: &Stroke) -> Option<tiny_skia::Path> {
    let (first, rest) = stroke.points().split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    if rest.is_empty() {
        pb.line_to(first.x as f32, first.y as f32);
    }
    for point in rest {
        pb.line_to(point.x as f32, point.y as f32);
    }
    pb.finish()
}

fn to_skia(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Straight RGBA8 to the premultiplied layout tiny-skia stores.
fn premultiply(rgba: &[u8]) -> Vec<u8> {
    let mut out = rgba.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = px[3] as u16;
        for channel in &mut px[..3] {
            *channel = ((*channel as u16 * a + 127) / 255) as u8;
        }
    }
    out
}
