//! Page activation, asynchronous decode, drawing and rendering together.

use image::{ImageFormat, Rgba, RgbaImage};
use inkpage_core::{BaseImage, ImageLoader, Page, PointerEvent, SessionContext};
use inkpage_render::{ImageDecoder, RasterRenderer, RenderContext, Renderer, to_data_url};
use kurbo::Size;
use std::io::Cursor;

fn white_photo_url(width: u32, height: u32) -> String {
    let img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png).unwrap();
    to_data_url(&cursor.into_inner(), "image/png")
}

fn rgba_at(renderer: &RasterRenderer, x: u32, y: u32) -> [u8; 4] {
    let p = renderer.pixmap().unwrap().pixel(x, y).unwrap();
    [p.red(), p.green(), p.blue(), p.alpha()]
}

#[test]
fn renders_without_image_until_decoded() {
    let _ = env_logger::builder().is_test(true).try_init();
    let page = Page::new(white_photo_url(32, 32));
    let mut session = SessionContext::default();
    let mut renderer = RasterRenderer::new();
    let viewport = Size::new(64.0, 64.0);

    let ticket = session.on_page_activated(&page);
    let pending = ImageDecoder::new().load(&page.image);

    session.dispatch(PointerEvent::down(1, 4.0, 8.0));
    session.dispatch(PointerEvent::moved(1, 28.0, 8.0));
    renderer
        .render(&RenderContext::from_session(&session, viewport))
        .unwrap();
    assert_eq!(rgba_at(&renderer, 16, 20), [250, 250, 250, 255]);

    let decoded = pollster::block_on(pending);
    assert!(session.on_image_decoded(ticket, decoded));
    assert!(matches!(session.image(), BaseImage::Ready(_)));

    session.dispatch(PointerEvent::up(1, 28.0, 8.0));
    renderer
        .render(&RenderContext::from_session(&session, viewport))
        .unwrap();

    let photo = rgba_at(&renderer, 16, 20);
    assert!(photo.iter().all(|c| *c >= 250), "{photo:?}");
    let ink = rgba_at(&renderer, 16, 8);
    assert!(ink[..3].iter().all(|c| *c <= 5), "{ink:?}");
    assert_eq!(rgba_at(&renderer, 48, 48), [250, 250, 250, 255]);
}

#[test]
fn decode_failure_still_renders_ink() {
    let page = Page::new("data:image/png;base64,bm90IGEgcG5n");
    let mut session = SessionContext::default();
    let ticket = session.on_page_activated(&page);

    let result = pollster::block_on(ImageDecoder::new().load(&page.image));
    assert!(result.is_err());
    session.on_image_decoded(ticket, result);

    session.dispatch(PointerEvent::down(1, 4.0, 8.0));
    session.dispatch(PointerEvent::moved(1, 28.0, 8.0));
    session.dispatch(PointerEvent::up(1, 28.0, 8.0));

    let mut renderer = RasterRenderer::new();
    renderer
        .render(&RenderContext::from_session(&session, Size::new(32.0, 32.0)))
        .unwrap();
    let ink = rgba_at(&renderer, 16, 8);
    assert!(ink[..3].iter().all(|c| *c <= 5), "{ink:?}");
}
