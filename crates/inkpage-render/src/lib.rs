//! InkPage Render Library
//!
//! Renderer abstraction, the tiny-skia software rasterizer and base-image
//! decoding for InkPage.

mod decode;
mod raster;
mod renderer;

pub use decode::{ImageDecoder, to_data_url};
pub use raster::RasterRenderer;
pub use renderer::{
    DEFAULT_INK_WIDTH, INK_BLACK, INK_BLUE, INK_RED, RenderContext, RenderResult, Renderer,
    RendererError,
};
