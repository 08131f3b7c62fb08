//! Decoded base images and the asynchronous loading seam.

use crate::error::DecodeError;
use kurbo::{Rect, Size};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Process-unique identity of a decoded image, used as a render cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(u64);

impl ImageId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Straight-alpha RGBA8 pixels of a decoded photo.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    id: ImageId,
    width: u32,
    height: u32,
    rgba: Arc<[u8]>,
}

impl DecodedImage {
    /// Wrap raw RGBA8 pixels, checking the buffer matches the dimensions.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, DecodeError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(DecodeError::Decode(format!(
                "{}x{} image needs {} bytes, got {}",
                width,
                height,
                expected,
                rgba.len()
            )));
        }
        Ok(Self {
            id: ImageId::next(),
            width,
            height,
            rgba: rgba.into(),
        })
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Content-space rectangle the image occupies (origin at top-left).
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.size())
    }
}

/// Turns the opaque encoded-image string of a page into pixels.
pub trait ImageLoader {
    fn load(&self, encoded: &str) -> BoxFuture<'static, Result<DecodedImage, DecodeError>>;
}

/// Handle for one outstanding image load; results for stale tickets are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageTicket(pub(crate) u64);

/// Base image state as seen by the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BaseImage {
    /// No page is active.
    #[default]
    Missing,
    /// Decoding is in flight.
    Pending(ImageTicket),
    Ready(DecodedImage),
    /// Decoding failed; only strokes are drawn.
    Failed(DecodeError),
}

impl BaseImage {
    /// The decoded image if it is ready to draw.
    pub fn ready(&self) -> Option<&DecodedImage> {
        match self {
            BaseImage::Ready(image) => Some(image),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(DecodedImage::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            DecodedImage::from_rgba(2, 2, vec![0; 15]),
            Err(DecodeError::Decode(_))
        ));
        assert!(DecodedImage::from_rgba(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = DecodedImage::from_rgba(1, 1, vec![0; 4]).unwrap();
        let b = DecodedImage::from_rgba(1, 1, vec![0; 4]).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_bounds() {
        let image = DecodedImage::from_rgba(3, 2, vec![0; 24]).unwrap();
        assert_eq!(image.bounds(), Rect::new(0.0, 0.0, 3.0, 2.0));
    }

    #[test]
    fn test_ready_accessor() {
        let image = DecodedImage::from_rgba(1, 1, vec![255; 4]).unwrap();
        assert!(BaseImage::Ready(image).ready().is_some());
        assert!(BaseImage::Pending(ImageTicket(1)).ready().is_none());
        assert!(BaseImage::Failed(DecodeError::Format("tiff".into())).ready().is_none());
    }
}
