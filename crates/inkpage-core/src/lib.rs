//! InkPage Core Library
//!
//! Platform-agnostic gesture, transform and stroke logic for annotating
//! photos with freehand ink.

pub mod camera;
pub mod config;
pub mod error;
pub mod gesture;
pub mod image;
pub mod input;
pub mod page;
pub mod session;
pub mod storage;
pub mod strokes;

pub use camera::Camera;
pub use config::SessionConfig;
pub use error::{DecodeError, InvalidState};
pub use gesture::{DispatchOutcome, GestureController, GestureState, SealReason};
pub use image::{BaseImage, DecodedImage, ImageId, ImageLoader, ImageTicket};
pub use input::{PointerEvent, PointerId, PointerPhase, PointerSet};
pub use page::Page;
pub use session::{SessionContext, dispatch};
pub use storage::{MemoryStorage, Notebook, Storage, StorageError};
pub use strokes::{Stroke, StrokeStore};
