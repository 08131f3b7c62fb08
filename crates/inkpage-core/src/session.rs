//! Per-page editing session: the state every input handler and redraw shares.
//!
//! The host UI owns one [`SessionContext`] and passes it to [`dispatch`] for
//! every pointer event. Page activation, image decoding and lifecycle pauses
//! come in through the `on_*` hooks.

use crate::camera::Camera;
use crate::config::SessionConfig;
use crate::error::DecodeError;
use crate::gesture::{DispatchOutcome, GestureController, GestureState, SealReason};
use crate::image::{BaseImage, DecodedImage, ImageTicket};
use crate::input::PointerEvent;
use crate::page::Page;
use crate::strokes::{Stroke, StrokeStore};
use kurbo::Size;

/// Camera, strokes, gestures and base image for the active page.
#[derive(Debug, Clone)]
pub struct SessionContext {
    config: SessionConfig,
    camera: Camera,
    strokes: StrokeStore,
    gestures: GestureController,
    image: BaseImage,
    next_ticket: u64,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl SessionContext {
    pub fn new(config: SessionConfig) -> Self {
        let config = config.normalized();
        let mut gestures = GestureController::new();
        gestures.set_draw_enabled(config.draw_enabled);
        Self {
            camera: Camera::with_bounds(config.min_scale, config.max_scale),
            config,
            strokes: StrokeStore::new(),
            gestures,
            image: BaseImage::Missing,
            next_ticket: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn strokes(&self) -> &StrokeStore {
        &self.strokes
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gestures.state()
    }

    pub fn image(&self) -> &BaseImage {
        &self.image
    }

    /// Toggle drawing; two-finger zoom keeps working either way.
    pub fn set_draw_enabled(&mut self, enabled: bool) {
        self.config.draw_enabled = enabled;
        self.gestures.set_draw_enabled(enabled);
    }

    /// Process one pointer event.
    pub fn dispatch(&mut self, event: PointerEvent) -> DispatchOutcome {
        self.gestures
            .handle(event, &mut self.camera, &mut self.strokes)
    }

    /// Start a session on `page`.
    ///
    /// The camera returns to identity, the strokes are copied out of the
    /// page and the image goes to `Pending`. The caller decodes `page.image`
    /// and reports back through [`on_image_decoded`](Self::on_image_decoded)
    /// with the returned ticket.
    ///
    /// Call [`on_page_deactivated`](Self::on_page_deactivated) first to keep
    /// the previous page's strokes. Otherwise a stroke in progress is sealed
    /// with [`SealReason::PageDeactivated`] and then dropped with the rest.
    pub fn on_page_activated(&mut self, page: &Page) -> ImageTicket {
        if let Some(reason) = self
            .gestures
            .flush(&mut self.strokes, SealReason::PageDeactivated)
        {
            log::warn!("page switched without deactivation; sealed stroke ({reason:?}) discarded");
        }
        self.strokes.replace(page.strokes().to_vec());
        log::info!("page activated with {} strokes", page.strokes().len());
        self.replace_image()
    }

    /// Request a new base image for the current page, keeping its strokes.
    ///
    /// The camera is reset now rather than when decoding finishes, so zooming
    /// done while the image loads is kept.
    pub fn replace_image(&mut self) -> ImageTicket {
        self.next_ticket += 1;
        let ticket = ImageTicket(self.next_ticket);
        self.camera.reset();
        self.image = BaseImage::Pending(ticket);
        ticket
    }

    /// Deliver the result of decoding. Returns whether a redraw is needed.
    pub fn on_image_decoded(
        &mut self,
        ticket: ImageTicket,
        result: Result<DecodedImage, DecodeError>,
    ) -> bool {
        if self.image != BaseImage::Pending(ticket) {
            log::debug!("dropping stale image result for {ticket:?}");
            return false;
        }
        self.image = match result {
            Ok(image) => {
                log::info!("base image ready ({}x{})", image.width(), image.height());
                BaseImage::Ready(image)
            }
            Err(e) => {
                log::warn!("base image failed to decode: {e}");
                BaseImage::Failed(e)
            }
        };
        true
    }

    /// End the session, sealing any stroke in progress.
    ///
    /// Returns the strokes to persist and releases everything tied to the page.
    pub fn on_page_deactivated(&mut self) -> Vec<Stroke> {
        if let Some(reason) = self
            .gestures
            .flush(&mut self.strokes, SealReason::PageDeactivated)
        {
            log::debug!("sealed stroke on deactivation ({reason:?})");
        }
        self.image = BaseImage::Missing;
        self.camera.reset();
        self.strokes.take()
    }

    /// Flush an abandoned gesture when the host is paused.
    pub fn on_lifecycle_pause(&mut self) -> Option<SealReason> {
        self.gestures
            .flush(&mut self.strokes, SealReason::LifecyclePause)
    }

    /// Fit the loaded image into `viewport`. Returns false until it is ready.
    pub fn fit_image(&mut self, viewport: Size, padding: f64) -> bool {
        match self.image.ready() {
            Some(image) => {
                let bounds = image.bounds();
                self.camera.fit_to_bounds(bounds, viewport, padding);
                true
            }
            None => false,
        }
    }

    /// Build the record to persist for the current page.
    pub fn to_page(&self, image: impl Into<String>) -> Page {
        Page::new(image).with_strokes(self.strokes.strokes().to_vec())
    }
}

/// Process one pointer event against `ctx`.
pub fn dispatch(ctx: &mut SessionContext, event: PointerEvent) -> DispatchOutcome {
    ctx.dispatch(event)
}
