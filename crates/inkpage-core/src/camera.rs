//! View transform between screen space and content space.

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Default lower zoom bound.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;
/// Default upper zoom bound.
pub const DEFAULT_MAX_SCALE: f64 = 10.0;

/// Camera maps content space (the photo's own pixels) onto the screen.
///
/// `screen = content * scale + offset`. The scale always stays within
/// `[min_scale, max_scale]`; out-of-range requests are clamped, never rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Translation in screen pixels (pan).
    pub offset: Vec2,
    /// Current scale factor.
    scale: f64,
    /// Minimum allowed scale.
    min_scale: f64,
    /// Maximum allowed scale.
    max_scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }
}

impl Camera {
    /// Create an identity camera with default scale bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an identity camera with the given scale bounds.
    ///
    /// Bounds are swapped if given in the wrong order. The identity scale is
    /// clamped into them.
    pub fn with_bounds(min_scale: f64, max_scale: f64) -> Self {
        let mut camera = Self::default();
        camera.set_scale_bounds(min_scale, max_scale);
        camera
    }

    /// Current scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Minimum allowed scale.
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Maximum allowed scale.
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Change the scale bounds, re-clamping the current scale around the origin.
    pub fn set_scale_bounds(&mut self, min_scale: f64, max_scale: f64) {
        let (lo, hi) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = lo;
        self.max_scale = hi;
        let clamped = self.scale.clamp(lo, hi);
        if clamped != self.scale {
            self.offset *= clamped / self.scale;
            self.scale = clamped;
        }
    }

    /// Transform converting content coordinates to screen coordinates.
    pub fn affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Transform converting screen coordinates to content coordinates.
    pub fn inverse_affine(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to content coordinates.
    pub fn to_content(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    /// Convert a content point to screen coordinates.
    pub fn to_screen(&self, content: Point) -> Point {
        Point::new(
            content.x * self.scale + self.offset.x,
            content.y * self.scale + self.offset.y,
        )
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `ratio`, keeping the content point under `focal` fixed on screen.
    ///
    /// The offset is back-solved from the scale actually reached after
    /// clamping, so hitting a bound never drifts the focal point. Returns the
    /// applied ratio. Non-finite or non-positive ratios are ignored.
    pub fn apply_zoom(&mut self, focal: Point, ratio: f64) -> f64 {
        let ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            log::debug!("ignoring zoom ratio {ratio}");
            1.0
        };

        let new_scale = (self.scale * ratio).clamp(self.min_scale, self.max_scale);
        let applied = new_scale / self.scale;
        let focal = focal.to_vec2();
        self.offset = focal - (focal - self.offset) * applied;
        self.scale = new_scale;
        applied
    }

    /// Reset to identity (scale 1, no offset), clamped into the bounds.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0_f64.clamp(self.min_scale, self.max_scale);
    }

    /// Fit `bounds` (content space) into `viewport`, centered, with padding.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        if bounds.is_zero_area() {
            self.reset();
            return;
        }

        let padded = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );

        let scale_x = padded.width / bounds.width();
        let scale_y = padded.height / bounds.height();
        self.scale = scale_x.min(scale_y).clamp(self.min_scale, self.max_scale);

        let center = bounds.center();
        self.offset = Vec2::new(
            viewport.width / 2.0 - center.x * self.scale,
            viewport.height / 2.0 - center.y * self.scale,
        );
    }
}
