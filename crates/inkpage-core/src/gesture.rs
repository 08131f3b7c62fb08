//! Gesture recognition: one pointer draws, two pointers pinch-zoom and pan.
//!
//! The pointer count is the only discriminator. Transitions are computed by
//! [`GestureState::next`], a pure function of the current state, the event and
//! the live pointer set; [`GestureController`] applies the resulting actions
//! to a [`Camera`] and a [`StrokeStore`].

use crate::camera::Camera;
use crate::error::InvalidState;
use crate::input::{PointerEvent, PointerId, PointerPhase, PointerSet};
use crate::strokes::StrokeStore;
use kurbo::{Point, Vec2};

/// What the pointers are currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// A single pointer is laying down ink.
    Drawing { pointer: PointerId },
    /// Two pointers are zooming and panning.
    Pinching {
        /// Distance between the pointers at the last sample.
        last_distance: Option<f64>,
        /// Midpoint between the pointers at the last sample.
        last_midpoint: Point,
    },
}

/// Why an in-progress stroke was sealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SealReason {
    /// The drawing pointer lifted normally.
    Released,
    /// The platform cancelled the drawing pointer.
    Cancelled,
    /// Another pointer went down and turned the gesture into a pinch.
    Interrupted,
    /// The host paused (backgrounded) mid-stroke.
    LifecyclePause,
    /// The page was switched away mid-stroke.
    PageDeactivated,
}

/// Side effect of a transition, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    BeginStroke(Point),
    AppendPoint(Point),
    SealStroke(SealReason),
    Pan(Vec2),
    Zoom { focal: Point, ratio: f64 },
}

/// Result of [`GestureState::next`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GestureState,
    pub actions: Vec<GestureAction>,
}

impl Transition {
    fn stay(state: GestureState) -> Self {
        Self {
            state,
            actions: Vec::new(),
        }
    }

    fn to(state: GestureState, actions: Vec<GestureAction>) -> Self {
        Self { state, actions }
    }
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, GestureState::Drawing { .. })
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self, GestureState::Pinching { .. })
    }

    /// Compute the next state for `event`.
    ///
    /// `pointers` is the live set with `event` already applied. Only fresh
    /// presses, moves of pressed pointers and releases of pressed pointers
    /// are expected here; [`GestureController`] filters out the rest.
    pub fn next(
        self,
        event: &PointerEvent,
        pointers: &PointerSet,
        draw_enabled: bool,
    ) -> Transition {
        match event.phase {
            PointerPhase::Down => self.on_down(event, pointers, draw_enabled),
            PointerPhase::Move => self.on_move(event, pointers),
            PointerPhase::Up => self.on_release(event, pointers, SealReason::Released),
            PointerPhase::Cancel => self.on_release(event, pointers, SealReason::Cancelled),
        }
    }

    fn on_down(
        self,
        event: &PointerEvent,
        pointers: &PointerSet,
        draw_enabled: bool,
    ) -> Transition {
        match (pointers.len(), self) {
            (1, GestureState::Idle) if draw_enabled => Transition::to(
                GestureState::Drawing {
                    pointer: event.pointer_id,
                },
                vec![GestureAction::BeginStroke(event.position)],
            ),
            (2, GestureState::Idle | GestureState::Drawing { .. }) => {
                let mut actions = Vec::new();
                if self.is_drawing() {
                    actions.push(GestureAction::SealStroke(SealReason::Interrupted));
                }
                let state = GestureState::Pinching {
                    last_distance: pointers.pinch_distance(),
                    last_midpoint: pointers.pinch_midpoint().unwrap_or(event.position),
                };
                Transition::to(state, actions)
            }
            (1 | 2, state) => Transition::stay(state),
            (_, state) => Self::force_idle(state),
        }
    }

    fn on_move(self, event: &PointerEvent, pointers: &PointerSet) -> Transition {
        match self {
            GestureState::Drawing { pointer } if pointer == event.pointer_id => {
                Transition::to(self, vec![GestureAction::AppendPoint(event.position)])
            }
            GestureState::Pinching {
                last_distance,
                last_midpoint,
            } => {
                let (Some(distance), Some(midpoint)) =
                    (pointers.pinch_distance(), pointers.pinch_midpoint())
                else {
                    return Self::force_idle(self);
                };

                let ratio = match last_distance {
                    Some(last) if last > 0.0 => distance / last,
                    _ => {
                        log::debug!("{}; zoom ratio treated as 1", InvalidState::NoDistanceSample);
                        1.0
                    }
                };

                Transition::to(
                    GestureState::Pinching {
                        last_distance: Some(distance),
                        last_midpoint: midpoint,
                    },
                    vec![
                        GestureAction::Pan(midpoint - last_midpoint),
                        GestureAction::Zoom {
                            focal: midpoint,
                            ratio,
                        },
                    ],
                )
            }
            state => Transition::stay(state),
        }
    }

    fn on_release(
        self,
        event: &PointerEvent,
        pointers: &PointerSet,
        reason: SealReason,
    ) -> Transition {
        match self {
            GestureState::Drawing { pointer } if pointer == event.pointer_id => Transition::to(
                GestureState::Idle,
                vec![GestureAction::SealStroke(reason)],
            ),
            GestureState::Drawing { .. } if pointers.len() == 1 => Transition::stay(self),
            GestureState::Pinching { .. } if pointers.len() == 2 => Transition::stay(self),
            state => Self::force_idle(state),
        }
    }

    /// Drop to Idle, sealing (never discarding) a stroke in progress.
    fn force_idle(state: GestureState) -> Transition {
        let actions = if state.is_drawing() {
            vec![GestureAction::SealStroke(SealReason::Interrupted)]
        } else {
            Vec::new()
        };
        Transition::to(GestureState::Idle, actions)
    }
}

/// What a dispatched event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// The camera or the strokes changed; the frame must be redrawn.
    pub redraw: bool,
    /// A new stroke was opened.
    pub began_stroke: bool,
    /// A stroke was sealed, and why.
    pub sealed: Option<SealReason>,
}

/// Tracks live pointers and drives the camera and stroke store.
#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    pointers: PointerSet,
    draw_enabled: bool,
}

impl Default for GestureController {
    fn default() -> Self {
        Self {
            state: GestureState::Idle,
            pointers: PointerSet::new(),
            draw_enabled: true,
        }
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn pointers(&self) -> &PointerSet {
        &self.pointers
    }

    pub fn draw_enabled(&self) -> bool {
        self.draw_enabled
    }

    /// Toggle drawing. Takes effect on the next single-pointer press.
    pub fn set_draw_enabled(&mut self, enabled: bool) {
        self.draw_enabled = enabled;
    }

    /// Process one pointer event to completion.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        camera: &mut Camera,
        strokes: &mut StrokeStore,
    ) -> DispatchOutcome {
        let id = event.pointer_id;
        let accepted = match event.phase {
            PointerPhase::Down => {
                let fresh = self.pointers.press(id, event.position);
                if !fresh {
                    log::debug!("pointer {id} pressed twice; position updated");
                }
                fresh
            }
            // Hover moves of pointers that never went down are ignored.
            PointerPhase::Move => self.pointers.update(id, event.position),
            PointerPhase::Up | PointerPhase::Cancel => {
                let known = self.pointers.release(id);
                if !known {
                    log::debug!("release of unknown pointer {id} ignored");
                }
                known
            }
        };
        if !accepted {
            return DispatchOutcome::default();
        }

        let transition = self.state.next(&event, &self.pointers, self.draw_enabled);
        if !same_variant(&transition.state, &self.state) {
            log::debug!("gesture {:?} -> {:?}", self.state, transition.state);
        }
        self.state = transition.state;

        let mut outcome = DispatchOutcome::default();
        for action in transition.actions {
            apply(action, camera, strokes, &mut outcome);
        }
        outcome
    }

    /// Seal any in-progress stroke and forget every pointer.
    ///
    /// Used when the host is paused or the page goes away: no matching
    /// pointer-up is guaranteed to follow.
    pub fn flush(&mut self, strokes: &mut StrokeStore, reason: SealReason) -> Option<SealReason> {
        self.state = GestureState::Idle;
        self.pointers.clear();
        strokes.seal_current().then_some(reason)
    }
}

fn same_variant(a: &GestureState, b: &GestureState) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

fn apply(
    action: GestureAction,
    camera: &mut Camera,
    strokes: &mut StrokeStore,
    outcome: &mut DispatchOutcome,
) {
    match action {
        GestureAction::BeginStroke(screen) => {
            strokes.begin_stroke(camera.to_content(screen));
            outcome.began_stroke = true;
            outcome.redraw = true;
        }
        GestureAction::AppendPoint(screen) => {
            match strokes.append_to_current(camera.to_content(screen)) {
                Ok(()) => outcome.redraw = true,
                Err(e) => log::debug!("ignoring draw move: {e}"),
            }
        }
        GestureAction::SealStroke(reason) => {
            if strokes.seal_current() {
                outcome.sealed = Some(reason);
                outcome.redraw = true;
            }
        }
        GestureAction::Pan(delta) => {
            if delta != Vec2::ZERO {
                camera.pan(delta);
                outcome.redraw = true;
            }
        }
        GestureAction::Zoom { focal, ratio } => {
            camera.apply_zoom(focal, ratio);
            outcome.redraw = true;
        }
    }
}
