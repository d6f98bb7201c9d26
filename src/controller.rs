//! Pointer-event binding for the placement surface.
//!
//! The controller turns low-level pointer streams (down/move/up, mouse
//! or touch) into placement state transitions. It recovers
//! container-relative coordinates from raw client positions, hit-tests
//! pointer-downs against the rectangle and its resize handle, and owns
//! the global capture subscription that tracks move/up outside the
//! container while a gesture is active.

use crate::config::PlacementConfig;
use crate::error::PlacementError;
use crate::geometry::{Point, ViewportFrame};
use crate::payload::SignatureAsset;
use crate::placement::{InteractionMode, PlacementState, Transition};
use crate::submit::{self, SigningBackend, SubmitOutcome};

// ============================================================================
// Container Measurement
// ============================================================================

/// The container's position in client space, measured per event.
///
/// The document surface lives in a scrollable container; a pointer's
/// client coordinates become container-relative by subtracting the
/// container origin and adding back the scroll offset. Re-measured on
/// every event because the surface may reflow between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerMetrics {
    /// Container origin in client space (bounding rect top-left)
    pub origin_x: f32,
    pub origin_y: f32,
    /// Scroll offsets of the container
    pub scroll_x: f32,
    pub scroll_y: f32,
    /// On-screen size of the rendered document surface
    pub frame: ViewportFrame,
}

impl ContainerMetrics {
    pub fn new(origin_x: f32, origin_y: f32, scroll_x: f32, scroll_y: f32, frame: ViewportFrame) -> Self {
        Self {
            origin_x,
            origin_y,
            scroll_x,
            scroll_y,
            frame,
        }
    }

    /// Metrics for an unscrolled container at the client origin.
    pub fn unscrolled(frame: ViewportFrame) -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, frame)
    }

    /// Convert a client-space point to container-relative coordinates.
    pub fn to_container(&self, client: Point) -> Point {
        Point::new(
            client.x - self.origin_x + self.scroll_x,
            client.y - self.origin_y + self.scroll_y,
        )
    }
}

// ============================================================================
// Pointer Events and Hit Testing
// ============================================================================

/// A low-level pointer event in client coordinates.
///
/// Mouse and touch streams both reduce to this shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The resize handle at the rectangle's bottom-right corner
    Handle,
    /// The rectangle body
    Body,
    /// Empty document surface
    Surface,
}

// ============================================================================
// Pointer Capture
// ============================================================================

/// Scoped subscription for global move/up tracking.
///
/// While a drag or resize is active the host must deliver pointer moves
/// even when they leave the container (in a browser, listeners on
/// `document`). `acquire` is called on every entry to
/// `Dragging`/`Resizing` and `release` on every exit path, including
/// a reset mid-gesture; the pair always balances.
pub trait PointerCapture {
    fn acquire(&mut self);
    fn release(&mut self);
}

/// Capture for hosts that already deliver global pointer events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCapture;

impl PointerCapture for NoopCapture {
    fn acquire(&mut self) {}
    fn release(&mut self) {}
}

// ============================================================================
// Interaction Controller
// ============================================================================

/// Binds pointer events to the placement state machine.
pub struct InteractionController<C: PointerCapture> {
    state: PlacementState,
    config: PlacementConfig,
    capture: C,
    capturing: bool,
}

impl<C: PointerCapture> InteractionController<C> {
    pub fn new(config: PlacementConfig, capture: C) -> Self {
        Self {
            state: PlacementState::new(),
            config,
            capture,
            capturing: false,
        }
    }

    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Classify a container-relative point against the current rectangle.
    ///
    /// The handle region is a square centered on the bottom-right
    /// corner and wins over the body where they overlap.
    pub fn hit_test(&self, point: Point) -> HitTarget {
        let Some(rect) = self.state.rect() else {
            return HitTarget::Surface;
        };

        let corner = rect.bottom_right();
        let half = self.config.handle_size / 2.0;
        if (point.x - corner.x).abs() <= half && (point.y - corner.y).abs() <= half {
            return HitTarget::Handle;
        }
        if rect.contains(point) {
            return HitTarget::Body;
        }
        HitTarget::Surface
    }

    /// Feed one pointer event through the state machine.
    pub fn handle_event(&mut self, event: PointerEvent, metrics: &ContainerMetrics) -> Transition {
        match event {
            PointerEvent::Down(client) => {
                let point = metrics.to_container(client);
                match self.state.mode() {
                    InteractionMode::Idle => {
                        self.state
                            .select_at(point, self.config.default_size(), &metrics.frame)
                    }
                    InteractionMode::PlacementPending => match self.hit_test(point) {
                        HitTarget::Handle => {
                            let t = self.state.begin_resize(point);
                            if t.is_applied() {
                                self.start_capture();
                            }
                            t
                        }
                        HitTarget::Body => {
                            let t = self.state.begin_drag(point);
                            if t.is_applied() {
                                self.start_capture();
                            }
                            t
                        }
                        HitTarget::Surface => {
                            // A rectangle exists; re-selecting requires reset.
                            log::debug!(
                                "Pointer down outside rectangle at ({:.1}, {:.1}) ignored",
                                point.x,
                                point.y
                            );
                            Transition::Ignored
                        }
                    },
                    InteractionMode::Dragging | InteractionMode::Resizing => Transition::Ignored,
                }
            }
            PointerEvent::Move(client) => {
                let point = metrics.to_container(client);
                match self.state.mode() {
                    InteractionMode::Dragging => self.state.update_drag(point, &metrics.frame),
                    InteractionMode::Resizing => self.state.update_resize(point),
                    _ => Transition::Ignored,
                }
            }
            PointerEvent::Up => match self.state.mode() {
                InteractionMode::Dragging => {
                    let t = self.state.end_drag();
                    self.stop_capture();
                    t
                }
                InteractionMode::Resizing => {
                    let t = self.state.end_resize();
                    self.stop_capture();
                    t
                }
                _ => Transition::Ignored,
            },
        }
    }

    /// Discard the placement and return to `Idle`.
    ///
    /// Releases the capture subscription if a gesture was in flight.
    pub fn reset(&mut self) -> Transition {
        self.stop_capture();
        self.state.reset()
    }

    /// Validate, build, and submit the placement.
    ///
    /// The viewport is measured by the caller at commit time, not
    /// cached from interaction. State effects follow the outcome:
    /// accepted clears placement, rejected/cancelled preserve it.
    pub fn commit(
        &mut self,
        viewport: &ViewportFrame,
        asset: Option<&SignatureAsset>,
        backend: &dyn SigningBackend,
    ) -> Result<SubmitOutcome, PlacementError> {
        let outcome = submit::commit(
            &mut self.state,
            viewport,
            &self.config.page,
            asset,
            backend,
        )?;
        if self.state.mode() == InteractionMode::Idle {
            self.stop_capture();
        }
        Ok(outcome)
    }

    fn start_capture(&mut self) {
        if !self.capturing {
            self.capture.acquire();
            self.capturing = true;
            log::debug!("Pointer capture acquired");
        }
    }

    fn stop_capture(&mut self) {
        if self.capturing {
            self.capture.release();
            self.capturing = false;
            log::debug!("Pointer capture released");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
