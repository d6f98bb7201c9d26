//! Placement state machine.
//!
//! Owns the single current placement rectangle and the interaction
//! mode, and is the only mutator of either. The machine is tolerant:
//! an operation called in the wrong mode is ignored rather than an
//! error, but the result is tagged so callers (and tests) can tell.

use crate::constants::rect as rect_const;
use crate::geometry::{self, Point, Rect, ViewportFrame};

/// The current interaction mode of the placement surface.
///
/// Once a rectangle exists there is no path back to `Idle` except an
/// explicit [`PlacementState::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// No rectangle yet; the next click on the surface selects one.
    #[default]
    Idle,
    /// A rectangle exists and is waiting for drag, resize, or commit.
    PlacementPending,
    /// The rectangle body is being moved under the pointer.
    Dragging,
    /// The rectangle is being resized from its bottom-right corner.
    Resizing,
}

/// Tagged result of a state-machine operation.
///
/// `Ignored` means the operation was not valid in the current mode and
/// nothing changed. That is normal interaction tolerance, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Transition {
    /// The operation ran and state changed.
    Applied,
    /// The operation was invalid in the current mode; state unchanged.
    Ignored,
}

impl Transition {
    pub fn is_applied(self) -> bool {
        self == Transition::Applied
    }

    pub fn is_ignored(self) -> bool {
        self == Transition::Ignored
    }
}

/// The placement rectangle plus interaction mode, with the transition
/// rules between them.
#[derive(Debug, Clone, Default)]
pub struct PlacementState {
    mode: InteractionMode,
    rect: Option<Rect>,
    /// Pointer minus rectangle origin, recorded at drag start.
    drag_offset: Option<Point>,
    /// Rectangle top-left, fixed for the duration of a resize.
    resize_anchor: Option<Point>,
}

impl PlacementState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current interaction mode.
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Current placement rectangle, if one has been selected.
    pub fn rect(&self) -> Option<&Rect> {
        self.rect.as_ref()
    }

    /// Select a rectangle centered on `point`, clamped to the container.
    ///
    /// Valid only in `Idle`; once a rectangle exists, repeated calls are
    /// ignored and selecting again requires [`reset`](Self::reset).
    pub fn select_at(
        &mut self,
        point: Point,
        default_size: (f32, f32),
        container: &ViewportFrame,
    ) -> Transition {
        if self.mode != InteractionMode::Idle {
            return Transition::Ignored;
        }

        let rect = Rect::centered_at(point, default_size.0, default_size.1);
        let rect = geometry::clamp_to_container(&rect, container);
        log::debug!(
            "Rectangle selected at ({:.1}, {:.1}) -> origin ({:.1}, {:.1})",
            point.x,
            point.y,
            rect.x,
            rect.y
        );

        self.rect = Some(rect);
        self.mode = InteractionMode::PlacementPending;
        Transition::Applied
    }

    /// Start dragging; records the offset between pointer and origin.
    pub fn begin_drag(&mut self, pointer: Point) -> Transition {
        if self.mode != InteractionMode::PlacementPending {
            return Transition::Ignored;
        }
        let Some(rect) = self.rect else {
            return Transition::Ignored;
        };

        self.drag_offset = Some(Point::new(pointer.x - rect.x, pointer.y - rect.y));
        self.mode = InteractionMode::Dragging;
        log::debug!("Drag started at ({:.1}, {:.1})", pointer.x, pointer.y);
        Transition::Applied
    }

    /// Move the rectangle under the pointer, clamped to the container.
    pub fn update_drag(&mut self, pointer: Point, container: &ViewportFrame) -> Transition {
        if self.mode != InteractionMode::Dragging {
            return Transition::Ignored;
        }
        let (Some(rect), Some(offset)) = (self.rect.as_mut(), self.drag_offset) else {
            return Transition::Ignored;
        };

        let moved = Rect::new(
            pointer.x - offset.x,
            pointer.y - offset.y,
            rect.width,
            rect.height,
        );
        *rect = geometry::clamp_to_container(&moved, container);
        Transition::Applied
    }

    /// Finish the drag; the rectangle stays where it was released.
    pub fn end_drag(&mut self) -> Transition {
        if self.mode != InteractionMode::Dragging {
            return Transition::Ignored;
        }

        self.drag_offset = None;
        self.mode = InteractionMode::PlacementPending;
        log::debug!("Drag ended");
        Transition::Applied
    }

    /// Start resizing; the top-left corner is anchored for the gesture.
    pub fn begin_resize(&mut self, pointer: Point) -> Transition {
        if self.mode != InteractionMode::PlacementPending {
            return Transition::Ignored;
        }
        let Some(rect) = self.rect else {
            return Transition::Ignored;
        };

        self.resize_anchor = Some(rect.top_left());
        self.mode = InteractionMode::Resizing;
        log::debug!("Resize started at ({:.1}, {:.1})", pointer.x, pointer.y);
        Transition::Applied
    }

    /// Resize toward the pointer, floored at the minimum dimensions.
    ///
    /// The rectangle may grow past the container edge during resize;
    /// only drag and initial selection clamp to the container.
    pub fn update_resize(&mut self, pointer: Point) -> Transition {
        if self.mode != InteractionMode::Resizing {
            return Transition::Ignored;
        }
        let (Some(rect), Some(anchor)) = (self.rect.as_mut(), self.resize_anchor) else {
            return Transition::Ignored;
        };

        rect.x = anchor.x;
        rect.y = anchor.y;
        rect.width = (pointer.x - anchor.x).max(rect_const::MIN_WIDTH);
        rect.height = (pointer.y - anchor.y).max(rect_const::MIN_HEIGHT);
        Transition::Applied
    }

    /// Finish the resize.
    pub fn end_resize(&mut self) -> Transition {
        if self.mode != InteractionMode::Resizing {
            return Transition::Ignored;
        }

        self.resize_anchor = None;
        self.mode = InteractionMode::PlacementPending;
        log::debug!("Resize ended");
        Transition::Applied
    }

    /// Discard the rectangle and return to `Idle`.
    pub fn reset(&mut self) -> Transition {
        if self.mode == InteractionMode::Idle && self.rect.is_none() {
            return Transition::Ignored;
        }

        self.rect = None;
        self.drag_offset = None;
        self.resize_anchor = None;
        self.mode = InteractionMode::Idle;
        log::debug!("Placement reset");
        Transition::Applied
    }
}

// ============================================================================
// Tests
// ============================================================================
