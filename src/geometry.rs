//! Viewport geometry: screen-space to page-space coordinate mapping.
//!
//! Screen space is pixels relative to the scrollable document-preview
//! container, origin top-left. Page space is PDF points, origin
//! bottom-left, fixed page dimensions. The functions here are pure and
//! deterministic so the mapping can be verified with literal inputs.

use serde::{Deserialize, Serialize};

use crate::error::PlacementError;

// ============================================================================
// Core Geometry Types
// ============================================================================

/// A 2D point in screen coordinates (container-relative pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, top-left anchored.
///
/// The same type carries screen-pixel or page-point values; which space
/// a given rectangle lives in is determined by where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner X coordinate
    pub x: f32,
    /// Top-left corner Y coordinate
    pub y: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle of the given size centered on a point.
    pub fn centered_at(center: Point, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    /// Get the center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get the top-left corner.
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Get the bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Check if a point is inside the rectangle (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// The on-screen rendered size of the document surface, in pixels.
///
/// Measured at interaction time; the surface may reflow (window resize,
/// zoom), so callers re-measure rather than cache this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportFrame {
    pub width: f32,
    pub height: f32,
}

impl ViewportFrame {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A zero-area viewport has no defined scale factor.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// PDF page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageFrame {
    pub width: f32,
    pub height: f32,
}

impl PageFrame {
    /// ISO A4 portrait in points.
    pub const A4: PageFrame = PageFrame {
        width: 595.28,
        height: 841.89,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PageFrame {
    fn default() -> Self {
        Self::A4
    }
}

// ============================================================================
// Coordinate Mapping
// ============================================================================

/// Convert a screen-space rectangle to page-space (PDF points).
///
/// Scales each axis by `page / viewport` and flips the Y axis: screen
/// origin is top-left, PDF origin is bottom-left, so the page Y is
/// measured from the rectangle's bottom edge up from the page bottom.
/// Outputs are rounded to the nearest integer point, which is what the
/// signing backend consumes.
///
/// Errors with [`PlacementError::DegenerateViewport`] when either
/// viewport dimension is zero; callers must pass a measured viewport.
pub fn to_page_space(
    rect: &Rect,
    viewport: &ViewportFrame,
    page: &PageFrame,
) -> Result<Rect, PlacementError> {
    if viewport.is_degenerate() {
        return Err(PlacementError::degenerate_viewport(
            viewport.width,
            viewport.height,
        ));
    }

    let sx = page.width / viewport.width;
    let sy = page.height / viewport.height;

    Ok(Rect {
        x: (rect.x * sx).round(),
        y: ((viewport.height - rect.y - rect.height) * sy).round(),
        width: (rect.width * sx).round(),
        height: (rect.height * sy).round(),
    })
}

/// Convert a page-space rectangle back to screen-space pixels.
///
/// Exact inverse of [`to_page_space`] minus its rounding; round-trips
/// within one point for any rectangle inside the viewport.
pub fn to_screen_space(
    rect: &Rect,
    viewport: &ViewportFrame,
    page: &PageFrame,
) -> Result<Rect, PlacementError> {
    if viewport.is_degenerate() {
        return Err(PlacementError::degenerate_viewport(
            viewport.width,
            viewport.height,
        ));
    }

    let sx = viewport.width / page.width;
    let sy = viewport.height / page.height;

    Ok(Rect {
        x: rect.x * sx,
        y: viewport.height - (rect.y + rect.height) * sy,
        width: rect.width * sx,
        height: rect.height * sy,
    })
}

/// Clamp a rectangle's position so it stays inside the container.
///
/// Only `x` and `y` move; size is untouched. When the container is
/// smaller than the rectangle the position clamps to 0, never negative.
pub fn clamp_to_container(rect: &Rect, container: &ViewportFrame) -> Rect {
    let max_x = (container.width - rect.width).max(0.0);
    let max_y = (container.height - rect.height).max(0.0);

    Rect {
        x: rect.x.clamp(0.0, max_x),
        y: rect.y.clamp(0.0, max_y),
        width: rect.width,
        height: rect.height,
    }
}

// ============================================================================
// Tests
// ============================================================================
