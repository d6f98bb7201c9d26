//! Engine constants: rectangle limits, handle sizing, backend contract.

/// Placement rectangle limits and defaults, in screen pixels.
pub mod rect {
    /// Minimum rectangle width; resize floors here
    pub const MIN_WIDTH: f32 = 80.0;
    /// Minimum rectangle height; resize floors here
    pub const MIN_HEIGHT: f32 = 40.0;
    /// Width of a freshly selected rectangle
    pub const DEFAULT_WIDTH: f32 = 150.0;
    /// Height of a freshly selected rectangle
    pub const DEFAULT_HEIGHT: f32 = 75.0;
}

/// Resize handle dimensions.
pub mod handle {
    /// Side length of the square hit region at the bottom-right corner
    pub const SIZE: f32 = 14.0;
}

/// Payload fields fixed by the signing backend contract.
pub mod payload {
    /// Only single-page documents are supported
    pub const PAGE_NUMBER: u32 = 1;
}
