//! sigplace - signature placement engine for PDF e-signing.
//!
//! Positions a signature overlay on a rendered document preview and
//! maps the on-screen rectangle into PDF page coordinates for the
//! signing backend. The host application renders the document, captures
//! the signature image, and feeds pointer events in; the engine owns
//! the placement rectangle, the interaction state machine, and the
//! commit-time validation and payload packaging.

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod payload;
pub mod placement;
pub mod submit;

pub use config::PlacementConfig;
pub use controller::{
    ContainerMetrics, HitTarget, InteractionController, NoopCapture, PointerCapture, PointerEvent,
};
pub use error::PlacementError;
pub use geometry::{PageFrame, Point, Rect, ViewportFrame};
pub use payload::{ImageEncoding, PlacementPayload, SignatureAsset, build_payload};
pub use placement::{InteractionMode, PlacementState, Transition};
pub use submit::{SigningBackend, SubmitOutcome, commit};
