//! Submission seam between the placement engine and the signing backend.
//!
//! The backend call is the one suspension point in the engine. Its
//! outcome decides what happens to placement state: acceptance tears it
//! down, rejection and cancellation both preserve it so the user can
//! retry without re-selecting.

use crate::error::PlacementError;
use crate::geometry::{PageFrame, ViewportFrame};
use crate::payload::{self, PlacementPayload, SignatureAsset};
use crate::placement::PlacementState;

/// Result of handing a payload to the signing backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Backend accepted the signed placement.
    Accepted,
    /// Backend refused; the reason is surfaced to the user.
    Rejected(String),
    /// Submission was cancelled before completing; no partial application.
    Cancelled,
}

/// Transport to the signing backend.
///
/// Implementations wrap whatever network stack the host application
/// uses; the engine only cares about the outcome.
pub trait SigningBackend: Send + Sync {
    fn submit(&self, payload: &PlacementPayload) -> SubmitOutcome;
}

/// Build the payload from current state and submit it.
///
/// Validation failures ([`PlacementError`]) abort before any backend
/// call. After the call: `Accepted` resets placement state,
/// `Rejected` and `Cancelled` leave it untouched for retry.
pub fn commit(
    state: &mut PlacementState,
    viewport: &ViewportFrame,
    page: &PageFrame,
    asset: Option<&SignatureAsset>,
    backend: &dyn SigningBackend,
) -> Result<SubmitOutcome, PlacementError> {
    let built = payload::build_payload(state.rect(), viewport, page, asset)?;

    let outcome = backend.submit(&built);
    match &outcome {
        SubmitOutcome::Accepted => {
            let _ = state.reset();
            log::debug!("Submission accepted, placement cleared");
        }
        SubmitOutcome::Rejected(reason) => {
            log::warn!("Submission rejected: {reason}; placement preserved for retry");
        }
        SubmitOutcome::Cancelled => {
            log::debug!("Submission cancelled, placement unchanged");
        }
    }

    Ok(outcome)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::payload::ImageEncoding;
    use std::io::Cursor;
    use std::sync::Mutex;

    struct ScriptedBackend {
        outcome: SubmitOutcome,
        submitted: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(outcome: SubmitOutcome) -> Self {
            Self {
                outcome,
                submitted: Mutex::new(Vec::new()),
            }
        }
    }

    impl SigningBackend for ScriptedBackend {
        fn submit(&self, payload: &PlacementPayload) -> SubmitOutcome {
            self.submitted
                .lock()
                .unwrap()
                .push(payload.metadata_json().unwrap());
            self.outcome.clone()
        }
    }

    fn inked_asset() -> SignatureAsset {
        let img = image::RgbaImage::from_pixel(16, 8, image::Rgba([0, 0, 0, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("PNG encode");
        SignatureAsset::new(bytes, ImageEncoding::Png)
    }

    fn selected_state() -> PlacementState {
        let mut state = PlacementState::new();
        let container = ViewportFrame::new(800.0, 1100.0);
        assert!(
            state
                .select_at(Point::new(200.0, 300.0), (150.0, 75.0), &container)
                .is_applied()
        );
        state
    }

    #[test]
    fn test_accepted_resets_state() {
        let mut state = selected_state();
        let viewport = ViewportFrame::new(800.0, 1100.0);
        let backend = ScriptedBackend::new(SubmitOutcome::Accepted);
        let asset = inked_asset();

        let outcome = commit(
            &mut state,
            &viewport,
            &PageFrame::A4,
            Some(&asset),
            &backend,
        )
        .unwrap();

        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert!(state.rect().is_none());
        assert_eq!(backend.submitted.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_rejected_preserves_state_for_retry() {
        let mut state = selected_state();
        let before = *state.rect().unwrap();
        let viewport = ViewportFrame::new(800.0, 1100.0);
        let backend = ScriptedBackend::new(SubmitOutcome::Rejected("backend down".into()));
        let asset = inked_asset();

        let outcome = commit(
            &mut state,
            &viewport,
            &PageFrame::A4,
            Some(&asset),
            &backend,
        )
        .unwrap();

        assert_eq!(outcome, SubmitOutcome::Rejected("backend down".into()));
        assert_eq!(state.rect(), Some(&before));

        // Retry succeeds without re-selecting.
        let backend = ScriptedBackend::new(SubmitOutcome::Accepted);
        let outcome = commit(
            &mut state,
            &viewport,
            &PageFrame::A4,
            Some(&asset),
            &backend,
        )
        .unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert!(state.rect().is_none());
    }

    #[test]
    fn test_cancelled_leaves_state_unchanged() {
        let mut state = selected_state();
        let before = *state.rect().unwrap();
        let viewport = ViewportFrame::new(800.0, 1100.0);
        let backend = ScriptedBackend::new(SubmitOutcome::Cancelled);
        let asset = inked_asset();

        let outcome = commit(
            &mut state,
            &viewport,
            &PageFrame::A4,
            Some(&asset),
            &backend,
        )
        .unwrap();

        assert_eq!(outcome, SubmitOutcome::Cancelled);
        assert_eq!(state.rect(), Some(&before));
    }

    #[test]
    fn test_validation_failure_never_reaches_backend() {
        let mut state = PlacementState::new(); // nothing selected
        let viewport = ViewportFrame::new(800.0, 1100.0);
        let backend = ScriptedBackend::new(SubmitOutcome::Accepted);
        let asset = inked_asset();

        let err = commit(
            &mut state,
            &viewport,
            &PageFrame::A4,
            Some(&asset),
            &backend,
        )
        .unwrap_err();

        assert!(matches!(err, PlacementError::NothingSelected));
        assert!(backend.submitted.lock().unwrap().is_empty());
    }
}
