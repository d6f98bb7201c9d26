//! Demo driver: runs a scripted placement session headlessly and
//! prints the payload metadata the signing backend would receive.

use std::io::Cursor;

use sigplace::{
    ContainerMetrics, ImageEncoding, InteractionController, NoopCapture, PlacementConfig,
    PlacementPayload, Point, PointerEvent, SignatureAsset, SigningBackend, SubmitOutcome,
    ViewportFrame,
};

/// Backend stand-in that accepts everything and echoes the metadata.
struct PrintingBackend;

impl SigningBackend for PrintingBackend {
    fn submit(&self, payload: &PlacementPayload) -> SubmitOutcome {
        match payload.metadata_json() {
            Ok(json) => println!("metadata: {json}"),
            Err(e) => eprintln!("metadata serialization failed: {e}"),
        }
        println!(
            "signature: {} bytes ({})",
            payload.signature().bytes().len(),
            payload.signature().encoding().mime()
        );
        SubmitOutcome::Accepted
    }
}

/// A signature the demo can commit: opaque strokes on transparency.
fn demo_signature() -> SignatureAsset {
    let img = image::RgbaImage::from_fn(120, 48, |x, y| {
        let on_stroke = (y as i32 - (x as i32 / 3 + 10)).abs() < 3;
        if on_stroke {
            image::Rgba([20, 20, 60, 255])
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    });
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("PNG encode of generated signature");
    SignatureAsset::new(bytes, ImageEncoding::Png)
}

fn main() {
    env_logger::init();

    let metrics = ContainerMetrics::unscrolled(ViewportFrame::new(800.0, 1100.0));
    let mut controller = InteractionController::new(PlacementConfig::default(), NoopCapture);

    // Click to place, then drag the rectangle 50px right and down.
    let events = [
        PointerEvent::Down(Point::new(200.0, 300.0)),
        PointerEvent::Up,
        PointerEvent::Down(Point::new(200.0, 300.0)),
        PointerEvent::Move(Point::new(250.0, 350.0)),
        PointerEvent::Up,
    ];
    for event in events {
        let _ = controller.handle_event(event, &metrics);
    }

    if let Some(rect) = controller.state().rect() {
        println!(
            "placed at ({:.1}, {:.1}) size {:.0}x{:.0} px",
            rect.x, rect.y, rect.width, rect.height
        );
    }

    let asset = demo_signature();
    match controller.commit(&metrics.frame, Some(&asset), &PrintingBackend) {
        Ok(SubmitOutcome::Accepted) => println!("accepted"),
        Ok(SubmitOutcome::Rejected(reason)) => eprintln!("rejected: {reason}"),
        Ok(SubmitOutcome::Cancelled) => println!("cancelled"),
        Err(e) => eprintln!("commit failed: {e}"),
    }
}
