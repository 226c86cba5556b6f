use still_life::flow::redraws_after;
use winit::{dpi::PhysicalSize, event::WindowEvent};

#[test]
fn only_resizes_ask_for_a_new_frame() {
    assert!(redraws_after(&WindowEvent::Resized(PhysicalSize::new(640, 480))));
    assert!(!redraws_after(&WindowEvent::RedrawRequested));
    assert!(!redraws_after(&WindowEvent::CloseRequested));
    assert!(!redraws_after(&WindowEvent::Focused(true)));
}
