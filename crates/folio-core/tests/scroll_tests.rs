// Scroll timeline mapping.

use folio_core::constants::{
    CAMERA_Z_END, CAMERA_Z_START, REVEAL_OFFSET_PX, REVEAL_TEXT_BLUR_PX, TIMELINE_NODE_OFFSET_PX,
};
use folio_core::scroll::*;

fn sample(scroll_y: f64) -> ScrollSample {
    ScrollSample {
        scroll_y,
        doc_height: 5000.0,
        viewport_height: 1000.0,
    }
}

#[test]
fn progress_bar_spans_zero_to_hundred() {
    assert_eq!(progress_bar_percent(sample(0.0).progress()), 0.0);
    assert_eq!(progress_bar_percent(sample(4000.0).progress()), 100.0);
    assert!((progress_bar_percent(sample(2000.0).progress()) - 50.0).abs() < 1e-4);
}

#[test]
fn progress_is_clamped() {
    assert_eq!(sample(-300.0).progress().value(), 0.0);
    assert_eq!(sample(9000.0).progress().value(), 1.0);
    assert_eq!(ScrollProgress::from_fraction(f32::NAN).value(), 0.0);
}

#[test]
fn short_page_stays_at_start() {
    let s = ScrollSample {
        scroll_y: 0.0,
        doc_height: 600.0,
        viewport_height: 1000.0,
    };
    assert_eq!(s.progress().value(), 0.0);
    assert_eq!(camera_z(s.progress()), CAMERA_Z_START);
}

#[test]
fn scene_values_at_end_of_page() {
    let s = scene_scroll(ScrollProgress::from_fraction(1.0));
    assert_eq!(s.camera_z, CAMERA_Z_END);
    assert!((s.hero_yaw - 4.0 * std::f32::consts::PI).abs() < 1e-4);
}

#[test]
fn reveal_runs_between_eighty_and_forty_percent() {
    // block top at 1000px in the document, viewport 1000px tall
    let before = reveal(1000.0, &sample(100.0)); // top at 90%
    assert_eq!(before.opacity, 0.0);
    assert_eq!(before.translate_y, REVEAL_OFFSET_PX);

    let mid = reveal(1000.0, &sample(400.0)); // top at 60%
    assert!((mid.opacity - 0.5).abs() < 1e-4);

    let after = reveal(1000.0, &sample(700.0)); // top at 30%
    assert_eq!(after.opacity, 1.0);
    assert_eq!(after.translate_y, 0.0);
}

#[test]
fn timeline_evaluates_entries_in_order() {
    let mut tl = ScrollTimeline::new();
    tl.register(TimelineEntry::ProgressBar);
    tl.register(TimelineEntry::CameraZ);
    tl.register(TimelineEntry::RevealBlock {
        index: 3,
        top_px: 0.0,
    });
    let out = tl.evaluate(&sample(4000.0));
    assert_eq!(out.len(), 3);
    assert_eq!(out[0], TimelineOutput::ProgressBar(100.0));
    assert_eq!(out[1], TimelineOutput::CameraZ(CAMERA_Z_END));
    match &out[2] {
        TimelineOutput::RevealBlock { index, reveal } => {
            assert_eq!(*index, 3);
            assert_eq!(reveal.opacity, 1.0);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn timeline_line_grows_while_container_passes_eighty_percent() {
    // container spans 2000..3000px of the document, viewport 1000px tall
    let at = |y| timeline_line_percent(2000.0, 1000.0, &sample(y));
    assert_eq!(at(0.0), 0.0);
    assert_eq!(at(1200.0), 0.0); // top exactly at 80%
    assert!((at(1700.0) - 50.0).abs() < 1e-4);
    assert_eq!(at(2200.0), 100.0); // bottom at 80%
    assert_eq!(at(4000.0), 100.0);
}

#[test]
fn zero_height_timeline_line_snaps() {
    assert_eq!(timeline_line_percent(2000.0, 0.0, &sample(1000.0)), 0.0);
    assert_eq!(timeline_line_percent(2000.0, 0.0, &sample(1300.0)), 100.0);
}

#[test]
fn timeline_node_and_text_toggle_at_their_marks() {
    // node triggers at 85%, text at 90%; top at 1000px
    let node_hidden = has_entered(1000.0, 0.85, &sample(100.0)); // top at 90%
    let text_shown = has_entered(1000.0, 0.9, &sample(100.0));
    assert!(!node_hidden);
    assert!(text_shown);

    let mut tl = ScrollTimeline::new();
    tl.register(TimelineEntry::TimelineNode {
        index: 0,
        top_px: 1000.0,
    });
    tl.register(TimelineEntry::RevealText {
        index: 2,
        top_px: 1000.0,
    });

    let hidden = tl.evaluate(&sample(0.0));
    assert_eq!(
        hidden[0],
        TimelineOutput::TimelineNode {
            index: 0,
            reveal: node_reveal(false)
        }
    );
    assert_eq!(node_reveal(false).translate_x, TIMELINE_NODE_OFFSET_PX);
    assert_eq!(
        hidden[1],
        TimelineOutput::RevealText {
            index: 2,
            reveal: text_reveal(false)
        }
    );
    assert_eq!(text_reveal(false).blur_px, REVEAL_TEXT_BLUR_PX);

    let shown = tl.evaluate(&sample(200.0)); // top at 80%
    assert_eq!(
        shown[0],
        TimelineOutput::TimelineNode {
            index: 0,
            reveal: node_reveal(true)
        }
    );
    assert_eq!(text_reveal(true).opacity, 1.0);

    // scrolling back up hides them again
    let back = tl.evaluate(&sample(0.0));
    assert_eq!(back, hidden);
}

#[test]
fn section_title_follows_its_section_top() {
    let mut tl = ScrollTimeline::new();
    tl.register(TimelineEntry::SectionTitle {
        index: 1,
        section_top_px: 3000.0,
    });
    let out = tl.evaluate(&sample(2400.0)); // section top at 60%
    match &out[0] {
        TimelineOutput::SectionTitle { index, reveal } => {
            assert_eq!(*index, 1);
            assert!((reveal.opacity - 0.5).abs() < 1e-4);
            assert!((reveal.translate_y - REVEAL_OFFSET_PX * 0.5).abs() < 1e-3);
        }
        other => panic!("unexpected {other:?}"),
    }
}
