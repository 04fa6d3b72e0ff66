//! Scroll-bound animation.
//!
//! Every entry maps the current scroll position straight to an output; nothing
//! is eased across frames.

use crate::constants::*;
use glam::Vec2;
use std::f32::consts::TAU;

/// Raw scroll metrics sampled from the document.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
    pub scroll_y: f64,
    pub doc_height: f64,
    pub viewport_height: f64,
}

impl ScrollSample {
    pub fn progress(&self) -> ScrollProgress {
        ScrollProgress::from_offset(self.scroll_y, self.doc_height, self.viewport_height)
    }
}

/// Fraction of the scrollable range covered, always in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct ScrollProgress(f32);

impl ScrollProgress {
    pub fn from_offset(scroll_y: f64, doc_height: f64, viewport_height: f64) -> Self {
        let range = doc_height - viewport_height;
        if range <= 0.0 || !scroll_y.is_finite() {
            return Self(0.0);
        }
        Self::from_fraction((scroll_y / range) as f32)
    }

    pub fn from_fraction(f: f32) -> Self {
        Self(if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) })
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

/// Scene-side outputs of the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneScroll {
    pub camera_z: f32,
    pub hero_yaw: f32,
    pub hero_offset: Vec2,
}

#[inline]
pub fn camera_z(p: ScrollProgress) -> f32 {
    CAMERA_Z_START + (CAMERA_Z_END - CAMERA_Z_START) * p.value()
}

#[inline]
pub fn hero_yaw(p: ScrollProgress) -> f32 {
    p.value() * HERO_SCROLL_TURNS * TAU
}

#[inline]
pub fn hero_offset(p: ScrollProgress) -> Vec2 {
    let a = p.value() * TAU;
    Vec2::new(a.sin() * HERO_ORBIT_X, a.cos() * HERO_ORBIT_Y)
}

/// Progress bar width in percent.
#[inline]
pub fn progress_bar_percent(p: ScrollProgress) -> f32 {
    p.value() * 100.0
}

pub fn scene_scroll(p: ScrollProgress) -> SceneScroll {
    SceneScroll {
        camera_z: camera_z(p),
        hero_yaw: hero_yaw(p),
        hero_offset: hero_offset(p),
    }
}

/// Opacity and vertical offset of a block revealed as it enters the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub opacity: f32,
    pub translate_y: f32,
}

/// `top_px` is the block's document offset. The reveal runs while the block's
/// top moves from 80% to 40% of the viewport height.
pub fn reveal(top_px: f64, sample: &ScrollSample) -> Reveal {
    let vh = sample.viewport_height.max(1.0);
    let top_in_view = top_px - sample.scroll_y;
    let t = ((REVEAL_START_FRAC * vh - top_in_view) / (REVEAL_SPAN_FRAC * vh)).clamp(0.0, 1.0) as f32;
    Reveal {
        opacity: t,
        translate_y: REVEAL_OFFSET_PX * (1.0 - t),
    }
}

/// Whether a block whose top sits at `top_px` has crossed `trigger_frac` of
/// the viewport. Scrolling back above the mark hides it again.
#[inline]
pub fn has_entered(top_px: f64, trigger_frac: f64, sample: &ScrollSample) -> bool {
    top_px - sample.scroll_y <= trigger_frac * sample.viewport_height.max(1.0)
}

/// Height of the experience timeline's line in percent: 0 while the
/// container's top is below 80% of the viewport, 100 once its bottom is.
pub fn timeline_line_percent(top_px: f64, height_px: f64, sample: &ScrollSample) -> f32 {
    let mark = TIMELINE_LINE_ANCHOR_FRAC * sample.viewport_height.max(1.0);
    let passed = mark - (top_px - sample.scroll_y);
    if height_px <= 0.0 {
        return if passed >= 0.0 { 100.0 } else { 0.0 };
    }
    ((passed / height_px).clamp(0.0, 1.0) * 100.0) as f32
}

/// Resting pose of a timeline node; the page animates between the two.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeReveal {
    pub opacity: f32,
    pub translate_x: f32,
    pub rotate_y_deg: f32,
}

pub fn node_reveal(shown: bool) -> NodeReveal {
    if shown {
        NodeReveal {
            opacity: 1.0,
            translate_x: 0.0,
            rotate_y_deg: 0.0,
        }
    } else {
        NodeReveal {
            opacity: 0.0,
            translate_x: TIMELINE_NODE_OFFSET_PX,
            rotate_y_deg: TIMELINE_NODE_TILT_DEG,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextReveal {
    pub opacity: f32,
    pub blur_px: f32,
    pub rotate_x_deg: f32,
    pub translate_y: f32,
}

pub fn text_reveal(shown: bool) -> TextReveal {
    if shown {
        TextReveal {
            opacity: 1.0,
            blur_px: 0.0,
            rotate_x_deg: 0.0,
            translate_y: 0.0,
        }
    } else {
        TextReveal {
            opacity: 0.0,
            blur_px: REVEAL_TEXT_BLUR_PX,
            rotate_x_deg: REVEAL_TEXT_TILT_DEG,
            translate_y: REVEAL_TEXT_OFFSET_PX,
        }
    }
}

pub const SECTION_LABELS: [&str; 7] = [
    "RAHIL UBARE",
    "ABOUT",
    "SKILLS",
    "EXPERIENCE",
    "ACHIEVEMENTS",
    "PROJECTS",
    "CONTACT",
];

/// Label for the section currently a third of the way into the viewport.
pub fn section_label(sample: &ScrollSample) -> &'static str {
    let h = sample.viewport_height.max(1.0);
    let idx = ((sample.scroll_y.max(0.0) + h / 3.0) / h).floor() as usize;
    SECTION_LABELS[idx.min(SECTION_LABELS.len() - 1)]
}

/// One bound animation.
#[derive(Clone, Debug, PartialEq)]
pub enum TimelineEntry {
    CameraZ,
    HeroRotation,
    HeroOffset,
    /// Reveal block identified by the caller's index and its document offset.
    RevealBlock { index: usize, top_px: f64 },
    /// Section title scrubbed in by its section's top edge.
    SectionTitle { index: usize, section_top_px: f64 },
    TimelineLine { top_px: f64, height_px: f64 },
    TimelineNode { index: usize, top_px: f64 },
    RevealText { index: usize, top_px: f64 },
    ProgressBar,
    SectionLabel,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TimelineOutput {
    CameraZ(f32),
    HeroRotation(f32),
    HeroOffset(Vec2),
    RevealBlock { index: usize, reveal: Reveal },
    SectionTitle { index: usize, reveal: Reveal },
    TimelineLine(f32),
    TimelineNode { index: usize, reveal: NodeReveal },
    RevealText { index: usize, reveal: TextReveal },
    ProgressBar(f32),
    SectionLabel(&'static str),
}

/// Registered entries, evaluated independently on each scroll sample.
#[derive(Clone, Debug, Default)]
pub struct ScrollTimeline {
    entries: Vec<TimelineEntry>,
}

impl ScrollTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: TimelineEntry) {
        self.entries.push(entry);
    }

    pub fn evaluate(&self, sample: &ScrollSample) -> Vec<TimelineOutput> {
        let p = sample.progress();
        self.entries
            .iter()
            .map(|e| match e {
                TimelineEntry::CameraZ => TimelineOutput::CameraZ(camera_z(p)),
                TimelineEntry::HeroRotation => TimelineOutput::HeroRotation(hero_yaw(p)),
                TimelineEntry::HeroOffset => TimelineOutput::HeroOffset(hero_offset(p)),
                TimelineEntry::RevealBlock { index, top_px } => TimelineOutput::RevealBlock {
                    index: *index,
                    reveal: reveal(*top_px, sample),
                },
                TimelineEntry::SectionTitle {
                    index,
                    section_top_px,
                } => TimelineOutput::SectionTitle {
                    index: *index,
                    reveal: reveal(*section_top_px, sample),
                },
                TimelineEntry::TimelineLine { top_px, height_px } => {
                    TimelineOutput::TimelineLine(timeline_line_percent(*top_px, *height_px, sample))
                }
                TimelineEntry::TimelineNode { index, top_px } => TimelineOutput::TimelineNode {
                    index: *index,
                    reveal: node_reveal(has_entered(*top_px, TIMELINE_NODE_TRIGGER_FRAC, sample)),
                },
                TimelineEntry::RevealText { index, top_px } => TimelineOutput::RevealText {
                    index: *index,
                    reveal: text_reveal(has_entered(*top_px, REVEAL_TEXT_TRIGGER_FRAC, sample)),
                },
                TimelineEntry::ProgressBar => {
                    TimelineOutput::ProgressBar(progress_bar_percent(p))
                }
                TimelineEntry::SectionLabel => {
                    TimelineOutput::SectionLabel(section_label(sample))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_page_has_no_progress() {
        assert_eq!(ScrollProgress::from_offset(100.0, 800.0, 800.0).value(), 0.0);
    }

    #[test]
    fn camera_dollies_in() {
        assert_eq!(camera_z(ScrollProgress::from_fraction(0.0)), CAMERA_Z_START);
        assert_eq!(camera_z(ScrollProgress::from_fraction(1.0)), CAMERA_Z_END);
    }

    #[test]
    fn hero_orbit_starts_above_center() {
        let o = hero_offset(ScrollProgress::from_fraction(0.0));
        assert!(o.x.abs() < 1e-6);
        assert!((o.y - HERO_ORBIT_Y).abs() < 1e-6);
    }

    #[test]
    fn section_label_follows_viewport_pages() {
        let mut s = ScrollSample {
            scroll_y: 0.0,
            doc_height: 7000.0,
            viewport_height: 1000.0,
        };
        assert_eq!(section_label(&s), "RAHIL UBARE");
        s.scroll_y = 700.0;
        assert_eq!(section_label(&s), "ABOUT");
        s.scroll_y = 50_000.0;
        assert_eq!(section_label(&s), "CONTACT");
    }
}
