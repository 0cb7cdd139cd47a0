/// Distance from the end of the content at which the next page is requested.
pub const LOAD_MORE_THRESHOLD: f64 = 100.0;

/// Decides when a scrolled list is close enough to its end to ask for more.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    threshold: f64,
}

impl ScrollTrigger {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn should_load_more(&self, offset: f64, content_height: f64, frame_height: f64) -> bool {
        offset > content_height - frame_height - self.threshold
    }
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(LOAD_MORE_THRESHOLD)
    }
}
