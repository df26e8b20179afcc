/// Derives the page a horizontally paged surface came to rest on.
///
/// `page = floor((offset - width / 2) / width) + 1`, i.e. the page whose
/// centre is nearest the viewport's left edge plus half a page. Results
/// outside `[0, slide_count)` are discarded instead of clamped, which
/// absorbs overshoot at the first and last page after a fast flick.
pub fn compute_settled_page(viewport_width: f32, content_offset_x: f32, slide_count: usize) -> Option<usize> {
    if !viewport_width.is_finite() || viewport_width <= 0.0 || !content_offset_x.is_finite() {
        return None;
    }
    let page = ((content_offset_x - viewport_width / 2.0) / viewport_width).floor() + 1.0;
    if page < 0.0 || page >= slide_count as f32 {
        return None;
    }
    Some(page as usize)
}

/// Holds the currently visible slide index.
#[derive(Debug, Default)]
pub struct PageTracker {
    current: usize,
}

impl PageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// The page for a settle event, or `None` if it should be ignored.
    pub fn settle(&self, viewport_width: f32, content_offset_x: f32, slide_count: usize) -> Option<usize> {
        compute_settled_page(viewport_width, content_offset_x, slide_count)
    }

    /// Moves to `index`. Returns false, leaving the index untouched, when it
    /// is outside `[0, slide_count)`.
    pub fn set_current(&mut self, index: usize, slide_count: usize) -> bool {
        if index >= slide_count {
            return false;
        }
        self.current = index;
        true
    }
}
