use crate::constants::*;
use crate::state::PagerState;

/// A horizontally paged scroll surface.
///
/// The pager only moves its content offset around. It reports a settle
/// event, once, each time it comes to rest; it never decides which slide is
/// current.
#[derive(Debug)]
pub struct Pager {
    state: PagerState,
    page_width: f32,
    page_count: usize,
    offset: f32,
    target: f32,
    velocity: f32,
    drag_start_page: usize,
}

impl Pager {
    pub fn new(page_width: f32, page_count: usize) -> Self {
        Self {
            state: PagerState::Idle,
            page_width: page_width.max(1.0),
            page_count,
            offset: 0.0,
            target: 0.0,
            velocity: 0.0,
            drag_start_page: 0,
        }
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    fn last_page(&self) -> usize {
        self.page_count.saturating_sub(1)
    }

    fn page_offset(&self, page: usize) -> f32 {
        page.min(self.last_page()) as f32 * self.page_width
    }

    /// The page closest to the current offset.
    pub fn nearest_page(&self) -> usize {
        let page = (self.offset / self.page_width).round().max(0.0) as usize;
        page.min(self.last_page())
    }

    /// The page the pager is heading for: the settle target while settling,
    /// otherwise the nearest page.
    pub fn target_page(&self) -> usize {
        match self.state {
            PagerState::Settling => {
                let page = (self.target / self.page_width).round().max(0.0) as usize;
                page.min(self.last_page())
            }
            _ => self.nearest_page(),
        }
    }

    pub fn begin_drag(&mut self) {
        self.drag_start_page = self.target_page();
        self.velocity = 0.0;
        self.state = PagerState::Dragging;
    }

    /// Follows a pointer that moved `dx` pixels over `dt` seconds.
    pub fn drag_by(&mut self, dx: f32, dt: f32) {
        if self.state != PagerState::Dragging {
            return;
        }
        let overshoot = MAX_OVERSHOOT * self.page_width;
        let max_offset = self.page_offset(self.last_page()) + overshoot;
        self.offset = (self.offset - dx).clamp(-overshoot, max_offset);
        if dt > 0.0 {
            self.velocity = 0.5 * self.velocity + 0.5 * (dx / dt);
        }
    }

    /// Releases the pointer. A fast flick moves one page from where the drag
    /// began, anything slower snaps to the nearest page.
    pub fn end_drag(&mut self) {
        if self.state != PagerState::Dragging {
            return;
        }
        let page = if self.velocity <= -FLICK_VELOCITY {
            self.drag_start_page + 1
        } else if self.velocity >= FLICK_VELOCITY {
            self.drag_start_page.saturating_sub(1)
        } else {
            self.nearest_page()
        };
        self.target = self.page_offset(page);
        self.velocity = 0.0;
        self.state = PagerState::Settling;
    }

    pub fn scroll_to_page(&mut self, page: usize) {
        self.target = self.page_offset(page);
        self.state = PagerState::Settling;
    }

    /// Keeps the same page in view when the viewport width changes.
    pub fn resize(&mut self, page_width: f32) {
        if page_width <= 0.0 || page_width == self.page_width {
            return;
        }
        let ratio = page_width / self.page_width;
        self.offset *= ratio;
        self.target *= ratio;
        self.page_width = page_width;
    }

    /// Advances the settle animation. Returns the resting offset on the
    /// frame the pager comes to rest.
    pub fn update(&mut self, dt: f32) -> Option<f32> {
        if self.state != PagerState::Settling {
            return None;
        }
        let step = (dt * SNAP_SPEED).clamp(0.0, 1.0);
        self.offset += (self.target - self.offset) * step;
        if (self.target - self.offset).abs() <= SETTLE_EPSILON {
            self.offset = self.target;
            self.state = PagerState::Idle;
            return Some(self.offset);
        }
        None
    }
}
