#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PagerState {
    Idle,      // Resting on a page
    Dragging,  // Following the pointer
    Settling,  // Released, easing towards the target page
}
