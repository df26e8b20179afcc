use raylib::prelude::*;

pub trait Engine {
    /// Loads everything the engine draws. Returns false if there is nothing to show.
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> bool;

    /// Handles input and draws one frame. Returns false to end the loop.
    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) -> bool;
}
