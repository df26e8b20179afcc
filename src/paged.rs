pub mod controls;
pub mod engine;
