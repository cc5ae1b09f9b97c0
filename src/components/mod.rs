pub mod canvas;
pub mod scroll_reveal;
pub mod typewriter;
