pub mod decoder;
pub mod event;
pub mod event_loop;

pub use event::KeyInput;
pub use event_loop::{EventLoop, KeySubscription};
