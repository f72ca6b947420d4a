pub mod window;

pub use window::Window;
