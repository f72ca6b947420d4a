pub mod line_buffer;
pub mod page_layout;
pub mod viewport;

pub use line_buffer::{LineBuffer, clip_line};
pub use page_layout::PageLayout;
pub use viewport::Viewport;
