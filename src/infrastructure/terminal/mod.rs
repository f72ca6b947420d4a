pub mod raw_mode;
pub mod size;
pub mod surface;

pub use raw_mode::CrosstermRawMode;
pub use size::detect_size;
pub use surface::Surface;
