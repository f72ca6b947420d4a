pub mod mode_port;
pub mod surface_port;

pub use mode_port::TerminalModePort;
pub use surface_port::SurfacePort;
