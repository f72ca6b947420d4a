pub mod pager_controller;

pub use pager_controller::{PagerAction, PagerController};
