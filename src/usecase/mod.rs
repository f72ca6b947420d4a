pub mod pager_usecase;

pub use pager_usecase::PagerUsecase;
