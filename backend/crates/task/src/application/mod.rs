//! Application Layer

pub mod task_usecase;

pub use task_usecase::TaskUseCase;
