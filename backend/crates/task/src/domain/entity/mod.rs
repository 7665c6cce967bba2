//! Entity Module

pub mod task;

pub use task::{NewTask, Task};
