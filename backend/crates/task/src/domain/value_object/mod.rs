//! Value Object Module

pub mod task_title;
