pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod shared;

pub use shared::{AppConfig, AppError, Result};
