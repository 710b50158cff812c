pub mod build;
pub mod environment;
pub mod models;

pub use environment::{Environment, ProcessEnvironment};
pub use models::*;
