pub mod code_generator;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod selector;
pub mod service;
pub mod status_machine;

pub use code_generator::*;
pub use error::*;
pub use handlers::*;
pub use models::*;
pub use repository::*;
pub use selector::*;
pub use service::*;
pub use status_machine::*;
