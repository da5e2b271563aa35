pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod workflow;

pub use api::{CustomerApi, HttpCustomerApi};
pub use config::Config;
pub use error::{Error, Result};
pub use store::Store;
