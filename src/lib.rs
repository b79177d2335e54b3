pub mod config;
pub mod error;
pub mod registry;
pub mod server;

pub use config::Config;
pub use error::{Error, Result};
pub use registry::{CompanyRecord, Jurisdiction, SearchOrchestrator};
pub use server::app;
