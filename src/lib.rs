pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod terminal;
pub mod view;

pub use app::App;
pub use config::Config;
pub use error::JammerError;
pub use infrastructure::client::jammer_client::{JammerClient, JammerClientTrait};
pub use infrastructure::jammer_client::model::jammer_model;
