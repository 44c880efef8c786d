pub mod games;
pub mod settings;

pub use games::Game;
pub use settings::{AccountSettings, AppConfig, StorageSettings};
