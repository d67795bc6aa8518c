pub mod settings;

pub use settings::{ApplicationSettings, AuthSettings, DatabaseSettings, JwtSettings, Settings};
