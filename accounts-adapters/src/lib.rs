pub mod config;
pub mod persistence;
pub mod tokens;

// Re-export commonly used types for convenience
pub use config::{JwtSettings, Settings};
pub use persistence::{HashMapUserStore, PostgresUserStore};
pub use tokens::JwtTokenService;
