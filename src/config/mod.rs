/// Database connection and schema creation
pub mod database;

/// Application settings from config.toml and the environment
pub mod server;
