/// Database configuration and connection management
pub mod database;

/// First-run seeding of condominiums from condo.toml
pub mod seed;

/// Session token table from condo.toml
pub mod sessions;

/// Application settings loading from condo.toml
pub mod settings;
