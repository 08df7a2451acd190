pub mod actors;
pub mod cli;
pub mod components;
pub mod error;
pub mod github;
pub mod health;
pub mod server;
pub mod stats;
pub mod types;
