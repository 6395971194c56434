pub mod cli;
pub mod error;
pub mod github;
pub mod models;
pub mod table;
pub mod types;
pub mod web;
