pub mod account;
pub mod config;
pub mod contract;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod input;
pub mod output;
pub mod roster;
pub mod services;
pub mod standing;
pub mod subject;
pub mod token;
