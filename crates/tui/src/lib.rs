pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod nav;
pub mod session;
pub mod transactions;
pub mod ui;
