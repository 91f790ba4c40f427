pub mod app;
pub mod config;
pub mod controller;
pub mod engine;
pub mod event;
pub mod generator;
pub mod host;
pub mod runtime;
pub mod session;
pub mod ui;
