pub mod binding;
pub mod codec;
pub mod config;
pub mod controller;
pub mod persistence;
pub mod ui;
