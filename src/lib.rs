pub mod catalog;
pub mod cli;
pub mod client;
pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pages;
pub mod state;
pub mod utils;
