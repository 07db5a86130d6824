pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod handlers;
pub mod http;
pub mod log;
pub mod models;
