//! Web front end: HTML pages, JSON API and embedded assets

mod handler;
pub mod render;
mod server;

pub use handler::SearchParams;
pub use server::{router, AppState, HttpServer};
