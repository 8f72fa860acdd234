//! REST API for the ProductLobby backend.

pub mod auth;
pub mod engagement_rest;
pub mod pricing_rest;
pub mod rest;
pub mod server;
pub mod swagger;

pub use server::ApiServer;
