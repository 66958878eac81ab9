//! Underworld Rust Server
//!
//! Backend for the Underworld Rust community website: public marketing
//! content, skin submissions, contact messages, and the role-gated admin
//! surface.

pub mod api;
pub mod auth;
pub mod config;
pub mod contact;
pub mod content;
pub mod db;
pub mod permissions;
pub mod skins;
