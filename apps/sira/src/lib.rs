//! Client core for the sira Arabic résumé builder.
//!
//! Talks to the résumé backend over HTTP, keeps an editing session for one
//! résumé, and drives the sign-in, generation, import and PDF-readiness flows.

pub mod api_client;
pub mod auth;
pub mod config;
pub mod editor;
pub mod errors;
pub mod mapper;
pub mod models;
pub mod picker;
pub mod poller;
pub mod state;
pub mod validation;

#[cfg(test)]
mod test_support;
