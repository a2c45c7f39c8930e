//! Session backend for the portfolio dashboard: Google federated login,
//! cookie sessions with sliding expiration, and the client-side session
//! cache that mirrors them.

pub mod adapter;
pub mod application;
pub mod client;
pub mod domain;
pub mod infra;

#[cfg(test)]
mod tests;
