//! Geolocator - resolve IP addresses and hostnames to geographic metadata
//!
//! A small HTTP service backed by a local MaxMind GeoIP2/GeoLite2 City
//! database.
//!
//! # Routes
//! - `GET /ping`: liveness probe, plain text `pong`
//! - `GET /check/{address}`: IPv4/IPv6 literal or hostname, JSON envelope
//!
//! # Architecture
//! - `config`: defaults, `config.json`, environment and command-line flags
//! - `services`: address resolution and GeoIP lookup
//! - `api`: HTTP handlers, middleware and the response envelope
//! - `runtime`: startup, server loop and shutdown
//! - `system`: logging

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod system;
