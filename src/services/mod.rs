//! Service layer for business logic
//!
//! Address resolution and GeoIP lookup, shared by the HTTP handlers.

pub mod geoip;
mod lookup;
pub mod resolver;

pub use geoip::{GeoIpLookup, GeoIpProvider, GeoRecord, MaxMindProvider};
pub use lookup::{LookupOutcome, LookupService};
pub use resolver::{AddressResolver, SystemResolver, parse_literal};
