//! Port adapters backed by HTTP

pub mod claims;

pub use claims::HttpClaimsApi;
