//! RPC-style HTTP surface for the catalog: routing, request/response mapping,
//! and translation of catalog errors into the shared error payload.

pub mod app;
