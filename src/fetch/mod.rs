// src/fetch/mod.rs
// =============================================================================
// This module talks to the web.
//
// Submodules:
// - http: the Fetcher trait, the Response type, and the reqwest-backed
//         HttpFetcher used by the real binary
// - html: pulls <img> elements out of an HTML page
//
// The crawler only ever sees the Fetcher trait, so tests can swap in an
// in-memory fetcher that never touches the network.
// =============================================================================

mod html;
mod http;

pub use html::{extract_images, ImageElement};
pub use http::{FetchError, Fetcher, HttpFetcher, Response};
