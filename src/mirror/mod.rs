// src/mirror/mod.rs
// =============================================================================
// This module owns everything that touches the local disk.
//
// Submodules:
// - path: maps URL paths to files under the output root, answers
//         "do we already have this?", and writes response bodies
// - fingerprint: short MD5 prefix used to make log lines easier to scan
//
// The filesystem is our only memory between requests: if a file exists at
// the mirrored path, the resource counts as downloaded.
// =============================================================================

mod fingerprint;
mod path;

pub use fingerprint::fingerprint;
pub use path::OutputRoot;
