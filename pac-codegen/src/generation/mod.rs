//! Generated-output bookkeeping.
//!
//! - [`ImportCollector`] - Import tracking and deduplication
//! - [`ClientManifest`] - Sidecar map from client modules to collection ids

mod client_manifest;
mod imports;

pub use client_manifest::{CLIENT_MANIFEST_FILE, ClientManifest};
pub use imports::{ImportCollector, ModuleImports};
