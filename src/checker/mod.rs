// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - markdown: Extracts links from the README text
// - filter: Decides which links are skipped without a request
// - http: Probes one URL with retry and classifies the outcome
// - batch: Walks the whole link list sequentially
//
// This file (mod.rs) is the module root - it re-exports the public API so the
// rest of the application can write `checker::check_links()`.
// =============================================================================

mod batch;
mod filter;
mod http;
mod markdown;

pub use batch::check_links;
pub use http::{CheckResult, ReqwestProbe};
pub use markdown::{dedupe_links, extract_links, Link};
