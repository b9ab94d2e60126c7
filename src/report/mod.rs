// src/report/mod.rs
// =============================================================================
// Report models and their markdown/console rendering.
//
// - links: the link checker's failure report
// - discovery: the discovery digest
// =============================================================================

mod discovery;
mod links;

pub use discovery::{CategoryHits, DiscoveryReport};
pub use links::{CheckedLink, LinkReport};
