// src/github/mod.rs
// =============================================================================
// This module handles project discovery on GitHub.
//
// - existing: which repositories/organisations the list already links to
// - search: the repository search API client
// - relevance: the fixed categories, queries and keyword filter
// - discover: runs the whole search plan
//
// Authentication is a bearer token passed straight through from the
// environment; nothing else about the account is touched.
// =============================================================================

mod discover;
mod existing;
mod relevance;
mod search;

pub use discover::discover;
pub use existing::ExistingRepos;
pub use relevance::CATEGORIES;
pub use search::{GitHubSearch, Repository};
