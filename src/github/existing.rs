// src/github/existing.rs
// =============================================================================
// Finds the GitHub projects the list already references.
//
// Two shapes of GitHub URL show up in the README:
//   - https://github.com/owner/repo   -> that repository is listed
//   - https://github.com/owner        -> the whole organisation is listed
//
// Discovery drops any search hit matching either form.
// =============================================================================

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

// The pattern is a constant, so compiling it cannot fail at runtime
fn github_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"https?://github\.com/([^/\s)]+)(?:/([^/\s)]+))?").expect("valid github url regex")
    })
}

/// Repositories and organisations referenced by the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingRepos {
    /// "owner/repo" pairs
    repos: HashSet<String>,
    /// Owners linked without a repository (organisation wildcards)
    orgs: HashSet<String>,
}

impl ExistingRepos {
    // Extracts every GitHub repository and organisation URL from the text
    //
    // Example:
    //   "[EW](https://github.com/energywebfoundation/origin)" -> repo
    //   "[Regen](https://github.com/regen-network)"           -> org
    pub fn from_markdown(content: &str) -> Self {
        let mut existing = Self::default();

        for caps in github_url_re().captures_iter(content) {
            let owner = &caps[1];
            match caps.get(2) {
                Some(repo) => {
                    // Prose punctuation can trail the URL
                    let repo = repo.as_str().trim_end_matches(['.', ',', ';', ':', ')']);
                    if !repo.is_empty() {
                        existing.repos.insert(format!("{owner}/{repo}"));
                    }
                }
                None => {
                    existing.orgs.insert(owner.to_string());
                }
            }
        }

        existing
    }

    /// True when `full_name` ("owner/repo") is listed, directly or by its owner
    pub fn contains(&self, full_name: &str) -> bool {
        if self.repos.contains(full_name) {
            return true;
        }

        let owner = full_name.split('/').next().unwrap_or(full_name);
        self.orgs.contains(owner)
    }

    /// Number of entries (repositories plus organisation wildcards)
    pub fn len(&self) -> usize {
        self.repos.len() + self.orgs.len()
    }
}
