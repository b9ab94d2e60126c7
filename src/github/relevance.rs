// src/github/relevance.rs
// =============================================================================
// The fixed search plan for discovery: one entry per section of the list,
// each with the queries sent to GitHub and the keywords a hit must mention.
//
// Relevance is a plain keyword-overlap test. A repository counts as relevant
// to a category when its description and topics together contain at least
// two of the category's keywords (substring match, case-insensitive). Some
// keywords are deliberate stems ("recycl" catches recycle/recycling).
// =============================================================================

use super::search::Repository;

/// Minimum number of distinct keywords a relevant repository must mention
pub const MIN_KEYWORD_MATCHES: usize = 2;

/// One section of the list
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub queries: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Energy Grid & P2P Trading",
        queries: &[
            "blockchain renewable energy trading",
            "decentralized energy grid",
            "peer-to-peer energy",
            "blockchain solar power",
        ],
        keywords: &["energy", "grid", "solar", "renewable", "trading", "power"],
    },
    Category {
        name: "Digital Carbon Markets",
        queries: &[
            "blockchain carbon credits",
            "tokenized carbon offsets",
            "ReFi regenerative finance",
            "carbon marketplace blockchain",
        ],
        keywords: &["carbon", "credit", "offset", "refi", "climate", "emission"],
    },
    Category {
        name: "Digital MRV",
        queries: &[
            "blockchain carbon verification",
            "IoT blockchain environmental monitoring",
            "blockchain forestry monitoring",
            "dMRV measurement reporting verification",
        ],
        keywords: &["verification", "monitoring", "mrv", "measurement", "reporting", "forest"],
    },
    Category {
        name: "Supply Chain & Circular Economy",
        queries: &[
            "blockchain circular economy",
            "digital product passport blockchain",
            "blockchain supply chain sustainability",
            "blockchain waste management",
        ],
        keywords: &["supply", "chain", "circular", "waste", "recycl", "passport"],
    },
    Category {
        name: "Layer 1 Protocols",
        queries: &[
            "green blockchain protocol",
            "energy efficient blockchain",
            "carbon negative blockchain",
            "sustainable blockchain",
        ],
        keywords: &["protocol", "blockchain", "layer1", "consensus", "sustainable"],
    },
];

impl Category {
    /// Counts how many of this category's keywords the repository mentions
    pub fn keyword_matches(&self, repo: &Repository) -> usize {
        let description = repo.description.as_deref().unwrap_or("").to_lowercase();
        let topics: Vec<String> = repo.topics.iter().map(|t| t.to_lowercase()).collect();
        let text = format!("{description} {}", topics.join(" "));

        self.keywords.iter().filter(|keyword| text.contains(*keyword)).count()
    }

    pub fn is_relevant(&self, repo: &Repository) -> bool {
        self.keyword_matches(repo) >= MIN_KEYWORD_MATCHES
    }
}
