//! Category ranking that drives agenda order.

use std::collections::HashMap;

use crate::models::TalkType;

/// Mapping from talk category to its position rank in the agenda.
///
/// Lower ranks sort earlier. The table is fixed for the lifetime of a view
/// and injected at construction so callers can substitute their own.
/// Categories missing from the table have no rank; ranked entries never
/// displace them and they always land at the end of the agenda.
#[derive(Debug, Clone)]
pub struct CategoryPriorities {
    ranks: HashMap<String, u32>,
}

impl CategoryPriorities {
    pub fn new(ranks: HashMap<String, u32>) -> Self {
        Self { ranks }
    }

    /// Rank for a category, if the table knows it.
    pub fn rank(&self, category: &str) -> Option<u32> {
        self.ranks.get(category).copied()
    }
}

impl Default for CategoryPriorities {
    fn default() -> Self {
        Self::new(
            TalkType::ALL
                .iter()
                .map(|talk_type| (talk_type.to_string(), talk_type.default_rank()))
                .collect(),
        )
    }
}
