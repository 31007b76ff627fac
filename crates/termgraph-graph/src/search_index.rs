//! Ranked node search.
//!
//! Every node is classified into at most one bucket, tried in order:
//!
//! 1. **exact** - the query equals one of the node's fields
//! 2. **sliced** - the query is a substring of one of its fields
//! 3. **fuzzy** - the closest field is within a small edit distance
//!
//! All comparisons are case-insensitive. The lowercased fields are computed
//! once when the graph is built, since nodes never change afterwards.

use crate::graph::NavGraph;
use std::collections::HashSet;
use termgraph_core::Node;
use tracing::debug;

/// Default cap on the merged result list.
pub const DEFAULT_LIMIT: usize = 50;

/// Default largest edit distance accepted as a fuzzy match.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// Search tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of nodes in [`SearchResults::all`].
    pub limit: usize,
    /// Largest edit distance a fuzzy match may have.
    pub max_distance: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

/// A node whose field contains the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlicedMatch<'a> {
    pub node: &'a Node,
    /// The field that matched, as stored on the node (trimmed).
    pub field: &'a str,
    /// Character offset of the query inside the field.
    pub index: usize,
}

/// A node whose closest field is a few edits away from the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatch<'a> {
    pub node: &'a Node,
    pub field: &'a str,
    pub distance: usize,
}

/// Ranked search output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults<'a> {
    pub exact: Vec<&'a Node>,
    pub sliced: Vec<SlicedMatch<'a>>,
    pub fuzzy: Vec<FuzzyMatch<'a>>,
    /// exact, then sliced, then fuzzy; unique by id, capped at the limit.
    pub all: Vec<&'a Node>,
}

impl SearchResults<'_> {
    /// Returns true if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Lowercased copies of each node's search fields.
#[derive(Debug, Default, Clone)]
pub struct SearchIndex {
    /// One entry per node, in node order; fields follow
    /// [`Node::search_fields`] order.
    lowered: Vec<Vec<String>>,
}

impl SearchIndex {
    /// Indexes `nodes`.
    pub fn build(nodes: &[Node]) -> Self {
        Self {
            lowered: nodes
                .iter()
                .map(|node| {
                    node.search_fields()
                        .into_iter()
                        .map(str::to_lowercase)
                        .collect()
                })
                .collect(),
        }
    }

    /// Classifies and ranks `nodes` against `raw_query`.
    ///
    /// `nodes` must be the slice the index was built from.
    pub fn search<'a>(
        &self,
        nodes: &'a [Node],
        raw_query: &str,
        options: SearchOptions,
    ) -> SearchResults<'a> {
        let query = raw_query.trim().to_lowercase();
        if query.is_empty() {
            return SearchResults::default();
        }
        let query_chars: Vec<char> = query.chars().collect();

        let mut exact: Vec<&Node> = Vec::new();
        let mut sliced: Vec<SlicedMatch> = Vec::new();
        let mut fuzzy: Vec<FuzzyMatch> = Vec::new();

        for (node, lowered) in nodes.iter().zip(&self.lowered) {
            let fields = node.search_fields();

            if lowered.iter().any(|field| *field == query) {
                exact.push(node);
                continue;
            }

            let slice = fields.iter().zip(lowered).find_map(|(&field, lower)| {
                lower.find(&query).map(|byte| SlicedMatch {
                    node,
                    field,
                    index: lower[..byte].chars().count(),
                })
            });
            if let Some(slice) = slice {
                sliced.push(slice);
                continue;
            }

            let mut best: Option<(usize, &str)> = None;
            for (&field, lower) in fields.iter().zip(lowered) {
                let distance = edit_distance(&query_chars, &lower.chars().collect::<Vec<_>>());
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((distance, field));
                }
                // Zero is an exact match, already excluded.
                if distance == 1 {
                    break;
                }
            }
            if let Some((distance, field)) = best {
                if distance > 0 && distance <= options.max_distance {
                    fuzzy.push(FuzzyMatch {
                        node,
                        field,
                        distance,
                    });
                }
            }
        }

        exact.sort_by(|a, b| a.id.cmp(&b.id));
        sliced.sort_by(|a, b| {
            a.index
                .cmp(&b.index)
                .then_with(|| a.field.chars().count().cmp(&b.field.chars().count()))
                .then_with(|| a.node.id.cmp(&b.node.id))
        });
        fuzzy.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| a.field.chars().count().cmp(&b.field.chars().count()))
                .then_with(|| a.node.id.cmp(&b.node.id))
        });

        let mut seen: HashSet<&str> = HashSet::new();
        let all: Vec<&Node> = exact
            .iter()
            .copied()
            .chain(sliced.iter().map(|m| m.node))
            .chain(fuzzy.iter().map(|m| m.node))
            .filter(|&node| seen.insert(node.id.as_str()))
            .take(options.limit)
            .collect();

        // by identity, so a duplicate id left out of `all` drops from its bucket
        let kept: HashSet<*const Node> = all.iter().map(|&node| node as *const Node).collect();
        exact.retain(|&node| kept.contains(&(node as *const Node)));
        sliced.retain(|m| kept.contains(&(m.node as *const Node)));
        fuzzy.retain(|m| kept.contains(&(m.node as *const Node)));

        debug!(
            "Search '{}': {} exact, {} sliced, {} fuzzy",
            query,
            exact.len(),
            sliced.len(),
            fuzzy.len()
        );

        SearchResults {
            exact,
            sliced,
            fuzzy,
            all,
        }
    }
}

impl NavGraph {
    /// Searches node ids, values and labels. See the module docs for the
    /// ranking rules.
    pub fn search(&self, query: &str, options: SearchOptions) -> SearchResults<'_> {
        self.search_index().search(self.nodes(), query, options)
    }
}

/// Levenshtein distance between two strings, by character.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    edit_distance(&a, &b)
}

/// Two-row Levenshtein; the rows are sized by the shorter input.
fn edit_distance(a: &[char], b: &[char]) -> usize {
    if a == b {
        return 0;
    }
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr: Vec<usize> = vec![0; short.len() + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}
