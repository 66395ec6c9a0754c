// Mind-map tree generation

use crate::corpus::{Category, Corpus};
use crate::model::Node;
use crate::request::GenerationParams;
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Decorative colors for first-level branches.
pub const PALETTE: [&str; 15] = [
    "#4299e1", "#3182ce", "#2b6cb0", // blue
    "#48bb78", "#38a169", "#2f855a", // green
    "#ed8936", "#dd6b20", "#c05621", // orange
    "#9f7aea", "#805ad5", "#6b46c1", // purple
    "#f56565", "#e53e3e", "#c53030", // red
];

/// Synthetic detail leaves per aspect node.
const DETAIL_RANGE: std::ops::RangeInclusive<usize> = 1..=3;

/// Source of node identifiers. Ids handed out by one source are distinct.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// `node-<unix millis>-<sequence>`, one source per generated tree.
#[derive(Debug, Default)]
pub struct ClockIdSource {
    seq: u64,
}

impl ClockIdSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for ClockIdSource {
    fn next_id(&mut self) -> String {
        self.seq += 1;
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        format!("node-{}-{:04}", millis, self.seq)
    }
}

/// Deterministic `node-1`, `node-2`, ... ids.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("node-{}", self.next)
    }
}

pub struct TreeGenerator<'a> {
    corpus: &'a Corpus,
}

impl<'a> TreeGenerator<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    /// Build an outline tree exactly `params.depth` levels deep.
    ///
    /// Levels 1 and 2 come from the corpus (or the generic fallback), shuffled
    /// and truncated to `max_nodes_per_level`. Levels 3 and 4 are synthetic.
    /// Never fails for clamped parameters.
    pub fn generate<R, I>(&self, params: &GenerationParams, rng: &mut R, ids: &mut I) -> Node
    where
        R: Rng,
        I: IdSource,
    {
        let topic = self.corpus.resolve(&params.keyword);
        debug!(
            "Generating depth {} outline for '{}' (matched: {}, resolved: '{}')",
            params.depth, params.keyword, topic.matched, topic.keyword
        );

        let root_url = if params.include_links {
            self.corpus.url_for(&topic.keyword).map(str::to_string)
        } else {
            None
        };
        let mut root = Node::new(ids.next_id(), topic.keyword).with_url(root_url);

        let mut categories = topic.categories;
        categories.shuffle(rng);
        categories.truncate(usize::from(params.max_nodes_per_level));

        for Category { name, subtopics } in categories {
            let color = PALETTE.choose(rng).copied().unwrap_or(PALETTE[0]);
            let mut branch = Node::new(ids.next_id(), name).with_color(color);
            if params.depth > 1 {
                branch.children = self.subtopic_nodes(subtopics, params, rng, ids);
            }
            root.children.push(branch);
        }

        root
    }

    fn subtopic_nodes<R, I>(
        &self,
        mut subtopics: Vec<String>,
        params: &GenerationParams,
        rng: &mut R,
        ids: &mut I,
    ) -> Vec<Node>
    where
        R: Rng,
        I: IdSource,
    {
        subtopics.shuffle(rng);
        subtopics.truncate(usize::from(params.max_nodes_per_level));

        subtopics
            .into_iter()
            .map(|name| {
                let url = if params.include_links {
                    self.corpus.url_for(&name).map(str::to_string)
                } else {
                    None
                };
                let mut node = Node::new(ids.next_id(), name).with_url(url);
                if params.depth > 2 {
                    node.children = aspect_nodes(&node.name, params, rng, ids);
                }
                node
            })
            .collect()
    }
}

fn aspect_nodes<R, I>(parent: &str, params: &GenerationParams, rng: &mut R, ids: &mut I) -> Vec<Node>
where
    R: Rng,
    I: IdSource,
{
    let count = rng.gen_range(2..=usize::from(params.max_nodes_per_level));
    (1..=count)
        .map(|i| {
            let mut node = Node::new(ids.next_id(), format!("{}的方面{}", parent, i));
            if params.depth > 3 {
                node.children = detail_nodes(rng, ids);
            }
            node
        })
        .collect()
}

fn detail_nodes<R, I>(rng: &mut R, ids: &mut I) -> Vec<Node>
where
    R: Rng,
    I: IdSource,
{
    let count = rng.gen_range(DETAIL_RANGE);
    (1..=count)
        .map(|j| Node::new(ids.next_id(), format!("详细内容{}", j)))
        .collect()
}
