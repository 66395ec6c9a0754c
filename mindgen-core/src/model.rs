use serde::{Deserialize, Serialize};

/// One element of a generated outline tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            url: None,
            color: None,
            children: Vec::new(),
        }
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels below this node. A lone node has depth 0.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Total number of nodes in the subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Pre-order walk yielding each node together with its level (root = 0).
    pub fn walk(&self) -> Vec<(usize, &Node)> {
        let mut out = Vec::new();
        let mut stack = vec![(0usize, self)];
        while let Some((level, node)) = stack.pop() {
            out.push((level, node));
            for child in node.children.iter().rev() {
                stack.push((level + 1, child));
            }
        }
        out
    }

    /// All nodes sitting exactly `level` levels below this one.
    pub fn level(&self, level: usize) -> Vec<&Node> {
        self.walk()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, node)| node)
            .collect()
    }
}

/// Generated tree wrapped with the keyword as it was requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindMapResponse {
    pub data: Node,
    pub keyword: String,
    pub timestamp: String,
}

impl MindMapResponse {
    pub fn new(data: Node, keyword: String) -> Self {
        Self {
            data,
            keyword,
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
