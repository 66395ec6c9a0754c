use crate::error::{MindMapError, Result};
use serde::{Deserialize, Serialize};

pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 4;
pub const DEFAULT_DEPTH: u8 = 2;

pub const MIN_NODES_PER_LEVEL: u8 = 3;
pub const MAX_NODES_PER_LEVEL: u8 = 8;
pub const DEFAULT_NODES_PER_LEVEL: u8 = 5;

/// Request body of `POST /generate_mindmap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes_per_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_links: Option<bool>,
}

/// Validated and clamped generation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub keyword: String,
    pub depth: u8,
    pub max_nodes_per_level: u8,
    pub include_links: bool,
}

impl GenerationRequest {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            depth: None,
            max_nodes_per_level: None,
            include_links: None,
        }
    }

    pub fn with_depth(mut self, depth: i64) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_max_nodes_per_level(mut self, max_nodes: i64) -> Self {
        self.max_nodes_per_level = Some(max_nodes);
        self
    }

    pub fn with_include_links(mut self, include_links: bool) -> Self {
        self.include_links = Some(include_links);
        self
    }

    /// Reject blank keywords and clamp the numeric fields into range.
    /// A missing or zero value selects the default.
    pub fn validate(&self) -> Result<GenerationParams> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            return Err(MindMapError::EmptyKeyword);
        }

        Ok(GenerationParams {
            keyword: keyword.to_string(),
            depth: clamp_or_default(self.depth, DEFAULT_DEPTH, MIN_DEPTH, MAX_DEPTH),
            max_nodes_per_level: clamp_or_default(
                self.max_nodes_per_level,
                DEFAULT_NODES_PER_LEVEL,
                MIN_NODES_PER_LEVEL,
                MAX_NODES_PER_LEVEL,
            ),
            include_links: self.include_links.unwrap_or(true),
        })
    }
}

fn clamp_or_default(value: Option<i64>, default: u8, min: u8, max: u8) -> u8 {
    match value {
        None | Some(0) => default,
        Some(v) => v.clamp(i64::from(min), i64::from(max)) as u8,
    }
}
