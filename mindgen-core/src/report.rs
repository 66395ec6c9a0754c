// Outline rendering for generated mind maps

use crate::model::{MindMapResponse, Node};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlineFormat {
    Text,
    Json,
    Markdown,
    Mermaid,
}

impl OutlineFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutlineFormat::Text),
            "json" => Some(OutlineFormat::Json),
            "markdown" | "md" => Some(OutlineFormat::Markdown),
            "mermaid" => Some(OutlineFormat::Mermaid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub depth: usize,
    pub widest_level: usize,
}

impl TreeStats {
    pub fn of(root: &Node) -> Self {
        let depth = root.depth();
        let widest_level = (0..=depth).map(|l| root.level(l).len()).max().unwrap_or(1);
        Self {
            total_nodes: root.node_count(),
            depth,
            widest_level,
        }
    }
}

pub fn render(response: &MindMapResponse, format: OutlineFormat) -> Result<String, serde_json::Error> {
    match format {
        OutlineFormat::Text => Ok(generate_text_outline(response)),
        OutlineFormat::Json => generate_json_outline(response),
        OutlineFormat::Markdown => Ok(generate_markdown_outline(response)),
        OutlineFormat::Mermaid => Ok(generate_mermaid_outline(&response.data)),
    }
}

pub fn generate_text_outline(response: &MindMapResponse) -> String {
    let stats = TreeStats::of(&response.data);

    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Keyword: {}\n", response.keyword));
    report.push_str(&format!("  Generated: {}\n", response.timestamp));
    report.push_str(&format!("  Nodes: {}\n", stats.total_nodes));
    report.push_str(&format!("  Depth: {}\n", stats.depth));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str(&format_label(&response.data));
    report.push('\n');
    push_text_children(&mut report, &response.data, "");
    report
}

fn push_text_children(report: &mut String, node: &Node, prefix: &str) {
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let (branch, extension) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        report.push_str(prefix);
        report.push_str(branch);
        report.push_str(&format_label(child));
        report.push('\n');
        push_text_children(report, child, &format!("{}{}", prefix, extension));
    }
}

fn format_label(node: &Node) -> String {
    match node.url {
        Some(ref url) => format!("{} <{}>", node.name, url),
        None => node.name.clone(),
    }
}

pub fn generate_json_outline(response: &MindMapResponse) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(response)
}

pub fn generate_markdown_outline(response: &MindMapResponse) -> String {
    let mut report = format!("# {}\n\n", markdown_label(&response.data));
    report.push_str(&format!("_Generated {}_\n\n", response.timestamp));

    for (level, node) in response.data.walk().into_iter().skip(1) {
        report.push_str(&"  ".repeat(level - 1));
        report.push_str("- ");
        report.push_str(&markdown_label(node));
        report.push('\n');
    }
    report
}

fn markdown_label(node: &Node) -> String {
    match node.url {
        Some(ref url) => format!("[{}]({})", node.name, url),
        None => node.name.clone(),
    }
}

/// Mermaid `mindmap` diagram. Indentation carries the hierarchy.
pub fn generate_mermaid_outline(root: &Node) -> String {
    let mut diagram = String::from("mindmap\n");
    for (level, node) in root.walk() {
        diagram.push_str(&"  ".repeat(level + 1));
        if level == 0 {
            diagram.push_str(&format!("root(({}))", mermaid_text(&node.name)));
        } else {
            diagram.push_str(&mermaid_text(&node.name));
        }
        diagram.push('\n');
    }
    diagram
}

// Mermaid treats brackets and parentheses as shape delimiters.
fn mermaid_text(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '(' | '[' | '{' => '‹',
            ')' | ']' | '}' => '›',
            other => other,
        })
        .collect()
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
