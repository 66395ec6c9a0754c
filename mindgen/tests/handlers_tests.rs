use mindgen::handlers::*;
use mindgen_core::Node;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_expand_path_plain() {
    assert_eq!(
        expand_path("/tmp/outline.md"),
        std::path::PathBuf::from("/tmp/outline.md")
    );
}

#[test]
fn test_expand_path_tilde() {
    let expanded = expand_path("~/outline.md");
    assert!(!expanded.to_string_lossy().starts_with('~'));
    assert!(expanded.ends_with("outline.md"));
}

#[test]
fn test_load_corpus_builtin() {
    let corpus = load_corpus(None).unwrap();
    assert_eq!(corpus.topics.len(), 3);
}

#[test]
fn test_load_corpus_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(
        temp_file,
        r#"{{"topics": [{{"keyword": "烹饪", "categories": [{{"name": "刀工", "subtopics": ["切丝"]}}]}}]}}"#
    )?;

    let path = temp_file.path().to_string_lossy().to_string();
    let corpus = load_corpus(Some(&path))?;

    assert_eq!(corpus.topics[0].keyword, "烹饪");
    assert!(corpus.urls.is_empty());
    Ok(())
}

#[test]
fn test_load_corpus_missing_file() {
    let path = "/nonexistent/mindgen/corpus.json".to_string();
    let err = load_corpus(Some(&path)).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to load corpus"));
}

#[test]
fn test_load_corpus_invalid_json() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "not json").unwrap();
    let path = temp_file.path().to_string_lossy().to_string();
    assert!(load_corpus(Some(&path)).is_err());
}

#[test]
fn test_load_corpus_rejects_degenerate_topics() {
    let cases = [
        r#"{"topics": [{"keyword": "", "categories": [{"name": "x", "subtopics": ["y"]}]}]}"#,
        r#"{"topics": [{"keyword": "烹饪", "categories": []}]}"#,
        r#"{"topics": [{"keyword": "烹饪", "categories": [{"name": "刀工", "subtopics": []}]}]}"#,
    ];

    for case in cases {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{}", case).unwrap();
        let path = temp_file.path().to_string_lossy().to_string();
        let err = load_corpus(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid corpus"), "{case}");
    }
}

#[test]
fn test_request_from_parts() {
    let request = request_from_parts("人工智能", Some(3), None, true);
    assert_eq!(request.keyword, "人工智能");
    assert_eq!(request.depth, Some(3));
    assert_eq!(request.max_nodes_per_level, None);
    assert_eq!(request.include_links, Some(false));

    let params = request.validate().unwrap();
    assert_eq!(params.max_nodes_per_level, 5);
    assert!(!params.include_links);
}

#[test]
fn test_generate_seeded_is_reproducible() {
    let corpus = load_corpus(None).unwrap();
    let request = request_from_parts("数据科学", Some(4), Some(6), false);

    let a = generate_seeded(&corpus, &request, 2025).unwrap();
    let b = generate_seeded(&corpus, &request, 2025).unwrap();
    assert_eq!(a.data, b.data);
    assert_eq!(a.data.id, "node-1");
    assert_eq!(a.data.depth(), 4);
}

#[test]
fn test_generate_seeded_rejects_blank_keyword() {
    let corpus = load_corpus(None).unwrap();
    let request = request_from_parts("  ", None, None, false);
    assert!(generate_seeded(&corpus, &request, 1).is_err());
}

#[test]
fn test_render_outline_formats() {
    let corpus = load_corpus(None).unwrap();
    let response =
        generate_seeded(&corpus, &request_from_parts("区块链", Some(1), None, false), 9).unwrap();

    let mermaid = render_outline(&response, "mermaid").unwrap();
    assert!(mermaid.starts_with("mindmap\n  root((区块链))"));

    let json = render_outline(&response, "json").unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["keyword"], "区块链");
    let data: Node = serde_json::from_value(value["data"].clone()).unwrap();
    assert_eq!(data.children.len(), 5);

    assert!(render_outline(&response, "md").unwrap().starts_with("# 区块链"));
    assert!(render_outline(&response, "csv").is_err());
}

#[test]
fn test_colorize_outline_keeps_labels() {
    let outline = "人工智能\n├── 机器学习 <https://zh.wikipedia.org/wiki/机器学习>\n└── 伦理问题\n";
    let colored = colorize_outline(outline);

    let lines: Vec<&str> = colored.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "人工智能");
    assert!(lines[1].starts_with("├── 机器学习 "));
    assert!(lines[1].contains("<https://zh.wikipedia.org/wiki/机器学习>"));
    assert_eq!(lines[2], "└── 伦理问题");
}
