use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use mindgen_core::report::{OutlineFormat, render, save_report};
use mindgen_core::{
    Corpus, GenerationRequest, MindMapResponse, SequentialIds, TreeGenerator, generate_mindmap,
};
use mindgen_service::{MindMapClient, MindMapServer, Origin, ServerConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

// Helper functions for the generate handler

/// Expand a leading `~` in a user supplied path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load the corpus from a JSON file, or the built-in one when no path is given
pub fn load_corpus(path: Option<&String>) -> Result<Corpus> {
    match path {
        Some(path) => {
            let path = expand_path(path);
            Corpus::from_file(&path)
                .with_context(|| format!("Failed to load corpus {}", path.display()))
        }
        None => Ok(Corpus::builtin()),
    }
}

/// Assemble a request from CLI values. Clamping happens in `validate`.
pub fn request_from_parts(
    keyword: &str,
    depth: Option<i64>,
    max_nodes: Option<i64>,
    no_links: bool,
) -> GenerationRequest {
    GenerationRequest {
        keyword: keyword.to_string(),
        depth,
        max_nodes_per_level: max_nodes,
        include_links: Some(!no_links),
    }
}

/// Generate with a seeded RNG and sequential ids; equal seeds give equal trees
pub fn generate_seeded(
    corpus: &Corpus,
    request: &GenerationRequest,
    seed: u64,
) -> mindgen_core::Result<MindMapResponse> {
    let params = request.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let tree = TreeGenerator::new(corpus).generate(&params, &mut rng, &mut SequentialIds::new());
    Ok(MindMapResponse::new(tree, request.keyword.clone()))
}

pub fn render_outline(response: &MindMapResponse, format: &str) -> Result<String> {
    let format =
        OutlineFormat::from_str(format).ok_or_else(|| anyhow!("Unknown outline format '{}'", format))?;
    Ok(render(response, format)?)
}

/// Dim the trailing `<url>` of each outline line for terminal display.
pub fn colorize_outline(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.lines() {
        match line.rfind(" <") {
            Some(idx) if line.ends_with('>') => {
                let (label, url) = line.split_at(idx + 1);
                out.push_str(label);
                out.push_str(&url.bright_black().to_string());
            }
            _ => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

pub async fn handle_serve(args: &ArgMatches) -> Result<()> {
    init_tracing("info");

    let host = args
        .get_one::<String>("host")
        .map(String::as_str)
        .unwrap_or("0.0.0.0");
    let port = *args.get_one::<u16>("port").unwrap_or(&8000);
    let delay_ms = *args.get_one::<u64>("delay-ms").unwrap_or(&1000);
    let corpus = load_corpus(args.get_one::<String>("corpus"))?;

    let config = ServerConfig::default()
        .with_host(host)
        .with_port(port)
        .with_response_delay(Duration::from_millis(delay_ms));

    print_divider();
    println!("{}", "  MINDGEN SERVICE".bright_white().bold());
    print_divider();
    println!(
        "{} Listening: {}",
        "→".blue(),
        format!("http://{}", config.bind_address()).bright_white()
    );
    println!(
        "{} Topics: {}",
        "→".blue(),
        corpus.keywords().collect::<Vec<_>>().join(", ").cyan()
    );
    println!("{} Delay: {} ms", "→".blue(), delay_ms.to_string().cyan());
    println!();

    MindMapServer::new(corpus)
        .with_config(config)
        .run()
        .await
        .context("Server stopped")?;
    Ok(())
}

pub async fn handle_generate(args: &ArgMatches) -> Result<()> {
    init_tracing("warn");

    let keyword = args
        .get_one::<String>("KEYWORD")
        .ok_or_else(|| anyhow!("A keyword is required"))?;
    let corpus = load_corpus(args.get_one::<String>("corpus"))?;
    let request = request_from_parts(
        keyword,
        args.get_one::<i64>("depth").copied(),
        args.get_one::<i64>("max-nodes").copied(),
        args.get_flag("no-links"),
    );
    let format = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    debug!("CLI request: {:?}", request);

    let response = if let Some(remote) = args.get_one::<Url>("remote") {
        generate_remote(remote, &corpus, &request).await?
    } else if let Some(seed) = args.get_one::<u64>("seed") {
        generate_seeded(&corpus, &request, *seed)?
    } else {
        generate_mindmap(&corpus, &request)?
    };

    let content = render_outline(&response, format)?;
    let format_is_text = OutlineFormat::from_str(format) == Some(OutlineFormat::Text);

    match args.get_one::<String>("output") {
        Some(output) => {
            let path = expand_path(output);
            save_report(&content, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Outline saved to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None if format_is_text && std::io::stdout().is_terminal() => {
            print!("{}", colorize_outline(&content))
        }
        None => print!("{}", content),
    }
    Ok(())
}

async fn generate_remote(
    remote: &Url,
    corpus: &Corpus,
    request: &GenerationRequest,
) -> Result<MindMapResponse> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Asking {} ...", remote));

    let client = MindMapClient::new(remote.as_str())?;
    let result = client.generate_or_fallback(corpus, request).await;
    spinner.finish_and_clear();

    let (response, origin) = result?;
    if origin == Origin::Local {
        eprintln!(
            "{} Service at {} unavailable, generated locally",
            "⚠".yellow().bold(),
            remote
        );
    }
    Ok(response)
}

pub fn handle_topics(args: &ArgMatches) -> Result<()> {
    let corpus = load_corpus(args.get_one::<String>("corpus"))?;

    print_divider();
    println!("{}", "  KNOWN TOPICS".bright_white().bold());
    print_divider();
    println!();

    for topic in &corpus.topics {
        let link = corpus
            .url_for(&topic.keyword)
            .map(|url| format!("  {}", url.bright_black()))
            .unwrap_or_default();
        println!("{}{}", topic.keyword.bright_cyan().bold(), link);
        for category in &topic.categories {
            println!(
                "  {} {} ({} subtopics)",
                "•".yellow(),
                category.name,
                category.subtopics.len().to_string().cyan()
            );
        }
        println!();
    }
    println!(
        "{} Unknown keywords use the generic five-branch template.",
        "ℹ".blue()
    );
    Ok(())
}
