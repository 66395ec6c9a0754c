//! Core library for `mindgen`: the topic corpus, the randomized outline
//! generator and the renderers used by the CLI and the HTTP service.

pub mod corpus;
pub mod error;
pub mod generator;
pub mod model;
pub mod report;
pub mod request;

pub use corpus::Corpus;
pub use error::{MindMapError, Result};
pub use generator::{ClockIdSource, IdSource, SequentialIds, TreeGenerator};
pub use model::{MindMapResponse, Node};
pub use request::{GenerationParams, GenerationRequest};

/// Validate a request and generate a fresh outline with the thread-local RNG
/// and clock-based ids.
pub fn generate_mindmap(corpus: &Corpus, request: &GenerationRequest) -> Result<MindMapResponse> {
    let params = request.validate()?;
    let tree = TreeGenerator::new(corpus).generate(
        &params,
        &mut rand::thread_rng(),
        &mut ClockIdSource::new(),
    );
    Ok(MindMapResponse::new(tree, request.keyword.clone()))
}

pub fn print_banner() {
    eprintln!("{}", BANNER);
}

const BANNER: &str = r#"
           _           __
  __ _    (_)__  ___/ /__ ____ ___
 /  ' \  / / _ \/ _  / _ `/ -_) _ \
/_/_/_/ /_/_//_/\_,_/\_, /\__/_//_/
                    /___/
"#;
