pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{expand_path, generate_seeded, load_corpus, render_outline, request_from_parts};

// Re-export generation from mindgen-core
pub use mindgen_core::{Corpus, GenerationRequest, MindMapResponse, generate_mindmap};
