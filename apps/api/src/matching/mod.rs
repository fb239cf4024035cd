// Resume / job description matching.
// Pipeline: document text → prompt → remote scorer → reply parsing.
// All model calls go through llm_client via the `Scorer` trait.

pub mod handlers;
pub mod prompts;
pub mod response;
pub mod scorer;
