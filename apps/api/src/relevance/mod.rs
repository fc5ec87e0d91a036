// Resume relevance engine.
// Implements: JD skill extraction, resume matching, scoring, and verdicts.
// Pure functions only; storage and file decoding live in `storage` and `documents`.

pub mod extractor;
pub mod handlers;
pub mod scorer;
pub mod similarity;
pub mod skills;
pub mod verdict;
