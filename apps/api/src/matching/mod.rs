// Résumé ↔ JD matching: skill vocabulary and gap analysis, role detection,
// and the semantic similarity that feeds the blended ATS score.

pub mod roles;
pub mod similarity;
pub mod skills;

pub use similarity::{Embedder, HttpEmbedder, LexicalEmbedder};
pub use skills::identify_missing_skills;
