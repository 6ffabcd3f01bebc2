//! Document summarization pipeline.
//!
//! normalize → topic → tech stack → features → deliverables → balance.
//! Every detector reads the normalized text; none consults another's output.

mod balance;
mod deliverables;
mod features;
mod normalize;
mod runner;
mod tech_stack;
mod topic;

pub use balance::LengthBalancer;
pub use deliverables::{ai_first_sentence, deliverables_sentence, detect_deliverables, epics_sentence};
pub use features::{detect_features, features_sentence, MAX_LISTED_FEATURES};
pub use normalize::{char_len, normalize_text, SentencePool, MIN_SUMMARY_INPUT};
pub use runner::{summarize, summarize_text, DocumentSummary};
pub use tech_stack::{detect_tech_stack, TechCategory, TechItem, TechStack};
pub use topic::{extract_topic, Topic};
