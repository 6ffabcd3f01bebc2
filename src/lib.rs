//! Lectern - rule-based code explanation and document summarization.
//!
//! Lectern turns source files into teaching-style explanations and prose
//! documents into compact summaries, and can read either aloud. Every stage
//! is a deterministic keyword or pattern rule; nothing is learned.
//!
//! # Architecture
//!
//! - `extract`: PDF, Word, PowerPoint, text and code extraction
//! - `explain`: program type, syntax scan, concepts, algorithms, language
//!   features and learning outcomes for code
//! - `summarize`: topic, technology stack, features, deliverables and
//!   length balancing for documents
//! - `narrative`: ordered sections and audio-safe re-encoding
//! - `audio`: speech cleaning and synthesis
//! - `service`: request/response envelopes for the three operations
//! - `batch`: parallel directory processing
//! - `config`: YAML configuration
//! - `report`: output formatting (pretty, JSON)

pub mod audio;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod explain;
pub mod extract;
pub mod finding;
pub mod narrative;
pub mod report;
pub mod service;
pub mod source;
pub mod summarize;

pub use audio::{AudioGenerator, GoogleTts, SpeechSynthesizer};
pub use config::Config;
pub use error::ProcessError;
pub use explain::{explain, explain_code, CodeExplanation};
pub use extract::extract;
pub use finding::{Finding, FindingKind};
pub use narrative::{NarrativeDocument, Section};
pub use service::{ContentMode, Request, Response, Service};
pub use source::{ContentKind, FileKind, SourceArtifact};
pub use summarize::{summarize, summarize_text, DocumentSummary};
