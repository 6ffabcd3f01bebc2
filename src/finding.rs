//! Core types for detector output.

use serde::Serialize;

/// Kinds of atomic facts the detectors produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    ProgramType,
    ClassDescriptor,
    FunctionDescriptor,
    Concept,
    Algorithm,
    LanguageFeature,
    TechStackItem,
    FeatureModule,
    Deliverable,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::ProgramType => "program_type",
            FindingKind::ClassDescriptor => "class_descriptor",
            FindingKind::FunctionDescriptor => "function_descriptor",
            FindingKind::Concept => "concept",
            FindingKind::Algorithm => "algorithm",
            FindingKind::LanguageFeature => "language_feature",
            FindingKind::TechStackItem => "tech_stack_item",
            FindingKind::FeatureModule => "feature_module",
            FindingKind::Deliverable => "deliverable",
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected fact with the detector that produced it.
///
/// Findings never reference each other; every detector reads only the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub text: String,
    pub detector: &'static str,
}

impl Finding {
    pub fn new(kind: FindingKind, detector: &'static str, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            detector,
        }
    }
}

/// Display strings of a finding list, in order.
pub fn texts(findings: &[Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.text.as_str()).collect()
}
