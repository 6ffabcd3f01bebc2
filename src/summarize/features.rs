//! Feature module detection.

use lazy_static::lazy_static;
use regex::Regex;

use crate::finding::{Finding, FindingKind};

const DETECTOR: &str = "features";

/// Features listed by name before the rest are counted.
pub const MAX_LISTED_FEATURES: usize = 5;

static FEATURE_TABLE: &[(&str, &[&str])] = &[
    (
        "Authentication & Authorization",
        &["authentication", "login", "register", "signup", "jwt", "oauth", "auth", "authorization"],
    ),
    (
        "CRUD Operations",
        &["crud", "create", "read", "update", "delete", "add", "edit", "remove"],
    ),
    (
        "User Management",
        &["user management", "user admin", "user profile", "account management"],
    ),
    (
        "Dashboard & Analytics",
        &["dashboard", "analytics", "reports", "statistics", "metrics", "visualization"],
    ),
    ("Search & Filter", &["search", "filter", "query", "find", "lookup"]),
    ("API Development", &["api", "rest", "restful", "endpoint", "web service"]),
    (
        "Database Design",
        &["database", "schema", "model", "entity", "table", "collection"],
    ),
    ("Security", &["security", "encryption", "secure", "protection", "safety"]),
    ("Testing", &["testing", "test", "unit test", "integration test", "qa"]),
    ("Deployment", &["deployment", "deploy", "production", "hosting", "server"]),
    ("Documentation", &["documentation", "docs", "readme", "guide", "manual"]),
    ("Responsive Design", &["responsive", "mobile", "adaptive", "device"]),
    (
        "Real-time Features",
        &["real-time", "realtime", "live", "websocket", "socket"],
    ),
    ("File Upload", &["upload", "file upload", "image upload", "attachment"]),
    ("Notification System", &["notification", "alert", "email", "sms", "push"]),
    ("Payment Integration", &["payment", "checkout", "transaction", "billing"]),
    (
        "Admin Panel",
        &["admin", "admin panel", "administration", "backend panel"],
    ),
];

lazy_static! {
    /// Keywords match at the start of a word, so "testing" counts for "test"
    /// but "already" does not count for "read".
    static ref FEATURE_PATTERNS: Vec<Regex> = FEATURE_TABLE
        .iter()
        .map(|(_, keywords)| {
            let alternatives: Vec<String> = keywords.iter().map(|k| regex::escape(k)).collect();
            Regex::new(&format!(r"(?i)\b(?:{})", alternatives.join("|"))).unwrap()
        })
        .collect();
}

/// Feature labels whose keywords occur in `text`, in table order.
pub fn detect_features(text: &str) -> Vec<Finding> {
    FEATURE_TABLE
        .iter()
        .zip(FEATURE_PATTERNS.iter())
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|((label, _), _)| Finding::new(FindingKind::FeatureModule, DETECTOR, *label))
        .collect()
}

/// "Key features include: …", naming at most five and counting the rest.
pub fn features_sentence(features: &[Finding]) -> Option<String> {
    if features.is_empty() {
        return None;
    }
    let listed: Vec<&str> = features
        .iter()
        .take(MAX_LISTED_FEATURES)
        .map(|f| f.text.as_str())
        .collect();
    let sentence = if features.len() <= MAX_LISTED_FEATURES {
        format!("Key features include: {}.", listed.join(", "))
    } else {
        format!(
            "Key features include: {} and {} more modules.",
            listed.join(", "),
            features.len() - MAX_LISTED_FEATURES
        )
    };
    Some(sentence)
}
