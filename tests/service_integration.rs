//! Service envelopes end to end: JSON request in, JSON response out.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use lectern::audio::{SpeechError, SpeechSynthesizer};
use lectern::Config;
use lectern::Service;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

struct FixedSynth;

impl SpeechSynthesizer for FixedSynth {
    fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>, SpeechError> {
        Ok(b"ID3fake-mp3".to_vec())
    }
}

fn service(audio_dir: &Path) -> Service<FixedSynth> {
    let mut config = Config::default();
    config.audio.output_dir = audio_dir.to_path_buf();
    Service::with_synthesizer(config, FixedSynth)
}

fn call(svc: &Service<FixedSynth>, request: Value) -> Value {
    let out = svc.handle_line(&request.to_string()).expect("response encodes");
    serde_json::from_str(&out).expect("response is JSON")
}

#[test]
fn test_process_file_reports_preview() {
    let dir = TempDir::new().unwrap();
    let svc = service(dir.path());
    let path = testdata_path().join("project_brief.txt");

    let out = call(
        &svc,
        serde_json::json!({
            "operation": "process-file",
            "filePath": path,
            "fileName": "project_brief.txt",
            "fileType": ".txt",
        }),
    );

    assert_eq!(out["success"], true);
    assert_eq!(out["contentType"], "document");
    assert_eq!(out["fileType"], ".txt");
    let preview = out["preview"].as_str().unwrap();
    assert!(preview.starts_with("Project Brief."));
    assert!(preview.ends_with("..."));
    assert_eq!(preview.chars().count(), 203);
    assert!(out["contentLength"].as_u64().unwrap() > 1000);
}

#[test]
fn test_process_file_routes_code() {
    let dir = TempDir::new().unwrap();
    let svc = service(dir.path());
    let out = call(
        &svc,
        serde_json::json!({
            "operation": "process-file",
            "filePath": testdata_path().join("sort.py"),
            "fileType": ".PY",
        }),
    );
    assert_eq!(out["contentType"], "code");
    assert_eq!(out["fileType"], ".py");
}

#[test]
fn test_unsupported_type_is_client_error() {
    let dir = TempDir::new().unwrap();
    let svc = service(dir.path());
    let out = call(
        &svc,
        serde_json::json!({
            "operation": "process-file",
            "filePath": testdata_path().join("notes.txt"),
            "fileType": ".xyz",
        }),
    );
    assert_eq!(out["success"], false);
    assert_eq!(out["status"], 400);
    assert_eq!(out["error"], "unsupported_file_type");
}

#[test]
fn test_get_content_full_returns_raw_text() {
    let dir = TempDir::new().unwrap();
    let svc = service(dir.path());
    let out = call(
        &svc,
        serde_json::json!({
            "operation": "get-content",
            "filePath": testdata_path().join("notes.txt"),
            "contentType": "full",
        }),
    );
    assert_eq!(out["success"], true);
    assert_eq!(out["isCode"], false);
    assert_eq!(out["contentType"], "full");
    assert_eq!(out["content"].as_str().unwrap().trim(), "Remember to water the plants.");
}

#[test]
fn test_get_content_explains_code_in_either_mode() {
    let dir = TempDir::new().unwrap();
    let svc = service(dir.path());
    for mode in ["full", "summary"] {
        let out = call(
            &svc,
            serde_json::json!({
                "operation": "get-content",
                "filePath": testdata_path().join("LinkedList.java"),
                "contentType": mode,
            }),
        );
        assert_eq!(out["isCode"], true);
        let content = out["content"].as_str().unwrap();
        assert!(content.starts_with("TARGET: WHAT THIS CODE DOES:"));
        assert!(content.contains("--- End of Analysis ---"));
    }
}

#[test]
fn test_get_content_rejects_unknown_mode() {
    let dir = TempDir::new().unwrap();
    let svc = service(dir.path());
    let out = call(
        &svc,
        serde_json::json!({
            "operation": "get-content",
            "filePath": testdata_path().join("notes.txt"),
            "contentType": "brief",
        }),
    );
    assert_eq!(out["status"], 400);
    assert_eq!(out["error"], "invalid_request");
}

#[test]
fn test_get_content_missing_file_is_server_error() {
    let dir = TempDir::new().unwrap();
    let svc = service(dir.path());
    let out = call(
        &svc,
        serde_json::json!({
            "operation": "get-content",
            "filePath": dir.path().join("gone.txt"),
            "contentType": "summary",
        }),
    );
    assert_eq!(out["success"], false);
    assert_eq!(out["status"], 500);
}

#[test]
fn test_generate_audio_writes_file() {
    let dir = TempDir::new().unwrap();
    let audio_dir = dir.path().join("audio");
    let svc = service(&audio_dir);
    let out = call(
        &svc,
        serde_json::json!({
            "operation": "generate-audio",
            "text": "• Sorting leads to ordered data",
            "language": "en",
        }),
    );
    assert_eq!(out["success"], true);
    let url = out["audioUrl"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:8001/"));
    assert!(url.ends_with(".mp3"));

    let written: Vec<_> = std::fs::read_dir(&audio_dir).unwrap().collect();
    assert_eq!(written.len(), 1);
}

#[test]
fn test_generate_audio_rejects_blank_text() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir.path().join("audio"));
    let out = call(&svc, serde_json::json!({"operation": "generate-audio", "text": "   "}));
    assert_eq!(out["success"], false);
    assert_eq!(out["status"], 500);
    assert_eq!(out["error"], "audio_generation_failure");
    assert!(!dir.path().join("audio").exists());
}
