//! Command-line interface for lectern.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::batch::{self, BatchOutcome, FileFailure};
use crate::config::{self, Config};
use crate::explain::explain;
use crate::extract::extract;
use crate::report;
use crate::service::{render_content, AudioRequest, ContentMode, ProcessFileRequest, Service};
use crate::source::ContentKind;
use crate::summarize::summarize;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Explain source code and summarize documents, optionally as speech.
///
/// Lectern reads PDF, Word, PowerPoint, text and source files. Code is
/// explained (program type, structure, concepts, algorithms, learning
/// outcomes); documents are summarized around their topic, technology stack
/// and features. Everything is rule-based and deterministic.
#[derive(Parser)]
#[command(name = "lectern")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a file and show a preview of its text
    Process(ProcessArgs),
    /// Explain code or summarize documents in a file or directory
    #[command(visible_alias = "read")]
    Content(ContentArgs),
    /// Print the explanation of a source file
    Explain(FileArgs),
    /// Print the summary of a document
    Summarize(FileArgs),
    /// Render text or a file's content to speech
    Audio(AudioArgs),
    /// Serve JSON requests from stdin, one per line
    Handle,
    /// Create a lectern config file from the template
    Init(InitArgs),
}

/// Arguments for the process command.
#[derive(Parser)]
pub struct ProcessArgs {
    /// File to process
    pub file: PathBuf,

    /// Declared file type, e.g. ".pdf" (default: the file's extension)
    #[arg(short = 't', long = "type")]
    pub file_type: Option<String>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the content command.
#[derive(Parser)]
pub struct ContentArgs {
    /// File or directory to read
    pub path: PathBuf,

    /// Content type for documents: full or summary
    #[arg(short = 't', long = "type", default_value = "summary")]
    pub content_type: String,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Hide the progress bar for directories
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the explain and summarize commands.
#[derive(Parser)]
pub struct FileArgs {
    pub file: PathBuf,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Arguments for the audio command.
#[derive(Parser)]
pub struct AudioArgs {
    /// Text to speak
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Speak the processed content of this file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Content type when reading a document: full or summary
    #[arg(short = 't', long = "type", default_value = "summary")]
    pub content_type: String,

    /// Language code (default: from config)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "lectern.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

const CONFIG_TEMPLATE: &str = include_str!("templates/lectern.yaml");

fn check_format(format: &str, allowed: &[&str]) -> bool {
    if allowed.contains(&format) {
        return true;
    }
    eprintln!(
        "Error: invalid format {:?}, must be one of: {}",
        format,
        allowed.join(", ")
    );
    false
}

fn parse_mode(value: &str) -> Option<ContentMode> {
    match value.parse::<ContentMode>() {
        Ok(mode) => Some(mode),
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}

/// Load and validate configuration, reporting problems on stderr.
fn load_config(explicit: Option<&Path>) -> Option<Config> {
    match Config::load(explicit) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'lectern init' to create a config file");
            None
        }
    }
}

/// Run the process command.
pub fn run_process(args: &ProcessArgs, config_path: Option<&Path>) -> anyhow::Result<i32> {
    if !check_format(&args.format, &["pretty", "json"]) {
        return Ok(EXIT_ERROR);
    }
    let Some(config) = load_config(config_path) else {
        return Ok(EXIT_ERROR);
    };

    let file_type = match &args.file_type {
        Some(t) => t.clone(),
        None => args
            .file
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default(),
    };

    let service = Service::new(config)?;
    let request = ProcessFileRequest {
        file_path: args.file.clone(),
        file_name: args
            .file
            .file_name()
            .map(|n| n.to_string_lossy().to_string()),
        file_type,
    };

    match service.process_file(&request) {
        Ok(resp) => {
            if args.format == "json" {
                report::write_envelope(&resp)?;
            } else {
                report::write_process_pretty(&args.file, &resp);
            }
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(EXIT_FAILED)
        }
    }
}

/// Run the content command.
pub fn run_content(args: &ContentArgs, config_path: Option<&Path>) -> anyhow::Result<i32> {
    if !check_format(&args.format, &["pretty", "json"]) {
        return Ok(EXIT_ERROR);
    }
    let Some(mode) = parse_mode(&args.content_type) else {
        return Ok(EXIT_ERROR);
    };
    let Some(config) = load_config(config_path) else {
        return Ok(EXIT_ERROR);
    };

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let outcome = if metadata.is_dir() {
        let files = batch::collect_files(&args.path, &config)?;
        if files.is_empty() {
            eprintln!("Warning: no supported files found");
            return Ok(EXIT_SUCCESS);
        }
        info!(files = files.len(), path = %args.path.display(), "processing directory");
        let show_progress = args.format == "pretty" && !args.no_progress;
        batch::run_batch(&files, mode, show_progress)
    } else {
        let mut outcome = BatchOutcome::default();
        match render_content(&args.path, mode) {
            Ok(r) => outcome.results.push(r),
            Err(error) => outcome.failures.push(FileFailure {
                path: args.path.clone(),
                error,
            }),
        }
        outcome
    };

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&path_str, mode, &outcome)?,
        _ => report::write_pretty(&path_str, mode, &outcome),
    }

    if outcome.failures.is_empty() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the explain command.
pub fn run_explain(args: &FileArgs) -> anyhow::Result<i32> {
    if !check_format(&args.format, &["text", "json"]) {
        return Ok(EXIT_ERROR);
    }
    let artifact = match extract(&args.file) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_FAILED);
        }
    };
    if artifact.kind() != ContentKind::Code {
        eprintln!(
            "Error: {} is not a source file; use 'lectern summarize'",
            args.file.display()
        );
        return Ok(EXIT_ERROR);
    }

    let explanation = explain(&artifact);
    if args.format == "json" {
        report::write_envelope(&explanation)?;
    } else {
        println!("{}", explanation.text());
    }
    Ok(EXIT_SUCCESS)
}

/// Run the summarize command.
pub fn run_summarize(args: &FileArgs) -> anyhow::Result<i32> {
    if !check_format(&args.format, &["text", "json"]) {
        return Ok(EXIT_ERROR);
    }
    let artifact = match extract(&args.file) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_FAILED);
        }
    };
    if artifact.kind() != ContentKind::Document {
        eprintln!(
            "Error: {} is a source file; use 'lectern explain'",
            args.file.display()
        );
        return Ok(EXIT_ERROR);
    }

    let summary = summarize(&artifact);
    if args.format == "json" {
        report::write_envelope(&summary)?;
    } else {
        println!("{}", summary.text);
    }
    Ok(EXIT_SUCCESS)
}

/// Run the audio command.
pub fn run_audio(args: &AudioArgs, config_path: Option<&Path>) -> anyhow::Result<i32> {
    if !check_format(&args.format, &["pretty", "json"]) {
        return Ok(EXIT_ERROR);
    }
    let Some(config) = load_config(config_path) else {
        return Ok(EXIT_ERROR);
    };

    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(file)) => {
            let Some(mode) = parse_mode(&args.content_type) else {
                return Ok(EXIT_ERROR);
            };
            match render_content(file, mode) {
                Ok(r) => r.content,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return Ok(EXIT_FAILED);
                }
            }
        }
        (None, None) => {
            eprintln!("Error: one of --text or --file is required");
            return Ok(EXIT_ERROR);
        }
    };

    let service = Service::new(config)?;
    let request = AudioRequest {
        text,
        language: args.language.clone(),
    };
    match service.generate_audio(&request) {
        Ok(resp) => {
            if args.format == "json" {
                report::write_envelope(&resp)?;
            } else {
                report::write_audio_pretty(&resp);
            }
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(EXIT_FAILED)
        }
    }
}

/// Run the handle command: one JSON response line per request line.
pub fn run_handle(config_path: Option<&Path>) -> anyhow::Result<i32> {
    let Some(config) = load_config(config_path) else {
        return Ok(EXIT_ERROR);
    };
    let service = Service::new(config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = service.handle_line(&line)?;
        writeln!(out, "{}", response)?;
        out.flush()?;
    }
    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Use --force to overwrite or --output to choose another path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize paths and audio settings", args.output.display());
    println!("  2. Run: lectern content . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_template_is_valid_config() {
        let config = Config::parse_str(CONFIG_TEMPLATE).unwrap();
        assert!(config::validate(&config).is_ok());
        assert_eq!(config.preview_chars, 200);
        assert_eq!(config.audio.language, "en");
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("nested/lectern.yaml");
        let args = InitArgs {
            output: output.clone(),
            force: false,
        };
        assert_eq!(run_init(&args).unwrap(), EXIT_SUCCESS);
        assert!(output.exists());
        assert_eq!(run_init(&args).unwrap(), EXIT_ERROR);

        let forced = InitArgs {
            output,
            force: true,
        };
        assert_eq!(run_init(&forced).unwrap(), EXIT_SUCCESS);
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["lectern", "content", "docs", "--type", "full", "-f", "json"]).unwrap();
        match cli.command {
            Commands::Content(args) => {
                assert_eq!(args.content_type, "full");
                assert_eq!(args.format, "json");
            }
            _ => panic!("expected content command"),
        }

        let cli = Cli::try_parse_from(["lectern", "--verbose", "audio", "--text", "hi"]).unwrap();
        assert!(cli.verbose);
        assert!(Cli::try_parse_from(["lectern", "audio", "--text", "a", "--file", "b"]).is_err());
    }

    #[test]
    fn test_explain_rejects_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "plain notes").unwrap();
        let args = FileArgs {
            file: path,
            format: "text".to_string(),
        };
        assert_eq!(run_explain(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_summarize_rejects_code() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sort.py");
        std::fs::write(&path, "def bubble_sort(a):\n    return a\n").unwrap();
        let args = FileArgs {
            file: path,
            format: "text".to_string(),
        };
        assert_eq!(run_summarize(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_summarize_accepts_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "plain notes").unwrap();
        let args = FileArgs {
            file: path,
            format: "json".to_string(),
        };
        assert_eq!(run_summarize(&args).unwrap(), EXIT_SUCCESS);
    }
}
