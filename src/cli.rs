//! CLI interface for the resume screener

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Batch resume screening against a job description")]
#[command(
    long_about = "Split a bookmarked multi-resume PDF into per-candidate documents, score each \
                  against mandatory/optional skill lists, and report missing job-description keywords"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen a batch of resumes against a job description
    Screen {
        /// Path to the job description file (PDF or DOCX)
        #[arg(short, long)]
        jd: PathBuf,

        /// Path to the combined resume PDF, bookmarked per candidate
        #[arg(short, long)]
        resumes: PathBuf,

        /// Comma-separated mandatory skills, e.g. "Python, SQL"
        #[arg(short, long, default_value = "")]
        mandatory: String,

        /// Comma-separated optional skills, e.g. "AWS, Docker"
        #[arg(short, long, default_value = "")]
        optional: String,

        /// Directory for report files and segmented resumes (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Console output format: table, json
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Print per-candidate detail (missing skills and keywords)
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate console output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "table" => Ok(crate::config::OutputFormat::Table),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: table, json",
            format
        )),
    }
}

/// Split a comma-separated skill string, trimming entries and discarding empties
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skill_list_trims_and_drops_empties() {
        let skills = parse_skill_list(" Python , SQL ,, AWS ,   ");
        assert_eq!(skills, vec!["Python", "SQL", "AWS"]);
    }

    #[test]
    fn test_parse_skill_list_empty_string() {
        assert!(parse_skill_list("").is_empty());
        assert!(parse_skill_list(" , , ").is_empty());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(&PathBuf::from("jd.pdf"), &["pdf", "docx"]).is_ok());
        assert!(validate_file_extension(&PathBuf::from("jd.DOCX"), &["pdf", "docx"]).is_ok());
        assert!(validate_file_extension(&PathBuf::from("jd.txt"), &["pdf", "docx"]).is_err());
        assert!(validate_file_extension(&PathBuf::from("jd"), &["pdf", "docx"]).is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert!(parse_output_format("table").is_ok());
        assert!(parse_output_format("JSON").is_ok());
        assert!(parse_output_format("xml").is_err());
    }
}
