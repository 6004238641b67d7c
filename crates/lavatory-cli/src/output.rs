//! Output formatting for the CLI.

use crate::error::Result;
use colored::*;
use lavatory_domain::RepositoryDescriptor;
use lavatory_policy::PolicyDescription;
use lavatory_retention::{PerformanceReport, RunMetrics};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format repository metadata.
    pub fn format_repositories(&self, repositories: &[RepositoryDescriptor]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(repositories)?),
            OutputFormat::Table => Ok(self.format_repositories_table(repositories)),
        }
    }

    fn format_repositories_table(&self, repositories: &[RepositoryDescriptor]) -> String {
        if repositories.is_empty() {
            return self.colorize("No repositories found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Repository", "Type", "Package", "Used bytes", "Files", "Folders", "Items"]);

        for repo in repositories {
            builder.push_record([
                repo.key.clone(),
                repo.repo_type.as_str().to_string(),
                repo.package_type.clone(),
                repo.used_space_bytes.to_string(),
                repo.files_count.to_string(),
                repo.folders_count.to_string(),
                repo.items_count.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format policy descriptions as a JSON array.
    pub fn format_policies(&self, policies: &[PolicyDescription]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(policies)?),
            OutputFormat::Table => Ok(serde_json::to_string(policies)?),
        }
    }

    /// Format before/after performance reports.
    pub fn format_reports(&self, reports: &[PerformanceReport]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
            OutputFormat::Table => Ok(self.format_reports_table(reports)),
        }
    }

    fn format_reports_table(&self, reports: &[PerformanceReport]) -> String {
        if reports.is_empty() {
            return self.colorize("No repositories processed.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Repository", "Bytes before", "Bytes after", "Storage %", "Files before", "Files after", "Files %"]);

        for report in reports {
            builder.push_record([
                report.repo.clone(),
                report.storage_before.to_string(),
                report.storage_after.to_string(),
                format!("{:.1}", report.storage_percentage()),
                report.files_before.to_string(),
                report.files_after.to_string(),
                format!("{:.1}", report.files_percentage()),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format the end-of-run summary.
    pub fn format_summary(&self, metrics: &RunMetrics) -> String {
        let summary = metrics.summary();
        if metrics.has_failures() {
            self.colorize(&summary, "red")
        } else if metrics.dry_run {
            self.colorize(&summary, "yellow")
        } else {
            self.colorize(&summary, "green")
        }
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
