//! Storage summary decoding (`GET api/storageinfo`).

use crate::error::ClientError;
use lavatory_domain::{RepoType, RepositoryDescriptor};
use serde::Deserialize;

/// Key of the synthetic row the server appends with totals
const TOTAL_KEY: &str = "TOTAL";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorageInfo {
    #[serde(default)]
    repositories_summary_list: Vec<RepositorySummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositorySummary {
    repo_key: String,
    #[serde(default)]
    repo_type: String,
    #[serde(default)]
    package_type: String,
    #[serde(default)]
    folders_count: u64,
    #[serde(default)]
    files_count: u64,
    #[serde(default)]
    items_count: u64,
    #[serde(default)]
    used_space: String,
    #[serde(default)]
    used_space_in_bytes: Option<u64>,
}

/// Decode a storage info body into repository descriptors
///
/// The `TOTAL` row and repositories of an unknown type are skipped.
pub fn parse_storage_info(body: &str) -> Result<Vec<RepositoryDescriptor>, ClientError> {
    let info: StorageInfo = serde_json::from_str(body)?;
    let mut descriptors = Vec::with_capacity(info.repositories_summary_list.len());

    for summary in info.repositories_summary_list {
        if summary.repo_key == TOTAL_KEY {
            continue;
        }

        let Some(repo_type) = RepoType::parse(&summary.repo_type) else {
            tracing::debug!("Skipping {} with repository type '{}'", summary.repo_key, summary.repo_type);
            continue;
        };

        let used_space_bytes = match summary.used_space_in_bytes {
            Some(bytes) => bytes,
            None => parse_size(&summary.used_space).ok_or_else(|| {
                ClientError::InvalidResponse(format!(
                    "Unreadable used space '{}' for {}",
                    summary.used_space, summary.repo_key
                ))
            })?,
        };

        descriptors.push(RepositoryDescriptor {
            key: summary.repo_key,
            repo_type,
            package_type: summary.package_type,
            used_space_bytes,
            files_count: summary.files_count,
            folders_count: summary.folders_count,
            items_count: summary.items_count,
        });
    }

    Ok(descriptors)
}

/// Parse a human-readable size such as `"105.59 GB"` or `"1,024 bytes"`
///
/// Plain units are decimal (KB = 1000), `KiB`-style units are binary.
/// An empty string is zero.
pub fn parse_size(text: &str) -> Option<u64> {
    let cleaned = text.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Some(0);
    }

    let split = cleaned
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(cleaned.len());
    let (number, unit) = cleaned.split_at(split);
    let value: f64 = number.parse().ok()?;

    let multiplier: f64 = match unit.trim().to_lowercase().as_str() {
        "" | "b" | "byte" | "bytes" => 1.0,
        "k" | "kb" => 1e3,
        "m" | "mb" => 1e6,
        "g" | "gb" => 1e9,
        "t" | "tb" => 1e12,
        "p" | "pb" => 1e15,
        "kib" => 1024.0,
        "mib" => 1024.0_f64.powi(2),
        "gib" => 1024.0_f64.powi(3),
        "tib" => 1024.0_f64.powi(4),
        "pib" => 1024.0_f64.powi(5),
        _ => return None,
    };

    Some((value * multiplier).round() as u64)
}
