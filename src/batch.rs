use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::parser::ProfileExtractor;
use crate::record::ProfileRecord;

/// One output file per input page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutput {
    pub source: String,
    pub extracted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_data: Option<ProfileRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Totals returned after a batch run.
#[derive(Debug, Default)]
pub struct BatchStats {
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
    /// How many records carried each top-level key.
    pub sections: BTreeMap<&'static str, usize>,
}

impl BatchStats {
    pub fn print(&self) {
        println!(
            "Extracted {} pages ({} ok, {} failed).",
            self.total, self.ok, self.failed
        );
        for (key, count) in &self.sections {
            println!("  {:<16} {}", key, count);
        }
    }
}

/// `*.html` files directly under `dir`, sorted by name.
pub fn collect_inputs(dir: &Path, limit: Option<usize>) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let is_html = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        if path.is_file() && is_html {
            inputs.push(path);
        }
    }
    inputs.sort();
    if let Some(n) = limit {
        inputs.truncate(n);
    }
    Ok(inputs)
}

/// Extract every input in parallel and write `<stem>.json` into `out_dir`.
pub fn run(extractor: &ProfileExtractor, inputs: &[PathBuf], out_dir: &Path) -> Result<BatchStats> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut stats = BatchStats::default();

    for chunk in inputs.chunks(500) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|path| (path, extract_file(extractor, path)))
            .collect();

        for (path, output) in results {
            stats.total += 1;
            match &output.profile_data {
                Some(record) => {
                    stats.ok += 1;
                    for key in record.keys() {
                        *stats.sections.entry(key).or_default() += 1;
                    }
                }
                None => {
                    stats.failed += 1;
                    warn!(
                        "Failed {}: {}",
                        output.source,
                        output.error.as_deref().unwrap_or_default()
                    );
                }
            }
            write_output(path, out_dir, &output)?;
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    info!("Extracted {} pages ({} ok, {} failed)", stats.total, stats.ok, stats.failed);
    Ok(stats)
}

fn extract_file(extractor: &ProfileExtractor, path: &Path) -> BatchOutput {
    let source = path.display().to_string();
    let result = std::fs::read(path)
        .with_context(|| format!("reading {}", source))
        .and_then(|bytes| {
            let html = String::from_utf8_lossy(&bytes);
            Ok(extractor.extract(&html)?)
        });

    let (profile_data, error) = match result {
        Ok(record) => (Some(record), None),
        Err(e) => (None, Some(format!("{:#}", e))),
    };
    BatchOutput {
        source,
        extracted_at: Utc::now(),
        profile_data,
        error,
    }
}

fn write_output(input: &Path, out_dir: &Path, output: &BatchOutput) -> Result<()> {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    let target = out_dir.join(format!("{}.json", stem));
    let json = serde_json::to_string_pretty(output)?;
    std::fs::write(&target, json).with_context(|| format!("writing {}", target.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><section class="basic-profile-section">
        <div></div><div></div>
        <div><div>Ana</div><div>Platform engineer</div><div>Porto</div></div>
        </section></body></html>"#;

    #[test]
    fn collects_sorted_html_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.html", "a.HTML", "notes.txt", "c.html"] {
            std::fs::write(dir.path().join(name), PAGE).unwrap();
        }
        let inputs = collect_inputs(dir.path(), None).unwrap();
        let names: Vec<_> = inputs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.HTML", "b.html", "c.html"]);
        assert_eq!(collect_inputs(dir.path(), Some(1)).unwrap().len(), 1);
    }

    #[test]
    fn writes_record_or_error_per_page() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("ana.html"), PAGE).unwrap();
        std::fs::write(input.path().join("blank.html"), "   ").unwrap();

        let inputs = collect_inputs(input.path(), None).unwrap();
        let stats = run(&ProfileExtractor::default(), &inputs, out.path()).unwrap();
        assert_eq!((stats.total, stats.ok, stats.failed), (2, 1, 1));
        assert_eq!(stats.sections.get("bio"), Some(&1));
        assert_eq!(stats.sections.get("currentLocation"), Some(&1));

        let ana: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.path().join("ana.json")).unwrap()).unwrap();
        assert_eq!(ana["profileData"]["bio"], "Platform engineer");
        assert!(ana.get("error").is_none());
        assert!(ana["extractedAt"].is_string());

        let blank: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.path().join("blank.json")).unwrap()).unwrap();
        assert!(blank.get("profileData").is_none());
        assert_eq!(blank["error"], "document is empty");
    }
}
