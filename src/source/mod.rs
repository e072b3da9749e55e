//! URL sources: input files and markdown documentation trees.
//!
//! This module gathers the URLs a run will check, either from a plain file
//! with one URL per line or by discovering links in a tree of markdown
//! documents.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;
use walkdir::{DirEntry, WalkDir};

use crate::error_handling::{ProcessingStats, WarningType};

lazy_static! {
    // Inline markdown links: [text](target), tolerating titles after the target
    static ref INLINE_LINK_RE: Regex = Regex::new(r"\[[^\]]*\]\(\s*([^)\s]+)[^)]*\)").unwrap();
    // Bare URLs in prose, up to closing punctuation
    static ref BARE_URL_RE: Regex = Regex::new(r#"https?://[^\s)\]>"']+"#).unwrap();
}

/// Reads URLs from a file with one URL per line; `-` reads from stdin.
///
/// Blank lines and lines starting with `#` are ignored. Lines are returned
/// trimmed but otherwise untouched; scheme defaulting and validation happen
/// at the run level.
///
/// # Errors
///
/// Returns an error if the input file cannot be opened. Individual
/// unreadable lines are logged and skipped.
pub async fn read_url_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::new();

    if path.as_os_str() == "-" {
        info!("Reading URLs from stdin");
        let mut reader = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match reader.next_line().await {
                Ok(Some(line)) => push_url_line(&mut lines, &line),
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read line from stdin: {e}");
                    continue;
                }
            }
        }
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        let mut reader = BufReader::new(file).lines();
        loop {
            match reader.next_line().await {
                Ok(Some(line)) => push_url_line(&mut lines, &line),
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read line from input: {e}");
                    continue;
                }
            }
        }
    }

    Ok(lines)
}

fn push_url_line(lines: &mut Vec<String>, line: &str) {
    let trimmed = line.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('#') {
        lines.push(trimmed.to_string());
    }
}

/// Finds all markdown files under a directory tree.
///
/// Hidden directories (dot-prefixed), `node_modules`, and `target` are not
/// descended into. Results are sorted for deterministic processing order.
pub fn find_markdown_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        // depth 0 is the root itself, which must always be entered
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored_dir(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| ext == "md")
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "node_modules" || name == "target"
}

/// Extracts link targets from markdown text.
///
/// Finds both inline links (`[text](target)`) and bare URLs in prose.
/// Fragment-only targets (`#section`) and non-HTTP schemes (`mailto:` and
/// friends) are dropped. Relative targets are joined against `base_url`
/// when one is provided, otherwise dropped with a warning.
pub fn extract_links(
    markdown: &str,
    base_url: Option<&str>,
    stats: &ProcessingStats,
) -> Vec<String> {
    let base = base_url.and_then(|b| Url::parse(b).ok());

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    let mut push = |link: String| {
        if seen.insert(link.clone()) {
            links.push(link);
        }
    };

    for cap in INLINE_LINK_RE.captures_iter(markdown) {
        let target = &cap[1];

        // Same-page anchors are not links to check
        if target.starts_with('#') {
            continue;
        }

        match Url::parse(target) {
            Ok(parsed) => match parsed.scheme() {
                "http" | "https" => push(target.to_string()),
                other => debug!("Ignoring {} link: {}", other, target),
            },
            // Not an absolute URL: treat it as relative to the base
            Err(_) => match &base {
                Some(base) => match base.join(target) {
                    Ok(joined) => push(joined.to_string()),
                    Err(e) => {
                        stats.increment_warning(WarningType::UnresolvedRelativeLink);
                        warn!("Cannot resolve relative link {}: {}", target, e);
                    }
                },
                None => {
                    stats.increment_warning(WarningType::UnresolvedRelativeLink);
                    debug!("Dropping relative link {} (no base URL)", target);
                }
            },
        }
    }

    for found in BARE_URL_RE.find_iter(markdown) {
        // Sentence punctuation after a bare URL is not part of it
        let url = found
            .as_str()
            .trim_end_matches(['.', ',', ';', ':', '!', '?']);
        if !url.is_empty() {
            push(url.to_string());
        }
    }

    links
}

/// Discovers all links in a markdown documentation tree.
///
/// Walks the tree, extracts links from every markdown file, and returns
/// them deduplicated in first-seen order. Unreadable files are logged and
/// counted as warnings, not fatal.
///
/// # Errors
///
/// Returns an error if `root` is not a directory.
pub fn collect_doc_links(
    root: &Path,
    base_url: Option<&str>,
    stats: &ProcessingStats,
) -> anyhow::Result<Vec<String>> {
    if !root.is_dir() {
        anyhow::bail!("Documentation root {} is not a directory", root.display());
    }

    let files = find_markdown_files(root);
    info!(
        "Found {} markdown file(s) under {}",
        files.len(),
        root.display()
    );

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for file in files {
        let markdown = match std::fs::read_to_string(&file) {
            Ok(contents) => contents,
            Err(e) => {
                stats.increment_warning(WarningType::DocReadFailed);
                warn!("Failed to read {}: {}", file.display(), e);
                continue;
            }
        };
        for link in extract_links(&markdown, base_url, stats) {
            if seen.insert(link.clone()) {
                links.push(link);
            }
        }
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_url_file_filters_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(
            &path,
            "# header comment\nhttps://a.example.com/\n\n  https://b.example.com/  \n# trailing\n",
        )
        .unwrap();

        let lines = read_url_file(&path).await.unwrap();
        assert_eq!(
            lines,
            vec!["https://a.example.com/", "https://b.example.com/"]
        );
    }

    #[tokio::test]
    async fn test_read_url_file_missing_file() {
        let result = read_url_file(Path::new("/nonexistent/urls.txt")).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_links_inline_and_bare() {
        let stats = ProcessingStats::new();
        let markdown = "\
# Docs

See [the guide](https://example.com/guide) and browse to
https://example.com/api for details. Anchors like [this](#section)
and [mail](mailto:team@example.com) are not checked.
";
        let links = extract_links(markdown, None, &stats);
        assert_eq!(
            links,
            vec!["https://example.com/guide", "https://example.com/api"]
        );
        assert_eq!(
            stats.get_warning_count(WarningType::UnresolvedRelativeLink),
            0
        );
    }

    #[test]
    fn test_extract_links_relative_with_base() {
        let stats = ProcessingStats::new();
        let markdown = "[install](docs/install.md) and [root](/about)";
        let links = extract_links(markdown, Some("https://example.com/"), &stats);
        assert_eq!(
            links,
            vec![
                "https://example.com/docs/install.md",
                "https://example.com/about"
            ]
        );
    }

    #[test]
    fn test_extract_links_relative_without_base_warns() {
        let stats = ProcessingStats::new();
        let markdown = "[install](docs/install.md)";
        let links = extract_links(markdown, None, &stats);
        assert!(links.is_empty());
        assert_eq!(
            stats.get_warning_count(WarningType::UnresolvedRelativeLink),
            1
        );
    }

    #[test]
    fn test_extract_links_dedupes() {
        let stats = ProcessingStats::new();
        let markdown = "[a](https://example.com/x) then again [b](https://example.com/x)";
        let links = extract_links(markdown, None, &stats);
        assert_eq!(links, vec!["https://example.com/x"]);
    }

    #[test]
    fn test_extract_links_trims_trailing_punctuation() {
        let stats = ProcessingStats::new();
        let markdown = "Read https://example.com/docs. Then https://example.com/more, too.";
        let links = extract_links(markdown, None, &stats);
        assert_eq!(
            links,
            vec!["https://example.com/docs", "https://example.com/more"]
        );
    }

    #[test]
    fn test_extract_links_with_title_annotation() {
        let stats = ProcessingStats::new();
        let markdown = r#"[guide](https://example.com/guide "The Guide")"#;
        let links = extract_links(markdown, None, &stats);
        assert_eq!(links, vec!["https://example.com/guide"]);
    }

    #[test]
    fn test_find_markdown_files_skips_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("sub")).unwrap();
        std::fs::create_dir_all(root.join(".hidden")).unwrap();
        std::fs::create_dir_all(root.join("node_modules")).unwrap();
        std::fs::write(root.join("a.md"), "# a").unwrap();
        std::fs::write(root.join("sub/b.md"), "# b").unwrap();
        std::fs::write(root.join("c.txt"), "not markdown").unwrap();
        std::fs::write(root.join(".hidden/d.md"), "# d").unwrap();
        std::fs::write(root.join("node_modules/e.md"), "# e").unwrap();

        let files = find_markdown_files(root);
        let names: Vec<String> = files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["a.md", "sub/b.md"]);
    }

    #[test]
    fn test_collect_doc_links_dedupes_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(
            root.join("a.md"),
            "[one](https://example.com/1) [two](https://example.com/2)",
        )
        .unwrap();
        std::fs::write(
            root.join("b.md"),
            "[two again](https://example.com/2) [three](https://example.com/3)",
        )
        .unwrap();

        let stats = ProcessingStats::new();
        let links = collect_doc_links(root, None, &stats).unwrap();
        assert_eq!(
            links,
            vec![
                "https://example.com/1",
                "https://example.com/2",
                "https://example.com/3"
            ]
        );
    }

    #[test]
    fn test_collect_doc_links_missing_root() {
        let stats = ProcessingStats::new();
        let result = collect_doc_links(Path::new("/nonexistent/docs"), None, &stats);
        assert!(result.is_err());
    }
}
