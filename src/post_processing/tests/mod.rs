#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::config::ExtractorConfig;
use crate::extraction::{ArchiveExtractor, ExtractResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Writes `<stem>.txt` into the destination. Archives whose file name starts
/// with "bad" fail; ones starting with "gone" are removed while extracting,
/// the way some extractors consume their input.
#[derive(Default)]
struct StubExtractor {
    calls: AtomicUsize,
}

#[async_trait]
impl ArchiveExtractor for StubExtractor {
    async fn extract(&self, archive: &Path, dest: &Path) -> crate::Result<ExtractResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let stem = archive.file_stem().unwrap().to_string_lossy().into_owned();
        if stem.starts_with("bad") {
            return Ok(ExtractResult::failed(Some(2)));
        }
        tokio::fs::write(dest.join(format!("{}.txt", stem)), b"payload").await?;
        if stem.starts_with("gone") {
            tokio::fs::remove_file(archive).await?;
        }
        Ok(ExtractResult::succeeded(0))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn test_config(dir: &Path) -> HookConfig {
    HookConfig {
        unrar: ExtractorConfig::new("unrar"),
        sevenzip: ExtractorConfig::new("7z"),
        wait_time: "0".to_string(),
        success_codes: None,
        cleanup_disk: false,
        delete_leftover: false,
        total_status: "SUCCESS".to_string(),
        directory: dir.to_path_buf(),
    }
}

fn processor(config: HookConfig) -> (PostProcessor, Arc<StubExtractor>) {
    let stub = Arc::new(StubExtractor::default());
    let extractors = ExtractorSet::new(stub.clone(), stub.clone());
    (PostProcessor::with_extractors(config, extractors), stub)
}

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"archive").unwrap();
    path
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_empty_directory_succeeds() {
    let dir = TempDir::new().unwrap();
    let (processor, stub) = processor(test_config(dir.path()));

    assert_eq!(processor.run().await, RunResult::Success);
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_single_zip_succeeds_and_keeps_archive() {
    let dir = TempDir::new().unwrap();
    let archive = touch(dir.path(), "test1.zip");
    let (processor, _stub) = processor(test_config(dir.path()));

    assert_eq!(processor.run().await, RunResult::Success);
    assert!(dir.path().join("test1.txt").exists());
    assert!(archive.exists());
}

#[tokio::test]
async fn test_delete_leftover_removes_extracted_archives() {
    let dir = TempDir::new().unwrap();
    let zip = touch(dir.path(), "test1.zip");
    let rar = touch(dir.path(), "test2.rar");

    let mut config = test_config(dir.path());
    config.delete_leftover = true;
    let (processor, _stub) = processor(config);

    assert_eq!(processor.run().await, RunResult::Success);
    assert!(!zip.exists());
    assert!(!rar.exists());
    assert_eq!(listing(dir.path()), vec!["test1.txt", "test2.txt"]);
}

#[tokio::test]
async fn test_failed_download_changes_nothing() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "test1.zip");
    let before = listing(dir.path());

    let mut config = test_config(dir.path());
    config.total_status = "FAILURE".to_string();
    let (processor, stub) = processor(config);

    assert_eq!(processor.run().await, RunResult::NoActionTaken);
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    assert_eq!(listing(dir.path()), before);
}

#[tokio::test]
async fn test_missing_directory_is_no_action() {
    let dir = TempDir::new().unwrap();
    let (processor, _stub) = processor(test_config(&dir.path().join("moved")));

    assert_eq!(processor.run().await, RunResult::NoActionTaken);
}

#[tokio::test]
async fn test_extraction_failure_is_no_action() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "bad.zip");
    let (processor, _stub) = processor(test_config(dir.path()));

    assert_eq!(processor.run().await, RunResult::NoActionTaken);
}

#[tokio::test]
async fn test_cleanup_still_runs_after_extraction_failure() {
    let dir = TempDir::new().unwrap();
    let good = touch(dir.path(), "a_good.zip");
    let bad = touch(dir.path(), "bad.zip");

    let mut config = test_config(dir.path());
    config.delete_leftover = true;
    let (processor, _stub) = processor(config);

    assert_eq!(processor.run().await, RunResult::NoActionTaken);
    assert!(!good.exists(), "successfully extracted archive is cleaned up");
    assert!(bad.exists(), "failed archive is left alone");
}

#[tokio::test]
async fn test_cleanup_failure_downgrades_success() {
    let dir = TempDir::new().unwrap();
    let first = touch(dir.path(), "a.zip");
    touch(dir.path(), "gone.zip");
    let last = touch(dir.path(), "z.rar");

    let mut config = test_config(dir.path());
    config.delete_leftover = true;
    let (processor, stub) = processor(config);

    assert_eq!(processor.run().await, RunResult::NoActionTaken);
    assert_eq!(stub.calls.load(Ordering::SeqCst), 3);
    assert!(!first.exists(), "archives before the failed delete are removed");
    assert!(!last.exists(), "archives after the failed delete are removed");
    assert_eq!(listing(dir.path()), vec!["a.txt", "gone.txt", "z.txt"]);
}

#[tokio::test]
async fn test_failed_download_with_bad_wait_time_is_no_action() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "test1.zip");

    let mut config = test_config(dir.path());
    config.total_status = "FAILURE".to_string();
    config.cleanup_disk = true;
    config.wait_time = "soon".to_string();
    let (processor, stub) = processor(config);

    assert_eq!(processor.run().await, RunResult::NoActionTaken);
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_bad_wait_time_is_config_failure() {
    let dir = TempDir::new().unwrap();
    let archive = touch(dir.path(), "test1.zip");

    let mut config = test_config(dir.path());
    config.cleanup_disk = true;
    config.wait_time = "-3".to_string();
    let (processor, stub) = processor(config);

    assert_eq!(processor.run().await, RunResult::Failure);
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    assert!(archive.exists());
}

#[tokio::test]
async fn test_bad_wait_time_ignored_without_cleanup_disk() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "test1.zip");

    let mut config = test_config(dir.path());
    config.wait_time = "soon".to_string();
    let (processor, _stub) = processor(config);

    assert_eq!(processor.run().await, RunResult::Success);
}

#[tokio::test]
async fn test_bad_success_codes_is_config_failure() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "test1.zip");

    let mut config = test_config(dir.path());
    config.success_codes = Some("0,x".to_string());
    let processor = PostProcessor::new(config);

    assert_eq!(processor.run().await, RunResult::Failure);
    assert!(!dir.path().join("test1.txt").exists());
}

#[tokio::test]
async fn test_failed_download_with_bad_success_codes_is_no_action() {
    let dir = TempDir::new().unwrap();

    let mut config = test_config(dir.path());
    config.total_status = "FAILURE".to_string();
    config.success_codes = Some("0,x".to_string());
    let processor = PostProcessor::new(config);

    assert_eq!(processor.run().await, RunResult::NoActionTaken);
}

#[tokio::test]
async fn test_wait_happens_before_scanning() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "test1.zip");

    let mut config = test_config(dir.path());
    config.cleanup_disk = true;
    config.wait_time = "1.7".to_string();
    let (processor, _stub) = processor(config);

    let started = std::time::Instant::now();
    assert_eq!(processor.run().await, RunResult::Success);
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_new_uses_configured_cli_extractors() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "test1.zip");

    let mut config = test_config(dir.path());
    config.sevenzip = ExtractorConfig::new("/nonexistent/path/to/7z");
    let processor = PostProcessor::new(config);

    assert_eq!(processor.run().await, RunResult::NoActionTaken);
    assert!(!dir.path().join("test1.txt").exists());
}
