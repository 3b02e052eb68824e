use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Local;
use policykb_export::{BundleLimits, ExportFormat, ExportObserver, ExportOptions, Exporter};

use crate::helpers::{exporter, metadata_segments, policy, read_json};

#[test]
fn bundles_respect_file_limit() {
    let dir = tempfile::tempdir().unwrap();
    let docs: Vec<_> = (1..=5)
        .map(|i| policy(&format!("政策{i}"), &format!("# 标题{i}\n正文{i}")))
        .collect();
    let limits = BundleLimits {
        max_files_per_bundle: 2,
        max_bundle_bytes: 1024 * 1024,
    };

    let result = exporter(4096, 1)
        .export_bundles(&docs, ExportFormat::Markdown, dir.path(), &limits)
        .unwrap();

    assert_eq!(result.total_segments, 5);
    assert_eq!(result.bundles.len(), 3);
    assert_eq!(result.bundles[0].dir, dir.path().join("chunk_001"));
    assert_eq!(result.bundles[2].files.len(), 1);
    assert_eq!(result.bundles[0].files[0].filename, "001_001_政策1.md");
    assert_eq!(result.bundles[0].files[1].filename, "001_002_政策2.md");
    assert_eq!(result.bundles[1].files[0].filename, "002_001_政策3.md");

    let body = std::fs::read_to_string(dir.path().join("chunk_001/001_001_政策1.md")).unwrap();
    assert!(body.starts_with("# # 标题1\n\n## 政策信息\n- **发布机构**: 自然资源部\n- **政策标题**: 政策1\n"));
    assert!(body.contains("## 内容\n# 标题1\n正文1\n"));

    for bundle in &result.bundles {
        let sum: u64 = bundle.files.iter().map(|f| f.size_bytes).sum();
        assert_eq!(sum, bundle.total_size_bytes);
    }

    let meta = read_json(&result.metadata_file);
    assert_eq!(meta["output_files"].as_array().unwrap().len(), 5);
    assert_eq!(metadata_segments(dir.path()).len(), 5);
}

#[test]
fn json_bundle_files_carry_policy_info() {
    let dir = tempfile::tempdir().unwrap();
    let at = Local::now();
    let result = exporter(4096, 1)
        .export_bundles_at(
            &[policy("《关于规划》", "第一章 总则\n内容")],
            ExportFormat::Json,
            dir.path(),
            &BundleLimits::default(),
            at,
        )
        .unwrap();

    let file = &result.bundles[0].files[0];
    assert_eq!(file.filename, "001_001_关于规划.json");
    assert_eq!(file.policy_title, "《关于规划》");

    let value = read_json(&result.bundles[0].dir.join(&file.filename));
    assert_eq!(value["segment_id"], "policy_1_segment_1");
    assert_eq!(value["title"], "第一章 总则");
    assert_eq!(value["level"], 1);
    assert_eq!(value["policy_info"]["title"], "《关于规划》");
    assert_eq!(value["metadata"]["chunk_num"], 1);
    assert_eq!(value["metadata"]["segment_num"], 1);
    assert_eq!(value["metadata"]["export_time"], at.to_rfc3339());
}

#[derive(Default)]
struct EventLog {
    bundles: Mutex<Vec<(usize, usize)>>,
    finished: Mutex<Vec<(usize, usize)>>,
}

impl ExportObserver for EventLog {
    fn bundle_written(&self, bundle_index: usize, files: usize, _bytes: u64) {
        self.bundles.lock().unwrap().push((bundle_index, files));
    }

    fn export_finished(&self, policies: usize, segments: usize, _metadata_file: &Path) {
        self.finished.lock().unwrap().push((policies, segments));
    }
}

#[test]
fn bundle_progress_goes_through_the_observer() {
    let dir = tempfile::tempdir().unwrap();
    let log = Arc::new(EventLog::default());
    let docs: Vec<_> = (1..=3)
        .map(|i| policy(&format!("政策{i}"), &format!("正文{i}")))
        .collect();
    let limits = BundleLimits {
        max_files_per_bundle: 2,
        max_bundle_bytes: 1024,
    };

    Exporter::new(ExportOptions::default())
        .with_observer(log.clone())
        .export_bundles(&docs, ExportFormat::Text, dir.path(), &limits)
        .unwrap();

    assert_eq!(*log.bundles.lock().unwrap(), vec![(1, 2), (2, 1)]);
    assert_eq!(*log.finished.lock().unwrap(), vec![(3, 3)]);
}
