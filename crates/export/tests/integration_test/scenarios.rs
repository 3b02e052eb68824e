use chrono::Local;
use policykb_core::Document;
use policykb_export::ExportFormat;

use crate::helpers::{exporter, metadata_segments, policy, segment_ids};

#[test]
fn scenario_a_atx_headings() {
    let dir = tempfile::tempdir().unwrap();
    let docs = vec![policy("A", "# Title\nLine1\nLine2\n## Sub\nLine3")];
    exporter(100, 1)
        .export(&docs, ExportFormat::Json, dir.path())
        .unwrap();

    let segments = metadata_segments(dir.path());
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0]["segment_id"], "policy_1_segment_1");
    assert_eq!(segments[0]["title"], "# Title");
    assert_eq!(segments[0]["level"], 1);
    assert_eq!(segments[0]["content"], "# Title\nLine1\nLine2");
    assert_eq!(segments[1]["segment_id"], "policy_1_segment_2");
    assert_eq!(segments[1]["title"], "## Sub");
    assert_eq!(segments[1]["level"], 2);
    assert_eq!(segments[1]["content"], "## Sub\nLine3");
}

#[test]
fn scenario_b_long_unbroken_line() {
    let dir = tempfile::tempdir().unwrap();
    let content = "A".repeat(5000);
    exporter(4096, 1)
        .export(&[policy("B", &content)], ExportFormat::Json, dir.path())
        .unwrap();

    let segments = metadata_segments(dir.path());
    let sizes: Vec<u64> = segments.iter().map(|s| s["size"].as_u64().unwrap()).collect();
    assert_eq!(sizes, vec![4096, 904]);
    let joined: String = segments
        .iter()
        .map(|s| s["content"].as_str().unwrap())
        .collect();
    assert_eq!(joined, content);
}

#[test]
fn scenario_c_chinese_numbering() {
    let dir = tempfile::tempdir().unwrap();
    let docs = vec![policy("C", "第一章 总则\n为了规范管理，制定本办法。\n第一条 内容")];
    exporter(4096, 1)
        .export(&docs, ExportFormat::Json, dir.path())
        .unwrap();

    let segments = metadata_segments(dir.path());
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0]["level"], 1);
    assert_eq!(segments[0]["title"], "第一章 总则");
    assert_eq!(segments[1]["level"], 3);
    assert_eq!(segments[1]["title"], "第一条 内容");
}

#[test]
fn scenario_d_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let result = exporter(4096, 1)
        .export(&[policy("D", "")], ExportFormat::Markdown, dir.path())
        .unwrap();

    assert_eq!(result.total_policies, 1);
    assert_eq!(result.total_segments, 1);
    let segments = metadata_segments(dir.path());
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0]["size"], 0);
    assert_eq!(segments[0]["segment_id"], "policy_1_segment_1");
}

#[test]
fn scenario_e_worker_count_does_not_change_output() {
    let docs = vec![
        policy("B", &format!("# 乙\n{}\n## 乙二\n尾", "乙".repeat(300))),
        policy("A", &format!("第一章 总则\n{}\n第一条 甲", "甲".repeat(500))),
    ];
    let at = Local::now();

    for format in [ExportFormat::Markdown, ExportFormat::Json, ExportFormat::Text] {
        let single = tempfile::tempdir().unwrap();
        let pooled = tempfile::tempdir().unwrap();
        exporter(64, 1)
            .export_at(&docs, format, single.path(), at)
            .unwrap();
        exporter(64, 4)
            .export_at(&docs, format, pooled.path(), at)
            .unwrap();

        let name = format.knowledge_base_filename();
        let a = std::fs::read(single.path().join(&name)).unwrap();
        let b = std::fs::read(pooled.path().join(&name)).unwrap();
        assert_eq!(a, b, "{format} artifact differs between worker counts");
        assert_eq!(
            metadata_segments(single.path()),
            metadata_segments(pooled.path())
        );
    }
}

#[test]
fn segment_ids_are_unique_and_well_formed() {
    let dir = tempfile::tempdir().unwrap();
    let docs: Vec<Document> = (0..6)
        .map(|i| policy(&format!("P{i}"), &format!("一、总体要求\n{}\n二、任务\n{}", "x".repeat(i * 40), "y".repeat(90))))
        .collect();
    exporter(32, 2)
        .export(&docs, ExportFormat::Text, dir.path())
        .unwrap();

    let ids = segment_ids(dir.path());
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());

    for id in &ids {
        let rest = id.strip_prefix("policy_").unwrap();
        let (n, m) = rest.split_once("_segment_").unwrap();
        assert!(n.parse::<usize>().unwrap() >= 1);
        assert!(m.parse::<usize>().unwrap() >= 1);
    }
}

#[test]
fn metadata_chunks_respect_the_budget() {
    let dir = tempfile::tempdir().unwrap();
    let body: String = (0..100).map(|i| format!("第{i}项 国土空间用途管制要求。\n")).collect();
    exporter(50, 1)
        .export(&[policy("budget", &body)], ExportFormat::Json, dir.path())
        .unwrap();

    for seg in metadata_segments(dir.path()) {
        assert!(seg["size"].as_u64().unwrap() <= 50);
    }
}
