use policykb_core::Document;
use policykb_export::{ExportFormat, ExportOptions, Exporter, NoopObserver};
use std::sync::Arc;

use crate::helpers::{exporter, policy, read_json};

const LONG_POLICY: &str = "# 国土空间规划管理办法\n第一章 总则\n【打印】\n为加强国土空间规划管理，制定本办法。\n第一条 适用范围\n本办法适用于全省各级国土空间规划。";

#[test]
fn markdown_merges_each_policy_into_one_block() {
    let dir = tempfile::tempdir().unwrap();
    let result = exporter(16, 1)
        .export(&[policy("管理办法", LONG_POLICY)], ExportFormat::Markdown, dir.path())
        .unwrap();

    assert_eq!(result.output_files.len(), 1);
    assert_eq!(result.output_files[0].filename, "rag_knowledge_base.md");
    assert!(result.total_segments > 3, "small budget should split the policy");

    let md = std::fs::read_to_string(dir.path().join("rag_knowledge_base.md")).unwrap();
    assert!(md.starts_with("# 空间规划政策知识库\n\n**导出时间：** "));
    assert!(md.contains("**政策数量：** 1\n\n"));
    assert!(md.contains(&format!("**段落数量：** {}\n\n", result.total_segments)));
    assert!(md.contains("## 1. 管理办法\n\n**层级：** 自然资源部\n\n**发布日期：** 2024-03-01\n\n"));
    assert!(md.contains("**来源：** https://www.mnr.gov.cn\n\n**正文：**\n\n"));

    // The merged block is continuous and cleaned, not bounded by the budget.
    assert!(md.contains("为加强国土空间规划管理，制定本办法。\n第一条 适用范围"));
    assert!(!md.contains("【打印】"));
    assert!(md.ends_with("---\n\n"));
}

#[test]
fn json_keeps_segments_and_adds_merged_content() {
    let dir = tempfile::tempdir().unwrap();
    let docs = vec![policy("甲", LONG_POLICY), policy("乙", "短文")];
    exporter(16, 1)
        .export(&docs, ExportFormat::Json, dir.path())
        .unwrap();

    let kb = read_json(&dir.path().join("rag_knowledge_base.json"));
    assert_eq!(kb["format_type"], "json");
    assert_eq!(kb["total_policies"], 2);
    assert_eq!(kb["max_chunk_size"], 16);

    let policies = kb["policies"].as_array().unwrap();
    assert_eq!(policies[0]["policy_id"], 1);
    assert_eq!(policies[0]["document_id"], "id-甲");
    assert_eq!(policies[0]["title"], "甲");
    assert_eq!(policies[1]["title"], "乙");

    let segments = policies[0]["segments"].as_array().unwrap();
    assert!(segments.len() > 1);
    for seg in segments {
        assert!(seg["size"].as_u64().unwrap() <= 16);
        let content = seg["content"].as_str().unwrap();
        assert_eq!(seg["size"].as_u64().unwrap() as usize, content.chars().count());
        assert!(!content.contains("【打印】"));
    }
    assert_eq!(segments[0]["segment_id"], "policy_1_segment_1");

    let merged = policies[0]["content"].as_str().unwrap();
    assert!(merged.starts_with("# 国土空间规划管理办法\n第一章 总则"));
    assert!(merged.ends_with("本办法适用于全省各级国土空间规划。"));
    assert_eq!(policies[1]["content"], "短文");
}

#[test]
fn text_uses_rules_and_labels() {
    let dir = tempfile::tempdir().unwrap();
    exporter(4096, 1)
        .export(&[policy("文本", "第一条 内容")], ExportFormat::Text, dir.path())
        .unwrap();

    let txt = std::fs::read_to_string(dir.path().join("rag_knowledge_base.txt")).unwrap();
    let heavy = "=".repeat(50);
    assert!(txt.starts_with(&format!("空间规划政策知识库\n{heavy}\n\n导出时间：")));
    assert!(txt.contains("1. 文本\n层级：自然资源部\n发布日期：2024-03-01\n"));
    assert!(txt.contains(&format!("正文：\n{}\n第一条 内容\n\n{heavy}\n\n", "-".repeat(30))));
}

#[test]
fn metadata_sidecar_is_always_written() {
    for format in [ExportFormat::Markdown, ExportFormat::Json, ExportFormat::Text] {
        let dir = tempfile::tempdir().unwrap();
        let result = exporter(4096, 1)
            .export(&[policy("甲", "# 一\n正文")], format, dir.path())
            .unwrap();
        assert_eq!(result.metadata_file, dir.path().join("rag_metadata.json"));

        let meta = read_json(&result.metadata_file);
        assert_eq!(meta["total_policies"], 1);
        assert_eq!(meta["total_segments"], 1);
        assert_eq!(meta["max_chunk_size"], 4096);
        assert_eq!(meta["format_type"], format.as_str());
        assert!(meta["export_time"].as_str().unwrap().contains('T'));

        let seg = &meta["segments"][0];
        assert_eq!(seg["policy_id"], 1);
        assert_eq!(seg["policy_title"], "甲");
        assert_eq!(seg["policy_date"], "2024-03-01");
        assert_eq!(seg["policy_level"], "自然资源部");
        assert_eq!(seg["policy_source"], "https://www.mnr.gov.cn");

        let files = meta["output_files"].as_array().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0]["filename"], format.knowledge_base_filename());
        assert_eq!(files[0]["segment_count"], 1);
        assert_eq!(files[0]["policy_count"], 1);
        // Exactly one knowledge-base file per export.
        let kb_files = std::fs::read_dir(dir.path())
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .starts_with("rag_knowledge_base")
            })
            .count();
        assert_eq!(kb_files, 1);
    }
}

#[test]
fn missing_fields_use_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let doc = Document {
        content: Some("正文".into()),
        ..Document::default()
    };
    let exporter = Exporter::new(ExportOptions {
        knowledge_base_title: "测试知识库".into(),
        ..ExportOptions::default()
    })
    .with_observer(Arc::new(NoopObserver));
    exporter
        .export(&[doc], ExportFormat::Markdown, dir.path())
        .unwrap();

    let md = std::fs::read_to_string(dir.path().join("rag_knowledge_base.md")).unwrap();
    assert!(md.starts_with("# 测试知识库\n\n"));
    assert!(md.contains("## 1. 未知标题"));
    assert!(md.contains("**层级：** 未知层级"));
    assert!(md.contains("**发布日期：** 未知日期"));
    assert!(md.contains("**来源：** 未知来源"));
}
