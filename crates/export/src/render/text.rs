use policykb_ingest::clean_content;

use super::{segment_heading, total_segments, RenderContext};
use crate::types::{ExportSegment, PolicySegments};

fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// Plain-text counterpart of the Markdown knowledge base.
pub fn render_knowledge_base(policies: &[PolicySegments], ctx: &RenderContext<'_>) -> String {
    let heavy = rule('=', 50);
    let light = rule('-', 30);

    let mut out = String::new();
    out.push_str(&format!("{}\n", ctx.knowledge_base_title));
    out.push_str(&format!("{heavy}\n\n"));
    out.push_str(&format!("导出时间：{}\n\n", ctx.display_time()));
    out.push_str(&format!("政策数量：{}\n\n", policies.len()));
    out.push_str(&format!("段落数量：{}\n\n", total_segments(policies)));
    out.push_str(&format!("{heavy}\n\n"));

    for policy in policies {
        let info = &policy.info;
        out.push_str(&format!("{}. {}\n", policy.policy_index, info.title));
        out.push_str(&format!("层级：{}\n", info.level));
        out.push_str(&format!("发布日期：{}\n", info.pub_date));
        out.push_str(&format!("来源：{}\n", info.source));
        out.push_str("正文：\n");
        out.push_str(&format!("{light}\n"));
        out.push_str(&format!("{}\n\n", policy.merged_content()));
        out.push_str(&format!("{heavy}\n\n"));
    }
    out
}

pub fn render_segment_file(segment: &ExportSegment) -> String {
    let lines = [
        format!("标题: {}", segment_heading(segment)),
        rule('=', 50),
        String::new(),
        "政策信息:".to_string(),
        format!("  发布机构: {}", segment.policy_level),
        format!("  政策标题: {}", segment.policy_title),
        format!("  发布日期: {}", segment.policy_date),
        format!("  来源: {}", segment.policy_source),
        String::new(),
        "内容:".to_string(),
        rule('-', 30),
        clean_content(&segment.chunk.content),
        String::new(),
    ];
    lines.join("\n")
}
