//! Removal of web-page boilerplate from policy text.

use std::sync::LazyLock;

use regex::Regex;

/// Noise patterns removed in this order, case-insensitively.
const NOISE_PATTERNS: &[&str] = &[
    r"【字号.*?】",
    r"【打印.*?】",
    r"【仅内容打印.*?】",
    r"【关闭.*?】",
    r"【下载.*?】",
    r"分享到.*",
    r"高级检索",
    r"全部",
    r"名称",
    r"文号",
    r"发布机构",
    r"业务类型",
    r"废止记录",
    r"成文时间",
    r"效力级别",
    r"时效状态",
    r"部门规范性文件",
    r"现行有效",
    r"来一一源",
    r"\s{2,}",
];

static NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    NOISE_PATTERNS
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("valid noise pattern"))
        .collect()
});

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid blank-line pattern"));

/// Strip UI chrome and field-label noise, collapse newline runs, trim.
///
/// Noise removal runs first: removing a pattern can leave new blank lines.
pub fn clean_content(text: &str) -> String {
    let mut cleaned = text.to_string();
    for re in NOISE.iter() {
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }
    cleaned = BLANK_LINES.replace_all(&cleaned, "\n").into_owned();
    cleaned.trim().to_string()
}
