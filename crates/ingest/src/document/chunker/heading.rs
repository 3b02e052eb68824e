//! Line → heading level classification.

use std::sync::LazyLock;

use regex::Regex;

pub const MAX_HEADING_LEVEL: u8 = 6;

/// Chinese numerals used in legal numbering (`第一百零二条`).
const CN_NUMERAL: &str = "[一二三四五六七八九十百零〇]";

static ATX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(#{{1,{MAX_HEADING_LEVEL}}})\s+")).expect("valid ATX heading pattern")
});

struct HeadingRule {
    name: &'static str,
    pattern: Regex,
    level: u8,
}

/// Named rules tried in declaration order; the first match wins.
///
/// `policy_item` is shadowed by `numbered` for every input it accepts. It is
/// kept so the rule table stays a complete description of the recognized
/// enumeration styles.
static RULES: LazyLock<Vec<HeadingRule>> = LazyLock::new(|| {
    let rule = |name, pattern: String, level| HeadingRule {
        name,
        pattern: Regex::new(&pattern).expect("valid heading pattern"),
        level,
    };
    vec![
        rule("chapter", format!("^第{CN_NUMERAL}+章"), 1),
        rule("section", format!("^第{CN_NUMERAL}+节"), 2),
        rule(
            "numbered",
            format!(r"^(?:{CN_NUMERAL}+|[1-9][0-9]{{0,2}})[、.](?:[0-9]+(?:\.[0-9]+)*)?"),
            1,
        ),
        rule("article", format!("^第{CN_NUMERAL}+条"), 3),
        rule("policy_item", format!("^{CN_NUMERAL}+[、.]"), 1),
    ]
});

/// Which rule classified a line, and at what level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingMatch {
    pub rule: &'static str,
    pub level: u8,
}

/// Heading level of `line`: 1..=6 for headings, 0 otherwise.
pub fn classify(line: &str) -> u8 {
    classify_detailed(line).map_or(0, |m| m.level)
}

/// Like [`classify`], but also reports the rule that fired.
pub fn classify_detailed(line: &str) -> Option<HeadingMatch> {
    let line = line.trim();

    if let Some(caps) = ATX.captures(line) {
        return Some(HeadingMatch {
            rule: "atx",
            level: caps[1].len() as u8,
        });
    }

    RULES
        .iter()
        .find(|r| r.pattern.is_match(line))
        .map(|r| HeadingMatch {
            rule: r.name,
            level: r.level,
        })
}
