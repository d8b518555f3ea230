// Log highlighter - wraps operationally significant spans of a log line in markers
//
// Rules run in a fixed order, each over the output of the previous one. A later
// rule can therefore match inside text an earlier rule already wrapped, which
// nests markers. Nothing outside the inserted markers is ever changed.
use regex::{Captures, Regex, RegexBuilder};
use std::sync::OnceLock;

/// Delimiters inserted around a highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub open: &'static str,
    pub close: &'static str,
}

pub const HTML_MARK: Marker = Marker {
    open: "<mark>",
    close: "</mark>",
};

const METRIC_FIELDS: &str =
    "keysExamined|keysInserted|docsExamined|nreturned|nMatched|nModified|ndeleted|ninserted|reslen";

fn fixed_rules() -> &'static [Regex] {
    static RULES: OnceLock<Vec<Regex>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            // planSummary / errMsg field with its value
            r#""?(?:planSummary|errMsg)"?:[\t\n\f\r ]?"?[0-9A-Za-z_]+"?"#.to_string(),
            // trailing duration
            r"[0-9]+ms$".to_string(),
            // numeric metric counters
            format!(r#""?(?:{METRIC_FIELDS})"?:[0-9]+"#),
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("highlight pattern compiles"))
        .collect()
    })
}

fn wrap_all(text: &str, re: &Regex, marker: Marker) -> String {
    re.replace_all(text, |caps: &Captures| {
        format!("{}{}{}", marker.open, &caps[0], marker.close)
    })
    .into_owned()
}

/// Highlight a log line, wrapping each matched span in `marker`.
///
/// Extra terms match literally and case-insensitively; empty terms are ignored.
pub fn highlight<S: AsRef<str>>(line: &str, extra_terms: &[S], marker: Marker) -> String {
    let mut text = line.to_string();
    for rule in fixed_rules() {
        text = wrap_all(&text, rule, marker);
    }

    for term in extra_terms.iter().map(AsRef::as_ref) {
        if term.is_empty() {
            continue;
        }
        match RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => text = wrap_all(&text, &re, marker),
            Err(e) => tracing::warn!("skipping highlight term {:?}: {}", term, e),
        }
    }
    text
}
