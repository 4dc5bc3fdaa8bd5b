use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHENATED_LINE_BREAK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").ok()
});

/// Normalises text pulled out of documents: NFKC (splits ligatures), joins
/// words hyphenated across lines, drops control characters, collapses runs of
/// spaces and keeps at most one blank line between paragraphs.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    let joined = match HYPHENATED_LINE_BREAK.as_ref() {
        Some(re) => re.replace_all(&normalized, "$head$tail").into_owned(),
        None => normalized,
    };

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in joined.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(collapsed);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs.join("\n\n")
}
