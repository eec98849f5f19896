//! Heading and explicit anchor extraction
//!
//! Recognizes ATX headings (`## Title`), setext headings (a paragraph line
//! underlined with `===` or `---`), heading attributes (`## Title {#id}`) and
//! HTML `id`/`name` attributes.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::core::model::{codes, ExplicitAnchor, Heading, Warning};
use crate::docs::blocks::{front_matter_lines, FenceState};
use crate::docs::slug::SlugRegistry;

/// Trailing `{#id}` heading attribute
static HEADING_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\{#([A-Za-z0-9_.:\-]+)\}\s*$").expect("Invalid HEADING_ID_RE regex")
});

/// `id="..."` or `name="..."` inside an HTML tag
static HTML_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<[A-Za-z][^>]*?\s(?:id|name)\s*=\s*["']([^"']+)["']"#)
        .expect("Invalid HTML_ID_RE regex")
});

/// Everything the loader needs from the heading pass
#[derive(Debug, Default)]
pub struct HeadingScan {
    pub headings: Vec<Heading>,
    pub anchors: Vec<ExplicitAnchor>,
    pub warnings: Vec<Warning>,
}

/// Parse an ATX heading line into (level, raw text)
fn parse_atx(line: &str) -> Option<(u8, &str)> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];

    let level = rest.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let after = &rest[level..];
    if !after.is_empty() && !after.starts_with([' ', '\t']) {
        return None;
    }

    let text = after.trim();

    // Optional closing sequence: spaces followed by #s only
    let text = match text.trim_end_matches('#') {
        t if t.is_empty() => "",
        t if t.ends_with([' ', '\t']) => t.trim_end(),
        _ => text,
    };

    Some((level as u8, text))
}

/// `Some(1)` for `===`, `Some(2)` for `---`
fn parse_setext_underline(line: &str) -> Option<u8> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().all(|c| c == '=') {
        Some(1)
    } else if trimmed.chars().all(|c| c == '-') {
        Some(2)
    } else {
        None
    }
}

/// Whether a line can be the text of a setext heading
fn is_paragraph_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    let indent = line.len() - trimmed.len();
    if trimmed.is_empty() || indent > 3 {
        return false;
    }
    if trimmed.starts_with(['>', '|', '<']) {
        return false;
    }
    if trimmed.starts_with("- ") || trimmed.starts_with("* ") || trimmed.starts_with("+ ") {
        return false;
    }
    let digits = trimmed.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 && trimmed[digits..].starts_with(['.', ')']) {
        return false;
    }
    // A thematic break cannot be heading text
    if parse_setext_underline(line) == Some(2) {
        return false;
    }
    parse_atx(line).is_none()
}

/// Extract headings (with slugs) and explicit anchors from a document
pub fn scan_headings(content: &str, path: &str) -> HeadingScan {
    let mut scan = HeadingScan::default();
    let mut registry = SlugRegistry::new();
    let mut fence = FenceState::new();
    let skip = front_matter_lines(content);

    // Previous line, if it could still become a setext heading
    let mut pending: Option<(u32, &str)> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx as u32 + 1;
        if idx < skip {
            continue;
        }

        if fence.consume(line, line_num) {
            pending = None;
            continue;
        }

        for caps in HTML_ID_RE.captures_iter(line) {
            scan.anchors.push(ExplicitAnchor {
                id: caps[1].to_string(),
                line: line_num,
            });
        }

        if let Some((level, text)) = parse_atx(line) {
            push_heading(&mut scan, &mut registry, text, level, line_num, path);
            pending = None;
            continue;
        }

        if let (Some((text_line, text)), Some(level)) = (pending, parse_setext_underline(line)) {
            push_heading(&mut scan, &mut registry, text.trim(), level, text_line, path);
            pending = None;
            continue;
        }

        pending = if is_paragraph_line(line) {
            Some((line_num, line))
        } else {
            None
        };
    }

    if let Some(line) = fence.unclosed() {
        scan.warnings.push(Warning::new(
            codes::UNCLOSED_FENCE,
            "code fence is never closed; the rest of the file is treated as code",
            path,
            Some(line),
        ));
    }

    check_explicit_duplicates(&mut scan, path);
    scan
}

fn push_heading(
    scan: &mut HeadingScan,
    registry: &mut SlugRegistry,
    raw: &str,
    level: u8,
    line: u32,
    path: &str,
) {
    let (text, slug) = match HEADING_ID_RE.captures(raw) {
        Some(caps) => {
            let id = caps[1].to_string();
            if !registry.claim(&id) {
                scan.warnings.push(Warning::new(
                    codes::DUPLICATE_ANCHOR,
                    format!("anchor '{}' is defined more than once", id),
                    path,
                    Some(line),
                ));
            }
            let text = raw[..caps.get(0).map(|m| m.start()).unwrap_or(raw.len())].to_string();
            (text, id)
        }
        None => (raw.to_string(), registry.resolve(raw)),
    };

    scan.headings.push(Heading {
        text,
        level,
        line,
        slug,
    });
}

/// HTML ids share the namespace of heading slugs; report collisions
fn check_explicit_duplicates(scan: &mut HeadingScan, path: &str) {
    let mut seen: HashSet<&str> = scan
        .headings
        .iter()
        .map(|h| h.slug.as_str())
        .filter(|s| !s.is_empty())
        .collect();

    let mut duplicates = Vec::new();
    for anchor in &scan.anchors {
        if !seen.insert(anchor.id.as_str()) {
            duplicates.push(Warning::new(
                codes::DUPLICATE_ANCHOR,
                format!("anchor '{}' is defined more than once", anchor.id),
                path,
                Some(anchor.line),
            ));
        }
    }

    scan.warnings.extend(duplicates);
}
