//! Inline link extraction
//!
//! Finds `[label](target)` and `![alt](src)` on each line outside fenced code
//! blocks and inline code spans. Reference-style links are not recognized.
//! Malformed targets are skipped with a warning.

use crate::core::model::{codes, Link, Warning};
use crate::core::paths::percent_decode;
use crate::docs::blocks::{front_matter_lines, FenceState};

/// Links found in a document plus any parse warnings
#[derive(Debug, Default)]
pub struct LinkScan {
    pub links: Vec<Link>,
    pub warnings: Vec<Warning>,
}

/// Extract inline links in document order
pub fn extract_links(content: &str, path: &str) -> LinkScan {
    let mut scan = LinkScan::default();
    let mut fence = FenceState::new();
    let skip = front_matter_lines(content);

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx as u32 + 1;
        if idx < skip || fence.consume(line, line_num) {
            continue;
        }
        scan_line(line, line_num, path, &mut scan);
    }

    scan
}

fn scan_line(line: &str, line_num: u32, path: &str, scan: &mut LinkScan) {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '`' => i = skip_code_span(&chars, i),
            '[' => {
                let image = i > 0 && chars[i - 1] == '!' && !is_escaped(&chars, i - 1);
                match parse_link_at(&chars, i) {
                    LinkParse::Link { label, target } => {
                        let column = if image { i } else { i + 1 };
                        scan.links
                            .push(build_link(&target, label, line_num, column as u32, image));
                    }
                    LinkParse::Malformed { reason } => {
                        scan.warnings.push(Warning::new(
                            codes::MALFORMED_LINK,
                            reason,
                            path,
                            Some(line_num),
                        ));
                    }
                    LinkParse::NotALink => {}
                }
                // Continue inside the label so nested links are found too
                i += 1;
            }
            _ => i += 1,
        }
    }
}

fn is_escaped(chars: &[char], pos: usize) -> bool {
    let backslashes = chars[..pos].iter().rev().take_while(|&&c| c == '\\').count();
    backslashes % 2 == 1
}

/// Skip an inline code span starting at `start`; unmatched runs are literal
fn skip_code_span(chars: &[char], start: usize) -> usize {
    let run = chars[start..].iter().take_while(|&&c| c == '`').count();
    let mut j = start + run;

    while j < chars.len() {
        if chars[j] == '`' {
            let close = chars[j..].iter().take_while(|&&c| c == '`').count();
            if close == run {
                return j + close;
            }
            j += close;
        } else {
            j += 1;
        }
    }

    start + run
}

#[derive(Debug, PartialEq)]
enum LinkParse {
    Link { label: String, target: String },
    Malformed { reason: String },
    NotALink,
}

/// Parse `[label](target)` with `[` at `open`
fn parse_link_at(chars: &[char], open: usize) -> LinkParse {
    // Matching ']' with nesting
    let mut depth = 0usize;
    let mut j = open;
    let close = loop {
        if j >= chars.len() {
            return LinkParse::NotALink;
        }
        match chars[j] {
            '\\' => {
                j += 2;
                continue;
            }
            '`' => {
                j = skip_code_span(chars, j);
                continue;
            }
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    break j;
                }
            }
            _ => {}
        }
        j += 1;
    };

    if chars.get(close + 1) != Some(&'(') {
        return LinkParse::NotALink;
    }

    let label: String = chars[open + 1..close].iter().collect();
    let target_start = close + 2;

    // Angle-bracket destination
    let mut k = target_start;
    while k < chars.len() && chars[k] == ' ' {
        k += 1;
    }
    if chars.get(k) == Some(&'<') {
        let Some(end) = chars[k + 1..].iter().position(|&c| c == '>') else {
            return LinkParse::Malformed {
                reason: format!("unclosed '<' in target of link [{}]", label),
            };
        };
        let target: String = chars[k + 1..k + 1 + end].iter().collect();
        return match chars[k + 1 + end + 1..].iter().position(|&c| c == ')') {
            Some(_) => LinkParse::Link { label, target },
            None => LinkParse::Malformed {
                reason: format!("unclosed target of link [{}]", label),
            },
        };
    }

    // Plain destination with balanced parentheses
    let mut parens = 0usize;
    let mut m = target_start;
    let end = loop {
        if m >= chars.len() {
            return LinkParse::Malformed {
                reason: format!("unclosed target of link [{}]", label),
            };
        }
        match chars[m] {
            '\\' => {
                m += 2;
                continue;
            }
            '(' => parens += 1,
            ')' if parens == 0 => break m,
            ')' => parens -= 1,
            _ => {}
        }
        m += 1;
    };

    let inner: String = chars[target_start..end].iter().collect();
    let inner = inner.trim();

    // Drop an optional title: `path "title"`
    let target = inner.split_whitespace().next().unwrap_or("").to_string();
    if target.is_empty() && !inner.is_empty() {
        return LinkParse::Malformed {
            reason: format!("link [{}] has a title but no target", label),
        };
    }

    LinkParse::Link { label, target }
}

fn build_link(target: &str, label: String, line: u32, column: u32, image: bool) -> Link {
    let (before_hash, anchor) = match target.split_once('#') {
        Some((p, a)) => (p, Some(percent_decode(a))),
        None => (target, None),
    };
    let path_part = before_hash.split('?').next().unwrap_or("");

    Link {
        target: target.to_string(),
        path: percent_decode(path_part),
        anchor,
        label,
        line,
        column,
        image,
    }
}
