//! Block-level scanning shared by heading and link extraction
//!
//! Tracks fenced code blocks (``` and ~~~) and YAML front matter so that
//! example snippets never produce headings or links.

/// Tracks whether the current line is inside a fenced code block
#[derive(Debug, Default)]
pub struct FenceState {
    /// Fence character, its run length and the line it opened on
    open: Option<(char, usize, u32)>,
}

impl FenceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line; returns true if the line belongs to a fenced block
    /// (fence lines included).
    pub fn consume(&mut self, line: &str, line_num: u32) -> bool {
        match self.open {
            Some((ch, len, _)) => {
                if is_closing_fence(line, ch, len) {
                    self.open = None;
                }
                true
            }
            None => match opening_fence(line) {
                Some((ch, len)) => {
                    self.open = Some((ch, len, line_num));
                    true
                }
                None => false,
            },
        }
    }

    /// Line of a fence that was never closed
    pub fn unclosed(&self) -> Option<u32> {
        self.open.map(|(_, _, line)| line)
    }
}

/// Strip up to three spaces of indentation; `None` for indented code
fn strip_indent(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        None
    } else {
        Some(&line[indent..])
    }
}

fn opening_fence(line: &str) -> Option<(char, usize)> {
    let rest = strip_indent(line)?;
    let ch = rest.chars().next()?;
    if ch != '`' && ch != '~' {
        return None;
    }

    let len = rest.chars().take_while(|&c| c == ch).count();
    if len < 3 {
        return None;
    }

    // Backtick fences may not carry backticks in their info string
    let info = &rest[len..];
    if ch == '`' && info.contains('`') {
        return None;
    }

    Some((ch, len))
}

fn is_closing_fence(line: &str, ch: char, min_len: usize) -> bool {
    let Some(rest) = strip_indent(line) else {
        return false;
    };
    let len = rest.chars().take_while(|&c| c == ch).count();
    len >= min_len && rest[len..].trim().is_empty()
}

/// Number of leading lines taken by a `---` delimited front matter block
pub fn front_matter_lines(content: &str) -> usize {
    let mut lines = content.lines();
    match lines.next() {
        Some(first) if first.trim_end() == "---" => {}
        _ => return 0,
    }

    for (idx, line) in lines.enumerate() {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            return idx + 2;
        }
    }

    // No closing delimiter: not front matter
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_fence() {
        let mut state = FenceState::new();
        assert!(!state.consume("text", 1));
        assert!(state.consume("```ts", 2));
        assert!(state.consume("[a](b.md)", 3));
        assert!(state.consume("```", 4));
        assert!(!state.consume("after", 5));
        assert_eq!(state.unclosed(), None);
    }

    #[test]
    fn test_tilde_fence_not_closed_by_backticks() {
        let mut state = FenceState::new();
        assert!(state.consume("~~~", 1));
        assert!(state.consume("```", 2));
        assert!(state.consume("~~~", 3));
        assert!(!state.consume("x", 4));
    }

    #[test]
    fn test_longer_fence_needs_longer_close() {
        let mut state = FenceState::new();
        assert!(state.consume("````markdown", 1));
        assert!(state.consume("```", 2));
        assert!(state.consume("````", 3));
        assert!(!state.consume("x", 4));
    }

    #[test]
    fn test_indented_code_is_not_a_fence() {
        let mut state = FenceState::new();
        assert!(!state.consume("    ```", 1));
        assert!(state.consume("   ```", 2));
    }

    #[test]
    fn test_unclosed_fence_reported() {
        let mut state = FenceState::new();
        state.consume("```", 7);
        state.consume("code", 8);
        assert_eq!(state.unclosed(), Some(7));
    }

    #[test]
    fn test_inline_triple_backticks_not_fence() {
        let mut state = FenceState::new();
        assert!(!state.consume("``` inline ``` code", 1));
    }

    #[test]
    fn test_front_matter() {
        assert_eq!(front_matter_lines("---\ntitle: x\n---\n# H\n"), 3);
        assert_eq!(front_matter_lines("# H\n---\n"), 0);
        assert_eq!(front_matter_lines("---\nno close\n"), 0);
    }
}
