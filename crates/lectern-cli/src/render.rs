//! Terminal markdown rendering.
//!
//! A small regex-based renderer for the markdown subset that appears in
//! lesson pages and transformed output: headings, bold, italics, inline
//! code, fenced code blocks, and lists. Anything else passes through as
//! plain text.

use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.\s+(.*)$").unwrap());

fn render_inline(line: &str) -> String {
    let line = BOLD.replace_all(line, |caps: &regex::Captures| {
        caps[1].bold().to_string()
    });
    let line = ITALIC.replace_all(&line, |caps: &regex::Captures| {
        caps[1].italic().to_string()
    });
    INLINE_CODE
        .replace_all(&line, |caps: &regex::Captures| {
            caps[1].yellow().to_string()
        })
        .into_owned()
}

/// Renders markdown into ANSI-styled terminal text.
pub fn render(markdown: &str) -> String {
    let mut out = Vec::new();
    let mut in_code_block = false;

    for line in markdown.lines() {
        if line.trim_start().starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }
        if in_code_block {
            out.push(format!("    {}", line.yellow()));
            continue;
        }

        if let Some(text) = line.strip_prefix("### ") {
            out.push(render_inline(text).bold().to_string());
        } else if let Some(text) = line.strip_prefix("## ") {
            out.push(render_inline(text).bright_cyan().bold().to_string());
        } else if let Some(text) = line.strip_prefix("# ") {
            out.push(render_inline(text).bright_magenta().bold().to_string());
        } else if let Some(text) = line
            .strip_prefix("- ")
            .or_else(|| line.strip_prefix("* "))
        {
            out.push(format!("  {} {}", "•".bright_black(), render_inline(text)));
        } else if let Some(caps) = ORDERED_ITEM.captures(line) {
            out.push(format!(
                "  {} {}",
                format!("{}.", &caps[1]).bright_black(),
                render_inline(&caps[2])
            ));
        } else {
            out.push(render_inline(line));
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(markdown: &str) -> String {
        colored::control::set_override(false);
        let rendered = render(markdown);
        colored::control::unset_override();
        rendered
    }

    #[test]
    fn headings_keep_their_text() {
        let out = plain("# Title\n## Section\n### Sub");
        assert_eq!(out, "Title\nSection\nSub");
    }

    #[test]
    fn inline_markers_are_removed() {
        let out = plain("A **bold** and *italic* word with `code`.");
        assert_eq!(out, "A bold and italic word with code.");
    }

    #[test]
    fn lists_get_bullets() {
        let out = plain("- first\n* second\n3. third");
        assert_eq!(out, "  • first\n  • second\n  3. third");
    }

    #[test]
    fn code_blocks_are_indented_and_fences_dropped() {
        let out = plain("```python\nprint('hi')\n```");
        assert_eq!(out, "    print('hi')");
    }

    #[test]
    fn code_block_content_is_not_inline_styled() {
        let out = plain("```\n**not bold**\n```");
        assert_eq!(out, "    **not bold**");
    }

    #[test]
    fn plain_paragraphs_pass_through() {
        let out = plain("Just a paragraph.\n\nAnother one.");
        assert_eq!(out, "Just a paragraph.\n\nAnother one.");
    }
}
