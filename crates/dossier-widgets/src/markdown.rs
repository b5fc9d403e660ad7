//! Lightweight structured-text rendering for descriptions.
//!
//! Supports the subset of markdown that asset descriptions actually use:
//! ATX headings, fenced code blocks, bullet and ordered lists, paragraphs,
//! and the inline forms `` `code` ``, `**strong**`, `*em*`/`_em_` and
//! `[text](url)`. Anything else is kept as literal text.

use dossier_core::widget::{FontFamily, FontWeight, TextStyle};
use dossier_core::{escape_html, Point};
use serde::{Deserialize, Serialize};

/// Character width as a fraction of the font size.
pub const CHAR_WIDTH_EM: f32 = 0.6;
/// Line height as a fraction of the font size.
pub const LINE_HEIGHT_EM: f32 = 1.2;

/// Inline content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inline {
    /// Plain text
    Text(String),
    /// Code span
    Code(String),
    /// Strong emphasis
    Strong(Vec<Inline>),
    /// Emphasis
    Emphasis(Vec<Inline>),
    /// Hyperlink
    Link {
        /// Link text
        content: Vec<Inline>,
        /// Target URL
        url: String,
    },
}

/// Block-level content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    /// `#` through `######`
    Heading {
        /// Level 1-6
        level: u8,
        /// Heading text
        content: Vec<Inline>,
    },
    /// Run of text lines
    Paragraph(Vec<Inline>),
    /// Fenced code
    CodeBlock {
        /// Info string after the opening fence
        language: Option<String>,
        /// Code, verbatim
        code: String,
    },
    /// Bullet or ordered list
    List {
        /// Numbered list
        ordered: bool,
        /// Items
        items: Vec<Vec<Inline>>,
    },
}

/// Parsed description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<Block>,
}

/// One positioned line of laid-out text.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutLine {
    /// Line text
    pub text: String,
    /// Top-left corner relative to the document origin
    pub position: Point,
    /// Height of the line box
    pub height: f32,
    /// Style to draw with
    pub style: TextStyle,
}

/// Result of [`Document::layout`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    /// Lines in reading order
    pub lines: Vec<LaidOutLine>,
    /// Width the document was laid out at
    pub width: f32,
    /// Natural height of the content
    pub height: f32,
}

impl Document {
    /// Parse structured text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        BlockParser::default().parse(text)
    }

    /// Parsed blocks.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Whether there is nothing to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Text content without markup, blocks separated by blank lines.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Escaped HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.blocks
            .iter()
            .map(Block::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Wrap the document to `width` pixels at a base font size.
    #[must_use]
    pub fn layout(&self, width: f32, font_px: f32) -> TextLayout {
        let base_line = font_px * LINE_HEIGHT_EM;
        let block_gap = base_line * 0.5;
        let mut lines = Vec::new();
        let mut y = 0.0;

        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                y += block_gap;
            }
            match block {
                Block::Heading { level, content } => {
                    let style = TextStyle {
                        size: font_px * heading_scale(*level),
                        weight: FontWeight::Bold,
                        ..TextStyle::default()
                    };
                    push_wrapped(&mut lines, &mut y, &inline_text(content), 0.0, width, &style);
                }
                Block::Paragraph(content) => {
                    let style = TextStyle {
                        size: font_px,
                        ..TextStyle::default()
                    };
                    push_wrapped(&mut lines, &mut y, &inline_text(content), 0.0, width, &style);
                }
                Block::CodeBlock { code, .. } => {
                    let style = TextStyle {
                        size: font_px,
                        family: FontFamily::Monospace,
                        ..TextStyle::default()
                    };
                    let height = style.size * LINE_HEIGHT_EM;
                    for line in code.split('\n') {
                        lines.push(LaidOutLine {
                            text: line.to_string(),
                            position: Point::new(0.0, y),
                            height,
                            style: style.clone(),
                        });
                        y += height;
                    }
                }
                Block::List { ordered, items } => {
                    let style = TextStyle {
                        size: font_px,
                        ..TextStyle::default()
                    };
                    let indent = font_px;
                    for (n, item) in items.iter().enumerate() {
                        let marker = if *ordered {
                            format!("{}.", n + 1)
                        } else {
                            "\u{2022}".to_string()
                        };
                        let text = format!("{marker} {}", inline_text(item));
                        push_wrapped(&mut lines, &mut y, &text, indent, width, &style);
                    }
                }
            }
        }

        TextLayout {
            lines,
            width,
            height: y,
        }
    }
}

impl Block {
    fn plain_text(&self) -> String {
        match self {
            Self::Heading { content, .. } | Self::Paragraph(content) => inline_text(content),
            Self::CodeBlock { code, .. } => code.clone(),
            Self::List { items, .. } => items
                .iter()
                .map(|item| inline_text(item))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn to_html(&self) -> String {
        match self {
            Self::Heading { level, content } => {
                format!("<h{level}>{}</h{level}>", inline_html(content))
            }
            Self::Paragraph(content) => format!("<p>{}</p>", inline_html(content)),
            Self::CodeBlock { language, code } => match language {
                Some(lang) => format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    escape_html(lang),
                    escape_html(code)
                ),
                None => format!("<pre><code>{}</code></pre>", escape_html(code)),
            },
            Self::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                let items: String = items
                    .iter()
                    .map(|item| format!("<li>{}</li>", inline_html(item)))
                    .collect();
                format!("<{tag}>{items}</{tag}>")
            }
        }
    }
}

fn heading_scale(level: u8) -> f32 {
    match level {
        1 => 2.0,
        2 => 1.5,
        3 => 1.25,
        _ => 1.0,
    }
}

fn push_wrapped(
    lines: &mut Vec<LaidOutLine>,
    y: &mut f32,
    text: &str,
    indent: f32,
    width: f32,
    style: &TextStyle,
) {
    let height = style.size * LINE_HEIGHT_EM;
    let char_width = style.size * CHAR_WIDTH_EM;
    let max_chars = max_chars((width - indent).max(0.0), char_width);

    for line in wrap(text, max_chars) {
        lines.push(LaidOutLine {
            text: line,
            position: Point::new(indent, *y),
            height,
            style: style.clone(),
        });
        *y += height;
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn max_chars(width: f32, char_width: f32) -> usize {
    if char_width <= 0.0 || width.is_nan() {
        return 1;
    }
    ((width / char_width).floor() as usize).max(1)
}

/// Greedy word wrap. Words longer than a line are broken.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word = word;
        let mut word_len = word.chars().count();

        while word_len > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let split = word
                .char_indices()
                .nth(max_chars)
                .map_or(word.len(), |(i, _)| i);
            let (head, tail) = word.split_at(split);
            lines.push(head.to_string());
            word = tail;
            word_len -= max_chars;
        }

        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

fn inline_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Strong(inner) | Inline::Emphasis(inner) => out.push_str(&inline_text(inner)),
            Inline::Link { content, .. } => out.push_str(&inline_text(content)),
        }
    }
    out
}

fn inline_html(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Code(code) => {
                out.push_str("<code>");
                out.push_str(&escape_html(code));
                out.push_str("</code>");
            }
            Inline::Strong(inner) => {
                out.push_str("<strong>");
                out.push_str(&inline_html(inner));
                out.push_str("</strong>");
            }
            Inline::Emphasis(inner) => {
                out.push_str("<em>");
                out.push_str(&inline_html(inner));
                out.push_str("</em>");
            }
            Inline::Link { content, url } if is_safe_url(url) => {
                out.push_str(&format!(
                    r#"<a href="{}">{}</a>"#,
                    escape_html(url),
                    inline_html(content)
                ));
            }
            Inline::Link { content, .. } => out.push_str(&inline_html(content)),
        }
    }
    out
}

fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    !(lower.starts_with("javascript:") || lower.starts_with("data:") || lower.starts_with("vbscript:"))
}

#[derive(Default)]
struct BlockParser {
    blocks: Vec<Block>,
    paragraph: Vec<String>,
    list: Option<(bool, Vec<String>)>,
    fence: Option<(Option<String>, Vec<String>)>,
}

impl BlockParser {
    fn parse(mut self, text: &str) -> Document {
        for line in text.lines() {
            self.line(line);
        }
        if let Some((language, code)) = self.fence.take() {
            self.blocks.push(Block::CodeBlock {
                language,
                code: code.join("\n"),
            });
        }
        self.flush();
        Document {
            blocks: self.blocks,
        }
    }

    fn line(&mut self, line: &str) {
        let trimmed = line.trim();

        if let Some((language, code)) = &mut self.fence {
            if trimmed.starts_with("```") {
                let block = Block::CodeBlock {
                    language: language.take(),
                    code: code.join("\n"),
                };
                self.fence = None;
                self.blocks.push(block);
            } else {
                code.push(line.to_string());
            }
            return;
        }

        if let Some(info) = trimmed.strip_prefix("```") {
            self.flush();
            let info = info.trim();
            let language = (!info.is_empty()).then(|| info.to_string());
            self.fence = Some((language, Vec::new()));
        } else if trimmed.is_empty() {
            self.flush();
        } else if let Some((level, content)) = heading(trimmed) {
            self.flush();
            self.blocks.push(Block::Heading {
                level,
                content: parse_inlines(content),
            });
        } else if let Some((ordered, item)) = list_item(trimmed) {
            self.flush_paragraph();
            if matches!(self.list, Some((o, _)) if o != ordered) {
                self.flush_list();
            }
            self.list
                .get_or_insert_with(|| (ordered, Vec::new()))
                .1
                .push(item.to_string());
        } else if let Some((_, items)) = self.list.as_mut().filter(|_| line.starts_with([' ', '\t'])) {
            if let Some(last) = items.last_mut() {
                last.push(' ');
                last.push_str(trimmed);
            }
        } else {
            self.flush_list();
            self.paragraph.push(trimmed.to_string());
        }
    }

    fn flush(&mut self) {
        self.flush_paragraph();
        self.flush_list();
    }

    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let text = std::mem::take(&mut self.paragraph).join(" ");
            self.blocks.push(Block::Paragraph(parse_inlines(&text)));
        }
    }

    fn flush_list(&mut self) {
        if let Some((ordered, items)) = self.list.take() {
            self.blocks.push(Block::List {
                ordered,
                items: items.iter().map(|item| parse_inlines(item)).collect(),
            });
        }
    }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = line.get(hashes..)?;
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    let content = rest.trim().trim_end_matches('#').trim_end();
    u8::try_from(hashes).ok().map(|level| (level, content))
}

fn list_item(line: &str) -> Option<(bool, &str)> {
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some((false, rest.trim_start()));
        }
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if (1..=9).contains(&digits) {
        let rest = line.get(digits..)?;
        if let Some(item) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return Some((true, item.trim_start()));
        }
    }
    None
}

/// Parse inline markup. Unmatched markers stay literal.
#[must_use]
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        let parsed = match c {
            '`' => find(&chars, i + 1, &['`']).map(|end| {
                (Inline::Code(collect(&chars[i + 1..end])), end + 1)
            }),
            '*' if next == Some('*') => find(&chars, i + 2, &['*', '*'])
                .filter(|&end| end > i + 2)
                .map(|end| {
                    (
                        Inline::Strong(parse_inlines(&collect(&chars[i + 2..end]))),
                        end + 2,
                    )
                }),
            '*' | '_' => {
                let opens = c == '*' || i == 0 || !chars[i - 1].is_alphanumeric();
                find(&chars, i + 1, &[c])
                    .filter(|&end| opens && end > i + 1)
                    .map(|end| {
                        (
                            Inline::Emphasis(parse_inlines(&collect(&chars[i + 1..end]))),
                            end + 1,
                        )
                    })
            }
            '[' => link(&chars, i),
            _ => None,
        };

        match parsed {
            Some((inline, resume)) => {
                if !buf.is_empty() {
                    out.push(Inline::Text(std::mem::take(&mut buf)));
                }
                out.push(inline);
                i = resume;
            }
            None => {
                buf.push(c);
                i += 1;
            }
        }
    }

    if !buf.is_empty() {
        out.push(Inline::Text(buf));
    }
    out
}

fn link(chars: &[char], open: usize) -> Option<(Inline, usize)> {
    let close = find(chars, open + 1, &[']'])?;
    if chars.get(close + 1) != Some(&'(') {
        return None;
    }
    let end = find(chars, close + 2, &[')'])?;
    Some((
        Inline::Link {
            content: parse_inlines(&collect(&chars[open + 1..close])),
            url: collect(&chars[close + 2..end]).trim().to_string(),
        },
        end + 1,
    ))
}

fn find(chars: &[char], from: usize, pattern: &[char]) -> Option<usize> {
    let last = chars.len().checked_sub(pattern.len())?;
    (from..=last).find(|&j| chars[j..j + pattern.len()] == *pattern)
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_core::widget::FontStyle;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_parse_paragraphs() {
        let doc = Document::parse("first line\nsecond line\n\nnext paragraph");
        assert_eq!(
            doc.blocks(),
            &[
                Block::Paragraph(vec![text("first line second line")]),
                Block::Paragraph(vec![text("next paragraph")]),
            ]
        );
    }

    #[test]
    fn test_parse_headings() {
        let doc = Document::parse("# Title\n### Sub ###\n####### too deep\n#hashtag");
        assert_eq!(
            doc.blocks()[0],
            Block::Heading {
                level: 1,
                content: vec![text("Title")]
            }
        );
        assert_eq!(
            doc.blocks()[1],
            Block::Heading {
                level: 3,
                content: vec![text("Sub")]
            }
        );
        assert_eq!(
            doc.blocks()[2],
            Block::Paragraph(vec![text("####### too deep #hashtag")])
        );
    }

    #[test]
    fn test_parse_fenced_code() {
        let doc = Document::parse("```sql\nSELECT *\n  FROM t\n```\nafter");
        assert_eq!(
            doc.blocks()[0],
            Block::CodeBlock {
                language: Some("sql".to_string()),
                code: "SELECT *\n  FROM t".to_string()
            }
        );
        assert_eq!(doc.blocks()[1], Block::Paragraph(vec![text("after")]));
    }

    #[test]
    fn test_unclosed_fence_keeps_code() {
        let doc = Document::parse("```\nx = 1");
        assert_eq!(
            doc.blocks(),
            &[Block::CodeBlock {
                language: None,
                code: "x = 1".to_string()
            }]
        );
    }

    #[test]
    fn test_parse_lists() {
        let doc = Document::parse("- one\n* two\n  continued\n1. first\n2) second");
        assert_eq!(
            doc.blocks(),
            &[
                Block::List {
                    ordered: false,
                    items: vec![vec![text("one")], vec![text("two continued")]],
                },
                Block::List {
                    ordered: true,
                    items: vec![vec![text("first")], vec![text("second")]],
                },
            ]
        );
    }

    #[test]
    fn test_paragraph_after_list() {
        let doc = Document::parse("- item\nplain");
        assert_eq!(doc.blocks().len(), 2);
        assert_eq!(doc.blocks()[1], Block::Paragraph(vec![text("plain")]));
    }

    #[test]
    fn test_parse_inlines() {
        assert_eq!(
            parse_inlines("use `code` and **bold** or *it* [docs](https://x.io)"),
            vec![
                text("use "),
                Inline::Code("code".to_string()),
                text(" and "),
                Inline::Strong(vec![text("bold")]),
                text(" or "),
                Inline::Emphasis(vec![text("it")]),
                text(" "),
                Inline::Link {
                    content: vec![text("docs")],
                    url: "https://x.io".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unmatched_markers_are_literal() {
        assert_eq!(parse_inlines("2 * 3 and `open"), vec![text("2 * 3 and `open")]);
        assert_eq!(parse_inlines("**"), vec![text("**")]);
        assert_eq!(parse_inlines("[text] (no link)"), vec![text("[text] (no link)")]);
    }

    #[test]
    fn test_intraword_underscore_is_literal() {
        assert_eq!(parse_inlines("snake_case_name"), vec![text("snake_case_name")]);
        assert_eq!(
            parse_inlines("_em_ here"),
            vec![Inline::Emphasis(vec![text("em")]), text(" here")]
        );
    }

    #[test]
    fn test_plain_text() {
        let doc = Document::parse("# Orders\n\nAll **orders**.\n\n- a\n- b");
        assert_eq!(doc.plain_text(), "Orders\n\nAll orders.\n\na\nb");
    }

    #[test]
    fn test_to_html_escapes() {
        let doc = Document::parse("# A <b>\n\n`x < y` & [l](https://e.com?a=1&b=2)");
        assert_eq!(
            doc.to_html(),
            "<h1>A &lt;b&gt;</h1>\n<p><code>x &lt; y</code> &amp; \
             <a href=\"https://e.com?a=1&amp;b=2\">l</a></p>"
        );
    }

    #[test]
    fn test_to_html_drops_script_urls() {
        let doc = Document::parse("[click](javascript:alert(1))");
        assert!(!doc.to_html().contains("href"));
    }

    #[test]
    fn test_to_html_lists_and_code() {
        let doc = Document::parse("1. a\n2. b\n\n```py\nprint()\n```");
        assert_eq!(
            doc.to_html(),
            "<ol><li>a</li><li>b</li></ol>\n<pre><code class=\"language-py\">print()</code></pre>"
        );
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::parse("   \n\n");
        assert!(doc.is_empty());
        assert_eq!(doc.layout(100.0, 10.0).height, 0.0);
        assert_eq!(doc.to_html(), "");
    }

    #[test]
    fn test_layout_single_line() {
        let doc = Document::parse("hello");
        let layout = doc.layout(1000.0, 10.0);
        assert_eq!(layout.lines.len(), 1);
        assert_eq!(layout.lines[0].text, "hello");
        assert!((layout.height - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_layout_wraps_words() {
        // 10px font => 6px per char, 60px => 10 chars per line
        let doc = Document::parse("aaaa bbbb cccc dddd");
        let layout = doc.layout(60.0, 10.0);
        let texts: Vec<&str> = layout.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["aaaa bbbb", "cccc dddd"]);
        assert!((layout.height - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_layout_breaks_long_words() {
        let doc = Document::parse("abcdefghijklmnopqrstuvwxy");
        let layout = doc.layout(60.0, 10.0);
        let texts: Vec<&str> = layout.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["abcdefghij", "klmnopqrst", "uvwxy"]);
    }

    #[test]
    fn test_layout_block_gap_and_heading_scale() {
        let doc = Document::parse("# H\n\nbody");
        let layout = doc.layout(1000.0, 10.0);
        // h1: 20px font => 24px line, gap 6px, body 12px
        assert!((layout.lines[1].position.y - 30.0).abs() < 1e-4);
        assert!((layout.height - 42.0).abs() < 1e-4);
        assert_eq!(layout.lines[0].style.weight, FontWeight::Bold);
    }

    #[test]
    fn test_layout_code_lines_do_not_wrap() {
        let doc = Document::parse("```\na very long line of code\nb\n```");
        let layout = doc.layout(30.0, 10.0);
        assert_eq!(layout.lines.len(), 2);
        assert_eq!(layout.lines[0].style.family, FontFamily::Monospace);
    }

    #[test]
    fn test_layout_list_markers_and_indent() {
        let doc = Document::parse("- a\n- b");
        let layout = doc.layout(1000.0, 10.0);
        assert_eq!(layout.lines[0].text, "\u{2022} a");
        assert_eq!(layout.lines[0].position.x, 10.0);
        assert_eq!(layout.lines[0].style.style, FontStyle::Normal);
    }

    #[test]
    fn test_layout_narrower_is_taller() {
        let doc = Document::parse("one two three four five six seven eight nine ten");
        assert!(doc.layout(60.0, 10.0).height > doc.layout(600.0, 10.0).height);
    }

    #[test]
    fn test_layout_zero_width_does_not_hang() {
        let doc = Document::parse("abc");
        let layout = doc.layout(0.0, 10.0);
        assert_eq!(layout.lines.len(), 3);
    }

    #[test]
    fn test_document_serializes() {
        let doc = Document::parse("**x**");
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }
}
