//! Markdown/LaTeX 解析
//!
//! 使用 pulldown-cmark 的数学扩展：`$...$` 为行内公式，`$$...$$` 为独立公式。
//! 公式以转义后的 TeX 源码放进 `span.math`，由页面里的 KaTeX 排版。

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use regex::Regex;

static PAREN_INLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\((.+?)\\\)").expect("valid regex"));
// 只有独占一行（可跨行）的 `\[..\]` 才是独立公式，行内的 `a\[i\]` 是转义的方括号
static BRACKET_DISPLAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms)^[ \t]*\\\[(.+?)\\\][ \t]*$").expect("valid regex"));

fn parser_options() -> Options {
    Options::ENABLE_MATH | Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// 把 `\(..\)` 和 `\[..\]` 统一成 `$..$` 和 `$$..$$`
///
/// 代码片段和代码块里的内容保持原样。
pub fn normalize_math_delimiters(text: &str) -> Cow<'_, str> {
    if !text.contains("\\(") && !text.contains("\\[") {
        return Cow::Borrowed(text);
    }

    let code = code_ranges(text);
    let mut replacements: Vec<(Range<usize>, String)> = Vec::new();
    for caps in BRACKET_DISPLAY.captures_iter(text) {
        if let Some(whole) = caps.get(0) {
            replacements.push((whole.range(), format!("$${}$$", caps[1].trim())));
        }
    }
    for caps in PAREN_INLINE.captures_iter(text) {
        if let Some(whole) = caps.get(0) {
            replacements.push((whole.range(), format!("${}$", caps[1].trim())));
        }
    }
    replacements.retain(|(range, _)| !code.iter().any(|c| overlaps(range, c)));
    if replacements.is_empty() {
        return Cow::Borrowed(text);
    }
    replacements.sort_by_key(|(range, _)| range.start);

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for (range, replacement) in replacements {
        // 独立公式内部的行内分隔符已经被整体替换
        if range.start < cursor {
            continue;
        }
        output.push_str(&text[cursor..range.start]);
        output.push_str(&replacement);
        cursor = range.end;
    }
    output.push_str(&text[cursor..]);
    Cow::Owned(output)
}

/// 行内代码和代码块（围栏或缩进）在原文中的位置
fn code_ranges(text: &str) -> Vec<Range<usize>> {
    Parser::new_ext(text, parser_options())
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Code(_) | Event::Start(Tag::CodeBlock(_)) => Some(range),
            _ => None,
        })
        .collect()
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// 把 Markdown 文本转换为 HTML 片段
///
/// 模型输出中的原始 HTML 一律当作文本转义，不会注入页面。
pub fn markdown_to_html(text: &str) -> String {
    let normalized = normalize_math_delimiters(text);
    let events = Parser::new_ext(&normalized, parser_options()).map(|event| match event {
        Event::InlineMath(tex) => math_span("math math-inline", &tex),
        Event::DisplayMath(tex) => math_span("math math-display", &tex),
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut output = String::with_capacity(normalized.len() * 3 / 2);
    html::push_html(&mut output, events);
    output
}

fn math_span(class: &str, tex: &str) -> Event<'static> {
    Event::InlineHtml(CowStr::from(format!(
        "<span class=\"{}\">{}</span>",
        class,
        escape_html(tex)
    )))
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
