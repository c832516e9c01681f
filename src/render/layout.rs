//! 试卷版面
//!
//! A4 纸张、指定栏数、固定 10mm 栏间距。版面规则都在样式表里：
//! 段落紧凑且不跨栏断开，列表缩进，三级标题依次减弱。
//! 打印样式隐藏 `.no-print` 和 `.no-capture`。

use crate::models::RenderConfig;
use crate::render::markdown::{escape_html, markdown_to_html};

/// 栏间距
pub const COLUMN_GAP: &str = "10mm";
/// 试卷元素的 id，导出时按它定位
pub const PAPER_ELEMENT_ID: &str = "paper";
/// 生成中提示光标的类名
pub const STREAM_CURSOR_CLASS: &str = "stream-cursor";
/// 导出时要排除的元素的类名
pub const NO_CAPTURE_CLASS: &str = "no-capture";

const PAPER_STYLE: &str = r#"
@page { size: A4; margin: 0; }
html, body { margin: 0; padding: 0; background: #ffffff; }
body {
  font-family: "Times New Roman", "Noto Serif", serif;
  color: #0f172a;
  -webkit-print-color-adjust: exact;
  print-color-adjust: exact;
}
.a4-paper {
  box-sizing: border-box;
  width: 210mm;
  min-height: 297mm;
  margin: 0 auto;
  padding: 12mm 10mm;
  background: #ffffff;
  column-fill: balance;
  text-align: justify;
  position: relative;
}
.compact-content p { margin: 0 0 0.5em; line-height: 1.375; break-inside: avoid; }
.compact-content strong { font-weight: 700; color: #000000; }
.compact-content ol { list-style: decimal; padding-left: 1rem; margin: 0 0 0.5em; }
.compact-content ul { list-style: disc; padding-left: 1rem; margin: 0 0 0.5em; }
.compact-content li { padding-left: 0.25rem; margin-bottom: 0.25em; }
.compact-content h1 {
  font-size: 1.4em; font-weight: 700; margin: 1em 0 0.5em;
  padding-bottom: 0.25em; border-bottom: 1px solid #cbd5e1;
}
.compact-content h2 { font-size: 1.2em; font-weight: 700; margin: 0.75em 0 0.5em; }
.compact-content h3 { font-size: 1em; font-weight: 700; margin: 0.5em 0 0.25em; }
.compact-content .math-display { display: block; text-align: center; margin: 0.25em 0; }
.stream-cursor {
  display: inline-block;
  width: 0.625rem;
  height: 1.25rem;
  margin-left: 0.25rem;
  background: #4f46e5;
  vertical-align: middle;
  animation: cursor-pulse 1s ease-in-out infinite;
}
@keyframes cursor-pulse { 50% { opacity: 0.3; } }
@media print {
  .no-print, .no-capture { display: none !important; }
  .a4-paper { margin: 0; }
}
"#;

// 公式排版失败（或 KaTeX 不可用）时退回显示带分隔符的原始文本
const TYPESET_SCRIPT: &str = r#"
(function () {
  var nodes = document.querySelectorAll('.math');
  for (var i = 0; i < nodes.length; i++) {
    var el = nodes[i];
    var tex = el.textContent;
    var display = el.classList.contains('math-display');
    try {
      if (typeof katex === 'undefined') { throw new Error('katex unavailable'); }
      katex.render(tex, el, { displayMode: display, throwOnError: true });
    } catch (e) {
      el.textContent = display ? '$$' + tex + '$$' : '$' + tex + '$';
      el.classList.add('math-error');
    }
  }
  document.body.setAttribute('data-typeset', 'done');
})();
"#;

/// 页面引用的外部资源
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAssets {
    pub katex_base_url: String,
}

/// 渲染结果
///
/// 内容只取决于文本，版面只取决于配置；同样的输入总是得到同样的结果。
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub content_html: String,
    pub config: RenderConfig,
    pub streaming: bool,
}

/// 渲染整份文档
///
/// 每次都从完整文本重新解析，不做增量更新。
pub fn render(markdown_text: &str, config: &RenderConfig, streaming: bool) -> RenderedDocument {
    RenderedDocument {
        content_html: markdown_to_html(markdown_text),
        config: *config,
        streaming,
    }
}

impl RenderedDocument {
    /// 试卷元素的内联样式
    pub fn paper_style(&self) -> String {
        format!(
            "font-size: {}px; column-count: {}; column-gap: {};",
            self.config.font_size_px(),
            self.config.column_count(),
            COLUMN_GAP
        )
    }

    /// 生成完整的 HTML 页面
    pub fn to_page_html(&self, assets: &PageAssets) -> String {
        let cursor = if self.streaming {
            format!(
                r#"<span class="{} {}" aria-hidden="true"></span>"#,
                STREAM_CURSOR_CLASS, NO_CAPTURE_CLASS
            )
        } else {
            String::new()
        };
        let katex = escape_html(assets.katex_base_url.trim_end_matches('/'));

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>ExamCraft Paper</title>
<link rel="stylesheet" href="{katex}/katex.min.css">
<style>{style}</style>
</head>
<body>
<div id="{id}" class="a4-paper compact-content" style="{paper_style}">
{content}{cursor}
</div>
<script src="{katex}/katex.min.js"></script>
<script>{typeset}</script>
</body>
</html>
"#,
            katex = katex,
            style = PAPER_STYLE,
            id = PAPER_ELEMENT_ID,
            paper_style = self.paper_style(),
            content = self.content_html,
            cursor = cursor,
            typeset = TYPESET_SCRIPT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> PageAssets {
        PageAssets {
            katex_base_url: "https://cdn.example/katex/".to_string(),
        }
    }

    #[test]
    fn test_render_is_pure() {
        let config = RenderConfig::new(11.0, 2).unwrap();
        let text = "**1.** What is $2+2$? **(A)** 3 **(B)** 4 **(C)** 5 **(D)** 6";
        let a = render(text, &config, false);
        let b = render(text, &config, false);
        assert_eq!(a, b);
        assert_eq!(a.to_page_html(&assets()), b.to_page_html(&assets()));
    }

    #[test]
    fn test_columns_change_layout_only() {
        let text = "# Title\n\n**1.** Question";
        let two = render(text, &RenderConfig::new(11.0, 2).unwrap(), false);
        let three = render(text, &RenderConfig::new(11.0, 3).unwrap(), false);

        assert_eq!(two.content_html, three.content_html);
        assert!(two.to_page_html(&assets()).contains("column-count: 2;"));
        assert!(three.to_page_html(&assets()).contains("column-count: 3;"));
    }

    #[test]
    fn test_font_size_and_gutter() {
        let doc = render("x", &RenderConfig::new(10.5, 1).unwrap(), false);
        assert_eq!(
            doc.paper_style(),
            "font-size: 10.5px; column-count: 1; column-gap: 10mm;"
        );
    }

    #[test]
    fn test_cursor_only_while_streaming() {
        let config = RenderConfig::default();
        let streaming = render("partial", &config, true).to_page_html(&assets());
        let done = render("partial", &config, false).to_page_html(&assets());

        assert!(streaming.contains(r#"class="stream-cursor no-capture""#));
        assert!(!done.contains(r#"class="stream-cursor"#));
    }

    #[test]
    fn test_print_styles_hide_capture_excluded() {
        let page = render("x", &RenderConfig::default(), true).to_page_html(&assets());
        let print_rules = page
            .split("@media print")
            .nth(1)
            .expect("应该有打印样式");
        assert!(print_rules.contains(".no-capture { display: none !important; }")
            || print_rules.contains(".no-print, .no-capture { display: none !important; }"));
    }

    #[test]
    fn test_empty_text_renders_empty_sheet() {
        let doc = render("", &RenderConfig::default(), false);
        assert!(doc.content_html.is_empty());
        let page = doc.to_page_html(&assets());
        assert!(page.contains(r#"<div id="paper" class="a4-paper compact-content""#));
    }

    #[test]
    fn test_katex_assets_linked() {
        let page = render("$x$", &RenderConfig::default(), false).to_page_html(&assets());
        assert!(page.contains(r#"href="https://cdn.example/katex/katex.min.css""#));
        assert!(page.contains(r#"src="https://cdn.example/katex/katex.min.js""#));
    }
}
