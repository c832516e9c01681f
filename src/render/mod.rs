//! 文档渲染
//!
//! 从（文本，排版配置）到页面的纯函数，每次更新都整体重新渲染。

pub mod layout;
pub mod markdown;

pub use layout::{render, PageAssets, RenderedDocument, NO_CAPTURE_CLASS, PAPER_ELEMENT_ID};
pub use markdown::markdown_to_html;
