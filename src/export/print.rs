//! 打印导出
//!
//! 走浏览器的打印流程：只保留纸面，`.no-print` 和 `.no-capture` 由打印样式隐藏，
//! 纸张大小由页面的 `@page` 规则决定。

use std::path::{Path, PathBuf};

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use tracing::{debug, info};

use crate::error::{AppError, BrowserError, FileError};
use crate::export::file_name::export_path;
use crate::infrastructure::DocumentPage;

pub struct PrintExporter<'a> {
    page: &'a DocumentPage,
}

impl<'a> PrintExporter<'a> {
    pub fn new(page: &'a DocumentPage) -> Self {
        Self { page }
    }

    /// 打印当前页面为 PDF，返回写入的路径
    pub async fn print(&self, dir: &Path, prefix: &str) -> Result<PathBuf, AppError> {
        let params = PrintToPdfParams {
            print_background: Some(true),
            prefer_css_page_size: Some(true),
            ..Default::default()
        };
        let bytes = self
            .page
            .page()
            .pdf(params)
            .await
            .map_err(|e| BrowserError::PrintFailed(e.to_string()))?;
        debug!("PDF 大小: {} 字节", bytes.len());

        let path = export_path(dir, prefix, "pdf");
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| FileError::write_failed(path.display().to_string(), e))?;
        info!("✓ 已打印 PDF: {}", path.display());
        Ok(path)
    }
}
