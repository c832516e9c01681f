//! 图片导出
//!
//! 对整张试卷（不只是可见部分）做 2 倍分辨率截图。
//! 截图前隐藏 `.no-capture` 元素，结束后无论成败都恢复。

use std::path::{Path, PathBuf};

use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, Viewport};
use chromiumoxide::page::ScreenshotParams;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::CaptureError;
use crate::export::file_name::export_path;
use crate::infrastructure::DocumentPage;
use crate::render::{NO_CAPTURE_CLASS, PAPER_ELEMENT_ID};

/// 截图分辨率倍数
pub const CAPTURE_SCALE: f64 = 2.0;

const CAPTURE_STYLE_ID: &str = "examcraft-capture-style";

/// 试卷元素在文档中的位置和完整尺寸
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PaperBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PaperBounds {
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    fn to_clip(self) -> Viewport {
        Viewport {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            scale: CAPTURE_SCALE,
        }
    }
}

pub struct SnapshotExporter<'a> {
    page: &'a DocumentPage,
}

impl<'a> SnapshotExporter<'a> {
    pub fn new(page: &'a DocumentPage) -> Self {
        Self { page }
    }

    /// 截取整张试卷并写成 PNG
    pub async fn capture(&self, dir: &Path, prefix: &str) -> Result<PathBuf, CaptureError> {
        self.set_capture_mode(true)
            .await
            .map_err(|e| CaptureError::Rasterize(e.to_string()))?;
        let result = self.rasterize().await;
        if let Err(e) = self.set_capture_mode(false).await {
            warn!("恢复页面状态失败: {}", e);
        }
        let bytes = result?;

        let path = export_path(dir, prefix, "png");
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| CaptureError::Write {
                path: path.display().to_string(),
                source,
            })?;
        info!("✓ 已导出图片: {}", path.display());
        Ok(path)
    }

    /// 测量试卷的完整尺寸（包括超出视口的部分）
    pub async fn measure(&self) -> Result<PaperBounds, CaptureError> {
        let js = format!(
            r#"(function () {{
  var el = document.getElementById('{id}');
  if (!el) {{ return null; }}
  var r = el.getBoundingClientRect();
  return {{
    x: r.left + window.scrollX,
    y: r.top + window.scrollY,
    width: Math.max(r.width, el.scrollWidth),
    height: Math.max(r.height, el.scrollHeight)
  }};
}})()"#,
            id = PAPER_ELEMENT_ID
        );
        let bounds: Option<PaperBounds> = self
            .page
            .eval_as(js)
            .await
            .map_err(|e| CaptureError::Measure(e.to_string()))?;

        match bounds {
            Some(b) if !b.is_empty() => Ok(b),
            Some(b) => Err(CaptureError::Measure(format!(
                "试卷尺寸为空: {}x{}",
                b.width, b.height
            ))),
            None => Err(CaptureError::Measure("找不到试卷元素".to_string())),
        }
    }

    async fn rasterize(&self) -> Result<Vec<u8>, CaptureError> {
        let bounds = self.measure().await?;
        debug!("试卷尺寸: {:?}", bounds);

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .clip(bounds.to_clip())
            .capture_beyond_viewport(true)
            .omit_background(false)
            .build();
        self.page
            .page()
            .screenshot(params)
            .await
            .map_err(|e| CaptureError::Rasterize(e.to_string()))
    }

    async fn set_capture_mode(&self, on: bool) -> Result<(), crate::error::BrowserError> {
        let js = if on {
            format!(
                r#"(function () {{
  if (!document.getElementById('{id}')) {{
    var s = document.createElement('style');
    s.id = '{id}';
    s.textContent = '.{class} {{ display: none !important; }}';
    document.head.appendChild(s);
  }}
  return true;
}})()"#,
                id = CAPTURE_STYLE_ID,
                class = NO_CAPTURE_CLASS
            )
        } else {
            format!(
                r#"(function () {{
  var s = document.getElementById('{id}');
  if (s) {{ s.remove(); }}
  return true;
}})()"#,
                id = CAPTURE_STYLE_ID
            )
        };
        self.page.eval(js).await.map(|_| ())
    }
}
