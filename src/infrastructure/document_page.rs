//! 文档页面 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"显示文档"和"执行 JS"的能力

use std::time::Duration;

use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::error::BrowserError;
use crate::render::{PageAssets, RenderedDocument};

const TYPESET_POLL_INTERVAL: Duration = Duration::from_millis(100);
const SCROLL_TO_BOTTOM_JS: &str =
    "window.scrollTo(0, document.body.scrollHeight); window.scrollY";
const TYPESET_DONE_JS: &str =
    "document.body !== null && document.body.getAttribute('data-typeset') === 'done'";

/// 文档页面
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 把渲染结果整页替换进去，并等待公式排版结束
/// - 暴露 eval() 能力
/// - 不认识生成会话，也不处理导出流程
pub struct DocumentPage {
    page: Page,
    typeset_timeout: Duration,
}

impl DocumentPage {
    pub fn new(page: Page, typeset_timeout: Duration) -> Self {
        Self {
            page,
            typeset_timeout,
        }
    }

    /// 获取 page 的引用（用于截图、打印）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 显示一份渲染结果
    ///
    /// 整页替换，不做局部更新。排版超时不算错误，公式会保持原始文本。
    pub async fn show(
        &self,
        document: &RenderedDocument,
        assets: &PageAssets,
    ) -> Result<(), BrowserError> {
        let html = document.to_page_html(assets);
        debug!("更新页面内容: {} 字节", html.len());
        self.page
            .set_content(html)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(format!("更新页面失败: {}", e)))?;

        if !self.wait_typeset().await? {
            warn!(
                "公式排版在 {}ms 内未完成，继续使用当前页面",
                self.typeset_timeout.as_millis()
            );
        }
        Ok(())
    }

    /// 等待页面标记排版完成，超时返回 false
    pub async fn wait_typeset(&self) -> Result<bool, BrowserError> {
        let deadline = Instant::now() + self.typeset_timeout;
        loop {
            if self.eval_as::<bool>(TYPESET_DONE_JS).await? {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            sleep(TYPESET_POLL_INTERVAL).await;
        }
    }

    /// 滚动到文档末尾，返回滚动后的位置
    pub async fn scroll_to_bottom(&self) -> Result<f64, BrowserError> {
        self.eval_as::<f64>(SCROLL_TO_BOTTOM_JS).await
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue, BrowserError> {
        let result = self
            .page
            .evaluate(js_code.into())
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(format!("结果解析失败: {}", e)))
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(
        &self,
        js_code: impl Into<String>,
    ) -> Result<T, BrowserError> {
        let json_value = self.eval(js_code).await?;
        serde_json::from_value(json_value)
            .map_err(|e| BrowserError::ScriptExecutionFailed(format!("结果类型不匹配: {}", e)))
    }
}
