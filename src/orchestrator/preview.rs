//! 实时预览
//!
//! 生成过程中每次文本变化都发送一帧；预览任务只渲染最新的一帧，
//! 来不及显示的中间帧直接跳过，文本本身不受影响。

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::infrastructure::DocumentPage;
use crate::models::RenderConfig;
use crate::render::{render, PageAssets};

/// 一帧预览：完整文本 + 是否仍在生成
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewFrame {
    pub text: String,
    pub streaming: bool,
}

impl PreviewFrame {
    /// 生成中保持页面停在末尾，跟随新内容
    pub fn follows_tail(&self) -> bool {
        self.streaming
    }
}

/// 启动预览任务，发送端全部丢弃后任务结束
pub fn spawn_preview(
    page: DocumentPage,
    config: RenderConfig,
    assets: PageAssets,
    mut frames: watch::Receiver<PreviewFrame>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut shown = 0usize;
        while frames.changed().await.is_ok() {
            let frame = frames.borrow_and_update().clone();
            let document = render(&frame.text, &config, frame.streaming);
            if let Err(e) = page.show(&document, &assets).await {
                warn!("预览更新失败: {}", e);
                continue;
            }
            if frame.follows_tail() {
                if let Err(e) = page.scroll_to_bottom().await {
                    debug!("预览滚动失败: {}", e);
                }
            }
            shown += 1;
        }
        debug!("预览任务结束，共显示 {} 帧", shown);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follows_tail_only_while_streaming() {
        let streaming = PreviewFrame {
            text: "**1.** partial".to_string(),
            streaming: true,
        };
        let done = PreviewFrame {
            streaming: false,
            ..streaming.clone()
        };
        assert!(streaming.follows_tail());
        assert!(!done.follows_tail());
        assert!(!PreviewFrame::default().follows_tail());
    }
}
