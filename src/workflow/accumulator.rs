//! 累加器
//!
//! 持有唯一一个不断增长的文本：按顺序把每个片段原样追加进去，
//! 每追加一次就把完整文本交给渲染回调。
//! 失败时把错误块追加到已有内容之后，已生成的部分不丢弃。

use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::clients::FragmentStream;
use crate::error::ServiceError;
use crate::models::{GenerationSession, SessionStatus};
use crate::workflow::failure;

/// 累加器
///
/// 生成期间独占会话；片段严格按到达顺序消费，不会交错追加。
pub struct Accumulator<'a> {
    session: &'a mut GenerationSession,
}

impl<'a> Accumulator<'a> {
    pub fn new(session: &'a mut GenerationSession) -> Self {
        Self { session }
    }

    /// 消费整个片段流，返回会话的最终状态
    ///
    /// # 参数
    /// - `opened`: 发起调用的结果（调用本身可能已失败）
    /// - `attempted_model`: 本次使用的模型，用于错误提示
    /// - `on_update`: 每次文本变化后调用，参数是完整会话
    pub async fn consume<F>(
        &mut self,
        opened: Result<FragmentStream, ServiceError>,
        attempted_model: &str,
        mut on_update: F,
    ) -> SessionStatus
    where
        F: FnMut(&GenerationSession),
    {
        if !self.session.is_streaming() {
            self.session.begin();
        }

        let mut stream = match opened {
            Ok(stream) => stream,
            Err(e) => {
                self.fail(&e, attempted_model, &mut on_update);
                return self.session.status();
            }
        };

        let mut fragment_count = 0usize;
        while let Some(item) = stream.next().await {
            match item {
                Ok(fragment) => {
                    fragment_count += 1;
                    self.session.append(&fragment);
                    on_update(&*self.session);
                }
                Err(e) => {
                    warn!("片段流在第 {} 个片段后中断", fragment_count);
                    self.fail(&e, attempted_model, &mut on_update);
                    return self.session.status();
                }
            }
        }

        self.session.finish();
        on_update(&*self.session);
        info!(
            "✓ 生成完成: {} 个片段，{} 字符",
            fragment_count,
            self.session.text().chars().count()
        );
        self.session.status()
    }

    fn fail<F>(&mut self, error: &ServiceError, attempted_model: &str, on_update: &mut F)
    where
        F: FnMut(&GenerationSession),
    {
        let kind = failure::classify(error);
        warn!("生成失败 ({:?}): {}", kind, error);
        debug!("错误详情: status={:?}, code={:?}", error.status, error.code);
        self.session.fail(failure::failure_message(kind, attempted_model));
        on_update(&*self.session);
    }
}
