//! 生成流程 - 流程层
//!
//! 核心职责：定义"一次生成"的完整处理流程
//!
//! 流程顺序：
//! 1. 前置条件检查（凭证、主题/附件），不满足则直接返回，不碰文档
//! 2. 开始新会话（清空上一次的内容）
//! 3. 发起流式调用 → 累加器逐片段追加并通知渲染
//! 4. 失败时错误块追加到文档末尾

use tracing::{error, info};

use crate::clients::GenerativeService;
use crate::error::{AppError, PreconditionError};
use crate::models::{GenerationRequest, GenerationSession, SessionStatus};
use crate::services::GenerationClient;
use crate::workflow::accumulator::Accumulator;
use crate::workflow::session_ctx::SessionContext;

/// 生成流程
///
/// - 不持有会话，会话由调用方的 `SessionContext` 持有
/// - 只依赖业务能力（GenerationClient）
pub struct GenerationFlow<S> {
    client: GenerationClient<S>,
}

impl<S: GenerativeService> GenerationFlow<S> {
    pub fn new(service: S) -> Self {
        Self {
            client: GenerationClient::new(service),
        }
    }

    pub fn client(&self) -> &GenerationClient<S> {
        &self.client
    }

    /// 检查前置条件
    pub fn check_preconditions(
        ctx: &SessionContext,
        request: &GenerationRequest,
    ) -> Result<(), PreconditionError> {
        if ctx.credential.is_empty() {
            return Err(PreconditionError::MissingCredential);
        }
        if request.has_no_source() {
            return Err(PreconditionError::MissingSource);
        }
        Ok(())
    }

    /// 运行一次生成
    ///
    /// 前置条件错误以 `Err` 返回；服务错误不会返回 `Err`，
    /// 而是写进文档，会话状态为 `Failed`。
    pub async fn run<F>(
        &self,
        ctx: &mut SessionContext,
        request: &GenerationRequest,
        on_update: F,
    ) -> Result<SessionStatus, AppError>
    where
        F: FnMut(&GenerationSession),
    {
        Self::check_preconditions(ctx, request)?;

        let model = self.client.model_for(request);
        ctx.session.begin();
        info!("🚀 开始生成 {}", ctx);

        let opened = match self.client.stream(&ctx.credential, request).await {
            Ok(stream) => Ok(stream),
            Err(AppError::Service(e)) => Err(e),
            Err(other) => {
                error!("无法开始生成: {}", other);
                return Err(other);
            }
        };

        let status = Accumulator::new(&mut ctx.session)
            .consume(opened, &model, on_update)
            .await;

        info!("生成结束 {}", ctx);
        Ok(status)
    }
}
