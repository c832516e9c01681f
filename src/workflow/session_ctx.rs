//! 会话上下文
//!
//! 封装"这次运行用哪个凭证、当前会话是什么"这一信息。
//! 由顶层控制器持有，以引用的方式交给生成流程，不使用全局状态。

use std::fmt::Display;

use crate::models::{Credential, GenerationSession};

/// 会话上下文
#[derive(Debug, Default)]
pub struct SessionContext {
    /// API Key，只在内存中
    pub credential: Credential,

    /// 当前（或最近一次）生成会话
    pub session: GenerationSession,
}

impl SessionContext {
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            session: GenerationSession::new(),
        }
    }
}

impl Display for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[会话 状态#{:?} 字符#{}]",
            self.session.status(),
            self.session.text().chars().count()
        )
    }
}
