//! 生成会话
//!
//! 一次生成从提交到完成（或失败）的生命周期。只在 Streaming 状态下可追加，
//! 结束后冻结。

use tracing::warn;

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Streaming,
    Done,
    Failed,
}

/// 生成会话
#[derive(Debug, Clone, Default)]
pub struct GenerationSession {
    status: SessionStatus,
    accumulated_text: String,
    error_message: Option<String>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn text(&self) -> &str {
        &self.accumulated_text
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_streaming(&self) -> bool {
        self.status == SessionStatus::Streaming
    }

    /// 开始新的生成：清空上一次的内容
    pub fn begin(&mut self) {
        self.status = SessionStatus::Streaming;
        self.accumulated_text.clear();
        self.error_message = None;
    }

    /// 原样追加一个片段，返回是否生效
    pub fn append(&mut self, fragment: &str) -> bool {
        if !self.is_streaming() {
            warn!("会话状态为 {:?}，忽略追加的片段", self.status);
            return false;
        }
        self.accumulated_text.push_str(fragment);
        true
    }

    pub fn finish(&mut self) {
        if self.is_streaming() {
            self.status = SessionStatus::Done;
        }
    }

    /// 标记失败：把错误块追加到已有内容之后，已生成的部分保留
    pub fn fail(&mut self, message: impl Into<String>) {
        if !self.is_streaming() {
            warn!("会话状态为 {:?}，忽略失败标记", self.status);
            return;
        }
        let message = message.into();
        if !self.accumulated_text.is_empty() {
            self.accumulated_text.push_str("\n\n");
        }
        self.accumulated_text.push_str(&message);
        self.error_message = Some(message);
        self.status = SessionStatus::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_only_while_streaming() {
        let mut session = GenerationSession::new();
        assert!(!session.append("early"));
        assert_eq!(session.text(), "");

        session.begin();
        assert!(session.append("A"));
        assert!(session.append("B"));
        session.finish();
        assert!(!session.append("late"));
        assert_eq!(session.text(), "AB");
        assert_eq!(session.status(), SessionStatus::Done);
    }

    #[test]
    fn test_fail_keeps_partial_output() {
        let mut session = GenerationSession::new();
        session.begin();
        session.append("**1.** Partial");
        session.fail("oops");
        assert_eq!(session.text(), "**1.** Partial\n\noops");
        assert_eq!(session.error_message(), Some("oops"));
        assert_eq!(session.status(), SessionStatus::Failed);
    }

    #[test]
    fn test_fail_without_output_is_message_only() {
        let mut session = GenerationSession::new();
        session.begin();
        session.fail("oops");
        assert_eq!(session.text(), "oops");
    }

    #[test]
    fn test_begin_clears_previous_session() {
        let mut session = GenerationSession::new();
        session.begin();
        session.append("old");
        session.fail("bad");
        session.begin();
        assert_eq!(session.text(), "");
        assert_eq!(session.error_message(), None);
        assert!(session.is_streaming());
    }
}
