use std::fmt;

/// API Key
///
/// 只保存在本次运行的内存里，原样交给生成服务。Debug/Display 都不输出内容。
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Credential(<empty>)")
        } else {
            write!(f, "Credential(<redacted>)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::new("AIzaSecretValue");
        let printed = format!("{:?}", credential);
        assert!(!printed.contains("AIzaSecretValue"));
        assert_eq!(credential.expose(), "AIzaSecretValue");
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        assert!(Credential::new("   ").is_empty());
        assert!(Credential::default().is_empty());
    }
}
