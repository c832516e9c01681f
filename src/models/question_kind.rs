use std::str::FromStr;

use crate::error::ConfigError;

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// 客观题（选择题）
    #[default]
    Objective,
    /// 主观题（简答）
    Subjective,
    /// 混合
    Mixed,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 3] = [
        QuestionKind::Objective,
        QuestionKind::Subjective,
        QuestionKind::Mixed,
    ];

    /// 写进提示词的完整标签
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Objective => "Objective (MCQ)",
            QuestionKind::Subjective => "Subjective (Long Answer)",
            QuestionKind::Mixed => "Mixed (Objective & Subjective)",
        }
    }

    /// 命令行里使用的短名称
    pub fn short_name(self) -> &'static str {
        match self {
            QuestionKind::Objective => "objective",
            QuestionKind::Subjective => "subjective",
            QuestionKind::Mixed => "mixed",
        }
    }
}

impl FromStr for QuestionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "objective" | "mcq" | "obj" => Ok(QuestionKind::Objective),
            "subjective" | "long" | "subj" => Ok(QuestionKind::Subjective),
            "mixed" | "mix" => Ok(QuestionKind::Mixed),
            _ => QuestionKind::ALL
                .into_iter()
                .find(|kind| kind.label().eq_ignore_ascii_case(s.trim()))
                .ok_or_else(|| ConfigError::UnknownValue {
                    name: "question kind",
                    value: s.to_string(),
                }),
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_names() {
        assert_eq!("objective".parse::<QuestionKind>().unwrap(), QuestionKind::Objective);
        assert_eq!("Subjective".parse::<QuestionKind>().unwrap(), QuestionKind::Subjective);
        assert_eq!(" mixed ".parse::<QuestionKind>().unwrap(), QuestionKind::Mixed);
    }

    #[test]
    fn test_parse_full_label() {
        assert_eq!(
            "Mixed (Objective & Subjective)".parse::<QuestionKind>().unwrap(),
            QuestionKind::Mixed
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert!("essay".parse::<QuestionKind>().is_err());
    }
}
