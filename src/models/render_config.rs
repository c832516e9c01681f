use crate::error::ConfigError;

pub const MIN_FONT_SIZE_PX: f32 = 8.0;
pub const MAX_FONT_SIZE_PX: f32 = 16.0;
pub const MIN_COLUMNS: u8 = 1;
pub const MAX_COLUMNS: u8 = 3;

/// 排版配置（字号、分栏），随时可改，不影响生成会话
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    font_size_px: f32,
    column_count: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size_px: 11.0,
            column_count: 2,
        }
    }
}

impl RenderConfig {
    /// 字号 8–16（步长 0.5），分栏 1–3
    pub fn new(font_size_px: f32, column_count: u8) -> Result<Self, ConfigError> {
        let on_half_step = (font_size_px * 2.0).fract() == 0.0;
        if !(MIN_FONT_SIZE_PX..=MAX_FONT_SIZE_PX).contains(&font_size_px) || !on_half_step {
            return Err(ConfigError::OutOfRange {
                name: "font size",
                value: font_size_px.to_string(),
                allowed: "8-16, step 0.5",
            });
        }
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&column_count) {
            return Err(ConfigError::OutOfRange {
                name: "column count",
                value: column_count.to_string(),
                allowed: "1, 2 or 3",
            });
        }
        Ok(Self {
            font_size_px,
            column_count,
        })
    }

    pub fn font_size_px(&self) -> f32 {
        self.font_size_px
    }

    pub fn column_count(&self) -> u8 {
        self.column_count
    }
}
