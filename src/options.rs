use serde::{Deserialize, Serialize};

/// How the encoded body is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineLayout {
    /// A line break follows the code of every `'\n'` in the source, so the body
    /// has the same line structure as the source.
    #[default]
    PreserveLines,
    /// One unbroken run of bit characters.
    SingleLine,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub layout: LineLayout,
}

impl EncodeOptions {
    pub fn single_line() -> Self {
        Self {
            layout: LineLayout::SingleLine,
        }
    }
}
