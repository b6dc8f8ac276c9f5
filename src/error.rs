use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum XrandrError {
    /// A token or line that does not match its grammar.
    #[error("Expected {expected}, got {input:?}")]
    Format {
        expected: &'static str,
        input: String,
    },
    /// A monitor header or mode line met before any screen header. This is a
    /// structural format error; it carries the 1-based line number.
    #[error("Line {line} appears outside of any screen: {input:?}")]
    Orphan { line: usize, input: String },
    #[error("Monitor has no current mode")]
    NoCurrentMode,
    #[error("Monitor reports a physical width of zero")]
    ZeroPhysicalWidth,
}

impl XrandrError {
    /// True for every grammar or structure failure raised while parsing.
    pub fn is_format(&self) -> bool {
        matches!(self, XrandrError::Format { .. } | XrandrError::Orphan { .. })
    }

    pub(crate) fn format(expected: &'static str, input: &str) -> XrandrError {
        XrandrError::Format {
            expected,
            input: input.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, XrandrError>;
