//! Configuration options for Markdown rendering

/// Options for Markdown rendering.
///
/// The defaults produce the canonical output: `-` bullets, `*` emphasis,
/// `**` strong, backtick code spans and ```` ``` ```` fences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Emphasis delimiter (italic mark)
    pub em_delimiter: char,

    /// Strong delimiter (bold mark)
    pub strong_delimiter: String,

    /// Code span delimiter (code mark)
    pub code_delimiter: char,

    /// Fence string for code blocks
    pub fence: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            bullet_list_marker: '-',
            em_delimiter: '*',
            strong_delimiter: "**".to_string(),
            code_delimiter: '`',
            fence: "```".to_string(),
        }
    }
}
