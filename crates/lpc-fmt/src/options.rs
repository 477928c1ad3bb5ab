use serde::Deserialize;

/// Array names that always print two elements per line.
const BUILTIN_PAIR_VARIABLES: [&str; 2] = ["dest_dir", "items"];

/// Layout settings. Missing keys take their defaults and unknown keys are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    pub print_width: usize,
    pub tab_width: usize,
    pub use_tabs: bool,
    /// Emit a trailing `,` in arrays and mappings that break over lines.
    pub trailing_comma: bool,
    /// Extra array names that use pair layout, on top of `dest_dir` and
    /// `items`.
    pub pair_variables: Vec<String>,
    pub condense_single_statement_blocks: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            print_width: 80,
            tab_width: 2,
            use_tabs: false,
            trailing_comma: false,
            pair_variables: Vec::new(),
            condense_single_statement_blocks: true,
        }
    }
}

impl FormatOptions {
    pub fn is_pair_variable(&self, name: &str) -> bool {
        BUILTIN_PAIR_VARIABLES.contains(&name) || self.pair_variables.iter().any(|var| var == name)
    }
}
