//! Conversion options.

/// Options for upgrading legacy layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeOptions {
    /// Convert list bounds (`x`, `y`, `width`, `height`) to numbers.
    ///
    /// When off, the bounds keep the decimal text found in the legacy
    /// markup. The command line tool turns this on.
    pub numeric_list_bounds: bool,
}

impl UpgradeOptions {
    /// Create new upgrade options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable numeric list bounds.
    pub fn with_numeric_list_bounds(mut self, numeric: bool) -> Self {
        self.numeric_list_bounds = numeric;
        self
    }
}
