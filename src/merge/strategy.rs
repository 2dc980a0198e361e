#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Keep servers that are already configured
    #[default]
    PreserveExisting,
    /// Replace configured servers with the registry definition
    Overwrite,
}

impl MergeStrategy {
    /// `--force` selects [`MergeStrategy::Overwrite`].
    pub const fn from_force(force: bool) -> Self {
        if force {
            Self::Overwrite
        } else {
            Self::PreserveExisting
        }
    }
}
