/// Which variant of a chain a node belongs to
///
/// Both variants default to propagating absence on failure. A `*_handled` step
/// yields a `Handled` node; other steps keep the mode of the node they start
/// from. The mode is part of a node's cache identity, so the two variants
/// never hand out each other's nodes.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default)]
pub enum RecoveryMode {
    #[default]
    Unhandled,
    Handled,
}

impl RecoveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryMode::Unhandled => "unhandled",
            RecoveryMode::Handled => "handled",
        }
    }
}

impl std::fmt::Display for RecoveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
