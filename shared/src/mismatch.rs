/// How one side of the protocol reacts to kinds and tags it does not know.
///
/// Unknown values usually mean the two sides were generated from different
/// schema versions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MismatchPolicy {
    /// Fail the operation, naming the unknown value.
    #[default]
    Strict,
    /// Log the unknown value and skip the operation.
    Tolerant,
}
