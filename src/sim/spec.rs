use crate::core::state::Tick;

/// Creation parameters for one synthetic process. Identity (id/index) is
/// derived from admission order, not supplied here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub burst: Tick,
    pub priority: u32,
    pub arrival: Tick,
}
