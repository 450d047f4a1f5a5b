/// Outcome of a frame render as seen by the CPU
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NmiStatus {
    Active,
    Inactive,
}

impl NmiStatus {
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}
