use std::fmt;

/// Identifies the partition of the event stream being processed.
///
/// Dispatch passes it through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub id: u32,
    pub mask: u32,
}

impl Segment {
    /// The single segment covering the whole stream
    pub const ROOT: Segment = Segment { id: 0, mask: 0 };

    pub const fn new(id: u32, mask: u32) -> Self {
        Self { id, mask }
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::ROOT
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment[{}/{}]", self.id, self.mask)
    }
}
