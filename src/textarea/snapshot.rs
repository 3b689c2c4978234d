use serde::{Deserialize, Serialize};

/// Point-in-time view of a text area, as consumed by renderers and callers
/// that want the final state after editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub content: String,
    pub cursor: usize,
    pub x: usize,
    pub y: usize,
    pub overwrite: bool,
}
