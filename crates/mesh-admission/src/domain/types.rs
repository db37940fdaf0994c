//! Core value types for message admission.

use std::fmt;

/// Identifier of a mesh node.
///
/// Node id `0` is reserved for broadcast destinations and is never a
/// valid origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Reserved broadcast destination.
    pub const BROADCAST: NodeId = NodeId(0);

    /// Create a new node id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Whether this id is the reserved broadcast destination.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Network-wide identity of one message instance.
///
/// The `(msg_id, origin)` pair uniquely identifies a message for
/// deduplication. The derived ordering (field order: `msg_id`, then
/// `origin`) exists only to make tracker iteration deterministic; it
/// carries no protocol meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageKey {
    /// Per-origin message sequence id.
    pub msg_id: u32,
    /// Node that originally emitted the message.
    pub origin: NodeId,
}

impl MessageKey {
    /// Create a new message key.
    pub fn new(msg_id: u32, origin: NodeId) -> Self {
        Self { msg_id, origin }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.msg_id, self.origin)
    }
}

/// Monotonic millisecond timestamp on a 32-bit counter.
///
/// The counter wraps roughly every 49.7 days. All age computations go
/// through [`Timestamp::age_since`], which is correct across one full
/// wrap, so components never compare raw counter values directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp(u32);

impl Timestamp {
    /// Create a timestamp from a raw millisecond counter value.
    pub const fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    /// Get the raw counter value.
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, assuming at most one
    /// counter wrap in between.
    ///
    /// Wrapping subtraction computes `self - earlier` when no wrap
    /// occurred and `(u32::MAX - earlier) + self + 1` when the counter
    /// wrapped once, which is exactly the elapsed time in both cases.
    pub fn age_since(self, earlier: Timestamp) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// The timestamp `ms` milliseconds after this one, wrapping at the
    /// counter boundary.
    pub fn wrapping_add_millis(self, ms: u32) -> Timestamp {
        Self(self.0.wrapping_add(ms))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
