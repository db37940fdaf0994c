//! Validator configuration.

use serde::{Deserialize, Serialize};

/// Bounds applied to every parsed message before it is trusted.
///
/// Constructed once at subsystem start; may be swapped wholesale but is
/// never mutated field-by-field while validation calls are in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum serialized message size in bytes.
    pub max_message_size: usize,
    /// Maximum length of any string-valued field, in bytes.
    pub max_string_length: usize,
    /// Smallest valid node id (inclusive). Id `0` stays reserved for
    /// broadcast destinations.
    pub min_node_id: u32,
    /// Largest valid node id (inclusive).
    pub max_node_id: u32,
    /// Maximum container nesting depth, counting the root object as
    /// level one. Deeper messages are rejected as `InvalidFieldValue`.
    pub max_nesting_depth: usize,
    /// When set, a field of the wrong JSON type is rejected as
    /// `InvalidFieldType`; when clear, the field is treated as absent.
    pub strict_type_checking: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_message_size: 8_192,
            max_string_length: 1_024,
            min_node_id: 1,
            max_node_id: u32::MAX,
            max_nesting_depth: 10,
            strict_type_checking: true,
        }
    }
}

impl ValidationConfig {
    /// Tight bounds for fast, deterministic tests.
    pub fn for_testing() -> Self {
        Self {
            max_message_size: 256,
            max_string_length: 16,
            min_node_id: 1,
            max_node_id: 1_000,
            max_nesting_depth: 4,
            strict_type_checking: true,
        }
    }
}
