//! # Message Validator
//!
//! Structural and bounds validation of a parsed message before higher
//! layers trust it. Checks run in a fixed order and the first failure
//! wins; the outcome is a closed result set the caller reports upstream.

pub mod config;

pub use config::ValidationConfig;

use serde_json::Value;

/// Closed set of validation outcomes for one inbound message.
///
/// `RateLimitExceeded` is reserved for callers to report when the rate
/// limiter (a separate component) rejects; the validator itself never
/// produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationResult {
    /// Message passed all checks.
    Valid,
    /// Payload is not a JSON object.
    InvalidJson,
    /// The numeric `type` discriminator is missing.
    MissingRequiredField,
    /// A field is present with the wrong JSON type (strict mode only).
    InvalidFieldType,
    /// A value violates a bound (over-long string, over-deep nesting).
    InvalidFieldValue,
    /// Serialized size exceeds the configured maximum.
    MessageTooLarge,
    /// `from` or non-broadcast `dest` is outside the valid id range.
    InvalidNodeId,
    /// Reported by callers when the origin is over its rate budget.
    RateLimitExceeded,
}

impl ValidationResult {
    /// Stable human-readable description of the outcome.
    pub fn description(&self) -> &'static str {
        match self {
            ValidationResult::Valid => "message is valid",
            ValidationResult::InvalidJson => "payload is not a JSON object",
            ValidationResult::MissingRequiredField => "required field 'type' is missing",
            ValidationResult::InvalidFieldType => "field has wrong type",
            ValidationResult::InvalidFieldValue => "field value out of bounds",
            ValidationResult::MessageTooLarge => "message exceeds size limit",
            ValidationResult::InvalidNodeId => "node id outside valid range",
            ValidationResult::RateLimitExceeded => "origin exceeded message rate budget",
        }
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Outcome of inspecting one optional numeric field.
enum FieldCheck {
    Absent,
    Value(u64),
    WrongType,
}

/// Validates parsed messages against configured bounds.
///
/// Stateless apart from its configuration; safe to share by reference
/// within the cooperative context.
#[derive(Debug, Clone)]
pub struct MessageValidator {
    config: ValidationConfig,
}

impl MessageValidator {
    /// Create a validator with the given bounds.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a parsed message against all configured bounds.
    ///
    /// Check order (first failure wins):
    /// 1. wire size against `max_message_size`
    /// 2. numeric `type` discriminator present
    /// 3. `from` inside the valid id range, when present
    /// 4. non-zero `dest` inside the valid id range, when present
    ///    (zero is the broadcast destination and always allowed)
    /// 5. every string value, at any nesting level, within
    ///    `max_string_length`, and containers nested no deeper than
    ///    `max_nesting_depth` levels (the root object is level one)
    pub fn validate_message(&self, message: &Value, wire_size: usize) -> ValidationResult {
        if wire_size > self.config.max_message_size {
            return ValidationResult::MessageTooLarge;
        }

        let Some(fields) = message.as_object() else {
            return ValidationResult::InvalidJson;
        };

        match self.numeric_field(fields, "type") {
            FieldCheck::Value(_) => {}
            FieldCheck::Absent => return ValidationResult::MissingRequiredField,
            FieldCheck::WrongType => return ValidationResult::InvalidFieldType,
        }

        match self.numeric_field(fields, "from") {
            FieldCheck::Absent => {}
            FieldCheck::WrongType => return ValidationResult::InvalidFieldType,
            FieldCheck::Value(id) => {
                if !self.is_valid_wide_id(id) {
                    return ValidationResult::InvalidNodeId;
                }
            }
        }

        match self.numeric_field(fields, "dest") {
            FieldCheck::Absent | FieldCheck::Value(0) => {}
            FieldCheck::WrongType => return ValidationResult::InvalidFieldType,
            FieldCheck::Value(id) => {
                if !self.is_valid_wide_id(id) {
                    return ValidationResult::InvalidNodeId;
                }
            }
        }

        if let Some(failure) = self.check_value_bounds(message, 1) {
            return failure;
        }

        ValidationResult::Valid
    }

    /// Whether `id` falls inside the configured node-id range.
    pub fn is_valid_node_id(&self, id: u32) -> bool {
        (self.config.min_node_id..=self.config.max_node_id).contains(&id)
    }

    /// Stable human-readable text for a validation outcome.
    pub fn get_error_message(&self, result: ValidationResult) -> &'static str {
        result.description()
    }

    /// Range check over the wire-width (u64) value, so ids that do not
    /// even fit a node id are out of range rather than silently
    /// truncated.
    fn is_valid_wide_id(&self, id: u64) -> bool {
        u32::try_from(id).is_ok_and(|id| self.is_valid_node_id(id))
    }

    /// Depth-first walk enforcing the value bounds of check (5): every
    /// string within `max_string_length` and containers nested no
    /// deeper than `max_nesting_depth`. A string buried inside a
    /// sub-object or array is bounded the same as a top-level one.
    fn check_value_bounds(&self, value: &Value, depth: usize) -> Option<ValidationResult> {
        match value {
            Value::String(s) if s.len() > self.config.max_string_length => {
                Some(ValidationResult::InvalidFieldValue)
            }
            Value::Object(_) | Value::Array(_) if depth > self.config.max_nesting_depth => {
                Some(ValidationResult::InvalidFieldValue)
            }
            Value::Object(fields) => fields
                .values()
                .find_map(|v| self.check_value_bounds(v, depth + 1)),
            Value::Array(items) => items
                .iter()
                .find_map(|v| self.check_value_bounds(v, depth + 1)),
            _ => None,
        }
    }

    /// Look up an optional unsigned-integer field. In tolerant mode a
    /// wrongly-typed field is treated as absent.
    fn numeric_field(&self, fields: &serde_json::Map<String, Value>, name: &str) -> FieldCheck {
        match fields.get(name) {
            None => FieldCheck::Absent,
            Some(value) => match value.as_u64() {
                Some(id) => FieldCheck::Value(id),
                None if self.config.strict_type_checking => FieldCheck::WrongType,
                None => FieldCheck::Absent,
            },
        }
    }
}
