//! Enum metadata and the enum codec.
//!
//! An [`EnumDescription`] is the declarative description of one enum type:
//! its members, their numeric values, display names and documentation, and
//! whether the enum is a bitmask whose members combine with OR. The codec
//! side lives here too: [`EnumDescription::parse`] converts heterogeneous
//! raw values (numbers, names, separated strings, lists) into the canonical
//! `i32`, and [`EnumDescription::display_value`] resolves a numeric value
//! back into its human-oriented form.

use crate::access::Value;
use crate::{Error, Result};

/// Metadata for a single enum member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumMeta {
    /// Numeric value of the member. Unique within a non-bitmask enum;
    /// a single bit within a bitmask enum (aggregate members excepted).
    pub value: i32,
    /// Declared member name, e.g. `EC2Instance`.
    pub name: String,
    /// Fully qualified member name, e.g. `es.ResourceType.EC2Instance`.
    pub full_name: String,
    /// Human-oriented display text. Populated by the generation stage,
    /// either from an explicit annotation or derived from the name.
    pub display: String,
    /// Documentation text attached to the member.
    pub documentation: String,
    /// Optional ordered argument list attached to the member.
    pub args: Vec<String>,
}

impl EnumMeta {
    /// Creates a member with the given value and name.
    #[must_use]
    pub fn new(value: i32, name: &str) -> Self {
        EnumMeta {
            value,
            name: name.to_string(),
            ..EnumMeta::default()
        }
    }

    /// Sets the fully qualified name.
    #[must_use]
    pub fn full_name(mut self, full_name: &str) -> Self {
        self.full_name = full_name.to_string();
        self
    }

    /// Sets the display text.
    #[must_use]
    pub fn display(mut self, display: &str) -> Self {
        self.display = display.to_string();
        self
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn documentation(mut self, documentation: &str) -> Self {
        self.documentation = documentation.to_string();
        self
    }

    /// Sets the member argument list.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// The display text, falling back to the member name when empty.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.display.is_empty() {
            &self.name
        } else {
            &self.display
        }
    }
}

/// Declarative description of an enum type.
///
/// Members are kept sorted ascending by value, which fixes the scan order
/// used by token matching and bitmask decomposition.
#[derive(Debug, Clone, Default)]
pub struct EnumDescription {
    /// Short type name, e.g. `ResourceType`.
    pub name: String,
    /// Fully qualified type name, e.g. `es.ResourceType`.
    pub full_name: String,
    /// Whether members are independent bit flags combinable via OR.
    pub is_bitmask: bool,
    /// Documentation text attached to the enum type.
    pub documentation: String,
    /// Members, sorted ascending by value.
    pub enums: Vec<EnumMeta>,
}

impl EnumDescription {
    /// Creates an enum description from its members.
    ///
    /// Members are sorted ascending by value regardless of input order.
    #[must_use]
    pub fn new(name: &str, full_name: &str, is_bitmask: bool, mut enums: Vec<EnumMeta>) -> Self {
        enums.sort_by_key(|m| m.value);
        EnumDescription {
            name: name.to_string(),
            full_name: full_name.to_string(),
            is_bitmask,
            documentation: String::new(),
            enums,
        }
    }

    /// Looks up the member with the exact numeric value.
    #[must_use]
    pub fn find(&self, value: i32) -> Option<&EnumMeta> {
        self.enums.iter().find(|m| m.value == value)
    }

    /// Declared member names joined with `,`, for help and error text.
    #[must_use]
    pub fn supported_names(&self) -> String {
        self.enums
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Declared single-bit members set in `value`, in ascending value order.
    ///
    /// Aggregate members (an `All` member equal to the OR of the others)
    /// are never returned; they decompose into their constituent flags.
    #[must_use]
    pub fn flags(&self, value: i32) -> Vec<&EnumMeta> {
        self.enums
            .iter()
            .filter(|m| m.value > 0 && (m.value & (m.value - 1)) == 0 && value & m.value == m.value)
            .collect()
    }

    /// Parses a raw value into the canonical enum integer.
    ///
    /// Accepted shapes:
    /// - `None`: parses to 0
    /// - [`Value::Enum`]: the value already carries its numeric identity
    ///   and is passed through
    /// - signed/unsigned integers of 32/64-bit width: truncating cast
    /// - a single string: split on `,` if present, else on `|` if present,
    ///   else one token; tokens are trimmed, empty tokens skipped, and each
    ///   matched against member name, full name or display (case-sensitive,
    ///   exact), OR-ing the member value into the result. A non-bitmask
    ///   enum maps one token to exactly one member (first match wins)
    /// - a list of strings: per-element token matching, no splitting
    /// - a list of 32/64-bit integers: raw values OR-ed together
    ///
    /// # Errors
    ///
    /// Any other runtime shape returns [`Error::UnsupportedEnumSource`]
    /// rather than silently parsing to 0.
    pub fn parse(&self, source: Option<&Value>) -> Result<i32> {
        let Some(value) = source else {
            return Ok(0);
        };

        let mut res = 0i32;
        match value {
            Value::Enum(v) => return Ok(v.number),
            Value::Int32(v) => res = *v,
            Value::Int64(v) => res = *v as i32,
            Value::Uint32(v) => res = *v as i32,
            Value::Uint64(v) => res = *v as i32,
            Value::String(v) => {
                let tokens: Vec<&str> = if v.contains(',') {
                    v.split(',').collect()
                } else if v.contains('|') {
                    v.split('|').collect()
                } else {
                    vec![v.as_str()]
                };
                for token in tokens {
                    self.match_token(&mut res, token.trim());
                }
            }
            Value::List(items) => {
                for item in items {
                    match item {
                        Value::String(token) => self.match_token(&mut res, token.trim()),
                        Value::Int32(v) => res |= *v,
                        Value::Int64(v) => res |= *v as i32,
                        other => return Err(Error::UnsupportedEnumSource(other.kind_name())),
                    }
                }
            }
            other => return Err(Error::UnsupportedEnumSource(other.kind_name())),
        }

        Ok(res)
    }

    fn match_token(&self, res: &mut i32, token: &str) {
        if token.is_empty() {
            return;
        }
        for meta in &self.enums {
            if meta.name == token || meta.full_name == token || meta.display == token {
                *res |= meta.value;
                if !self.is_bitmask {
                    break;
                }
            }
        }
    }

    /// Resolves a numeric value into its display text.
    ///
    /// Non-bitmask enums resolve by exact member match; a value of 0 with no
    /// declared zero member resolves to `"Unknown"`, any other undeclared
    /// value to its decimal string. Bitmask enums decompose the value into
    /// declared single-bit flags and join their display texts with `,`.
    #[must_use]
    pub fn display_value(&self, value: i32) -> String {
        if self.is_bitmask {
            let flags = self.flags(value);
            match flags.len() {
                0 => self.exact_display(value),
                1 => flags[0].display_name().to_string(),
                _ => flags
                    .iter()
                    .map(|m| m.display_name())
                    .collect::<Vec<_>>()
                    .join(","),
            }
        } else {
            self.exact_display(value)
        }
    }

    fn exact_display(&self, value: i32) -> String {
        match self.find(value) {
            Some(meta) => meta.display_name().to_string(),
            None if value == 0 => "Unknown".to_string(),
            None => value.to_string(),
        }
    }
}
