//! Recursive, fail-fast constraint validation.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::access::{FieldAccessor, Value};
use crate::metadata::{ElementKind, FieldKind, FieldMeta, MessageDescription};
use crate::{Error, Result};

use super::config::{FaultMode, ValidationConfig};

/// Validates records against their message descriptions.
///
/// The walk visits fields in schema declaration order and stops at the
/// first violation; violations are never aggregated. The validator is
/// stateless apart from its configuration and safe to share across
/// threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Creates a validator with the given configuration.
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Validator { config }
    }

    /// Creates a validator that surfaces internal faults.
    #[must_use]
    pub fn strict() -> Self {
        Validator::new(ValidationConfig::strict())
    }

    /// Validates a record against a message description.
    ///
    /// A missing description makes validation a no-op success. A missing
    /// record with a description present is an input error. Otherwise the
    /// fields are checked in declaration order: `required_or` alternatives
    /// first, then `required`, then length/value bounds (evaluated on the
    /// kind's default when the field is absent), then collection counts,
    /// then recursion into nested records with `[index]`/`[key]` path
    /// suffixes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] when `record` is `None` and `descr` is not
    /// - [`Error::ConstraintViolation`] for the first failed check
    /// - [`Error::Fault`] in strict mode, when a value's runtime shape
    ///   contradicts the declared field kind; in lenient mode the fault is
    ///   logged and validation succeeds
    pub fn validate<R>(&self, record: Option<&R>, descr: Option<&MessageDescription>) -> Result<()>
    where
        R: FieldAccessor + ?Sized,
    {
        let Some(descr) = descr else {
            return Ok(());
        };
        let Some(record) = record else {
            return Err(Error::InvalidInput(descr.display_name().into_owned()));
        };

        match self.validate_fields(record, &descr.fields, "") {
            Err(Error::Fault(message)) if self.config.fault_mode == FaultMode::Lenient => {
                log::warn!(
                    "suppressed validation fault: struct={}, err={}",
                    descr.name,
                    message
                );
                Ok(())
            }
            res => res,
        }
    }

    fn validate_fields<R>(
        &self,
        record: &R,
        fields: &[Arc<FieldMeta>],
        prefix: &str,
    ) -> Result<()>
    where
        R: FieldAccessor + ?Sized,
    {
        for field in fields {
            let path = if prefix.is_empty() {
                field.name.clone()
            } else {
                format!("{prefix}.{}", field.name)
            };

            let present = has_field_value(record, &field.name);

            if !field.required_or.is_empty() {
                // A present field satisfies the whole group and skips its
                // own remaining checks.
                if present {
                    continue;
                }
                let satisfied = field
                    .required_or
                    .iter()
                    .any(|sibling| has_field_value(record, sibling));
                if !satisfied {
                    return Err(violation_error!(
                        "{path}: at least one of the fields must be set: {}",
                        field.required_or.join(", ")
                    ));
                }
            } else if field.required && !present {
                return Err(violation_error!("{path} is required"));
            }

            let value = record.get(&field.name);
            match field.kind {
                FieldKind::List(elem) => self.validate_list(value, elem, field, &path)?,
                FieldKind::Map(elem) => self.validate_map(value, elem, field, &path)?,
                kind => self.validate_singular(value, kind, field, &path)?,
            }
        }
        Ok(())
    }

    fn validate_list(
        &self,
        value: Option<&Value>,
        elem: ElementKind,
        field: &FieldMeta,
        path: &str,
    ) -> Result<()> {
        let items: &[Value] = match value {
            None => &[],
            Some(Value::List(items)) => items,
            Some(other) => {
                return Err(fault_error!(
                    "{path}: expected a list value, got {}",
                    other.kind_name()
                ))
            }
        };

        self.check_count(items.len(), field, path)?;

        if elem == ElementKind::Message && !field.nested_fields().is_empty() {
            for (index, item) in items.iter().enumerate() {
                let element_path = format!("{path}[{index}]");
                match item {
                    Value::Record(rec) => {
                        self.validate_fields(rec, field.nested_fields(), &element_path)?;
                    }
                    other => {
                        return Err(fault_error!(
                            "{element_path}: expected a record value, got {}",
                            other.kind_name()
                        ))
                    }
                }
            }
            return Ok(());
        }

        for (index, item) in items.iter().enumerate() {
            let element_path = format!("{path}[{index}]");
            self.validate_singular(Some(item), elem.as_kind(), field, &element_path)?;
        }
        Ok(())
    }

    fn validate_map(
        &self,
        value: Option<&Value>,
        elem: ElementKind,
        field: &FieldMeta,
        path: &str,
    ) -> Result<()> {
        static EMPTY: BTreeMap<String, Value> = BTreeMap::new();
        let entries: &BTreeMap<String, Value> = match value {
            None => &EMPTY,
            Some(Value::Map(entries)) => entries,
            Some(other) => {
                return Err(fault_error!(
                    "{path}: expected a map value, got {}",
                    other.kind_name()
                ))
            }
        };

        self.check_count(entries.len(), field, path)?;

        for (key, item) in entries {
            let element_path = format!("{path}[{key}]");
            if elem == ElementKind::Message && !field.nested_fields().is_empty() {
                match item {
                    Value::Record(rec) => {
                        self.validate_fields(rec, field.nested_fields(), &element_path)?;
                    }
                    other => {
                        return Err(fault_error!(
                            "{element_path}: expected a record value, got {}",
                            other.kind_name()
                        ))
                    }
                }
            } else {
                self.validate_singular(Some(item), elem.as_kind(), field, &element_path)?;
            }
        }
        Ok(())
    }

    fn validate_singular(
        &self,
        value: Option<&Value>,
        kind: FieldKind,
        field: &FieldMeta,
        path: &str,
    ) -> Result<()> {
        match kind {
            FieldKind::String => {
                let len = match value {
                    None => 0,
                    Some(Value::String(v)) => v.len(),
                    Some(other) => {
                        return Err(fault_error!(
                            "{path}: expected a string value, got {}",
                            other.kind_name()
                        ))
                    }
                };
                self.check_length(len, field, path)?;
            }
            FieldKind::Bytes => {
                let len = match value {
                    None => 0,
                    Some(Value::Bytes(v)) => v.len(),
                    Some(other) => {
                        return Err(fault_error!(
                            "{path}: expected a bytes value, got {}",
                            other.kind_name()
                        ))
                    }
                };
                self.check_length(len, field, path)?;
            }
            FieldKind::Int32 | FieldKind::Int64 => {
                let val: i64 = match value {
                    None => 0,
                    Some(Value::Int32(v)) => i64::from(*v),
                    Some(Value::Int64(v)) => *v,
                    Some(other) => {
                        return Err(fault_error!(
                            "{path}: expected a signed integer value, got {}",
                            other.kind_name()
                        ))
                    }
                };
                if field.min != 0 && val < i64::from(field.min) {
                    return Err(violation_error!("{path}: minimum value is {}", field.min));
                }
                if field.max != 0 && val > i64::from(field.max) {
                    return Err(violation_error!("{path}: maximum value is {}", field.max));
                }
            }
            FieldKind::Uint32 | FieldKind::Uint64 => {
                let val: u64 = match value {
                    None => 0,
                    Some(Value::Uint32(v)) => u64::from(*v),
                    Some(Value::Uint64(v)) => *v,
                    Some(other) => {
                        return Err(fault_error!(
                            "{path}: expected an unsigned integer value, got {}",
                            other.kind_name()
                        ))
                    }
                };
                if field.min > 0 && val < field.min as u64 {
                    return Err(violation_error!("{path}: minimum value is {}", field.min));
                }
                if field.max > 0 && val > field.max as u64 {
                    return Err(violation_error!("{path}: maximum value is {}", field.max));
                }
            }
            FieldKind::Float32 | FieldKind::Float64 => {
                let val: f64 = match value {
                    None => 0.0,
                    Some(Value::Float32(v)) => f64::from(*v),
                    Some(Value::Float64(v)) => *v,
                    Some(other) => {
                        return Err(fault_error!(
                            "{path}: expected a float value, got {}",
                            other.kind_name()
                        ))
                    }
                };
                if field.min > 0 && val < f64::from(field.min) {
                    return Err(violation_error!("{path}: minimum value is {}", field.min));
                }
                if field.max > 0 && val > f64::from(field.max) {
                    return Err(violation_error!("{path}: maximum value is {}", field.max));
                }
            }
            // Booleans and enums carry no bounds.
            FieldKind::Bool | FieldKind::Enum => {}
            FieldKind::Message => {
                if !field.nested_fields().is_empty() {
                    match value {
                        None => {}
                        Some(Value::Record(rec)) => {
                            self.validate_fields(rec, field.nested_fields(), path)?;
                        }
                        Some(other) => {
                            return Err(fault_error!(
                                "{path}: expected a record value, got {}",
                                other.kind_name()
                            ))
                        }
                    }
                }
            }
            FieldKind::List(_) | FieldKind::Map(_) => {
                return Err(fault_error!(
                    "{path}: collections cannot nest inside collections"
                ))
            }
        }
        Ok(())
    }

    fn check_length(&self, len: usize, field: &FieldMeta, path: &str) -> Result<()> {
        if field.min > 0 && (len as i64) < i64::from(field.min) {
            return Err(violation_error!("{path}: minimum length is {}", field.min));
        }
        if field.max > 0 && (len as i64) > i64::from(field.max) {
            return Err(violation_error!("{path}: maximum length is {}", field.max));
        }
        Ok(())
    }

    fn check_count(&self, count: usize, field: &FieldMeta, path: &str) -> Result<()> {
        if field.min_count > 0 && (count as i64) < i64::from(field.min_count) {
            return Err(violation_error!(
                "{path}: minimum count is {}",
                field.min_count
            ));
        }
        if field.max_count > 0 && (count as i64) > i64::from(field.max_count) {
            return Err(violation_error!(
                "{path}: maximum count is {}",
                field.max_count
            ));
        }
        Ok(())
    }
}

fn has_field_value<R>(record: &R, name: &str) -> bool
where
    R: FieldAccessor + ?Sized,
{
    if record.is_set(name) {
        return true;
    }
    record.get(name).is_some_and(|value| !value.is_default())
}
