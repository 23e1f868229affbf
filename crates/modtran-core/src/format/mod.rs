//! Fixed-width field rendering shared by every card of the control file.
//!
//! The remote simulator reads its control file with Fortran fixed-column
//! edit descriptors, so each field must render to exactly its declared
//! width. Three primitives cover the whole schema: text (`A`), integer
//! (`I`) and real (`F`) slots, right-justified except for the named-file
//! fields which pad on the right.

use crate::domain::errors::{ModtranError, ModtranResult};
use std::fmt::{Display, Formatter};

/// One typed value bound to one fixed-width slot.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Real { value: f64, decimals: usize },
}

impl FieldValue {
    const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::Real { .. } => "real",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Right,
    Left,
}

/// Per-field acceptance predicate, checked before rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validator {
    Any,
    TextOneOf(&'static [&'static str]),
    IntOneOf(&'static [i64]),
    IntRange(i64, i64),
    RealRange(f64, f64),
}

/// Non-fatal notice that a real value carried more decimal digits than its
/// slot allows and was truncated (not rounded) to fit.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionWarning {
    pub field: &'static str,
    pub value: f64,
    pub decimals: usize,
}

impl Display for PrecisionWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "truncating {} to {} decimal places for field '{}'",
            self.value, self.decimals, self.field
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub value: FieldValue,
    pub width: usize,
    pub justify: Justify,
    pub validator: Validator,
}

impl FieldSpec {
    /// Right-justified text slot (`A` descriptor).
    pub fn text(name: &'static str, value: impl Into<String>, width: usize) -> Self {
        Self {
            name,
            value: FieldValue::Text(value.into()),
            width,
            justify: Justify::Right,
            validator: Validator::Any,
        }
    }

    /// Left-justified text slot, used for the named external-file cards.
    pub fn filename(name: &'static str, value: impl Into<String>, width: usize) -> Self {
        Self {
            justify: Justify::Left,
            ..Self::text(name, value, width)
        }
    }

    /// Right-justified base-10 integer slot (`I` descriptor).
    pub fn int(name: &'static str, value: i64, width: usize) -> Self {
        Self {
            name,
            value: FieldValue::Int(value),
            width,
            justify: Justify::Right,
            validator: Validator::Any,
        }
    }

    /// Right-justified real slot with a fixed decimal count (`F` descriptor).
    pub fn real(name: &'static str, value: f64, width: usize, decimals: usize) -> Self {
        Self {
            name,
            value: FieldValue::Real { value, decimals },
            width,
            justify: Justify::Right,
            validator: Validator::Any,
        }
    }

    /// Unnamed all-space slot between two fields of a card.
    pub fn spacer(width: usize) -> Self {
        Self::text("blank", "", width)
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Renders the field to exactly `self.width` characters, pushing a
    /// [`PrecisionWarning`] when decimal digits had to be dropped.
    pub fn render(&self, warnings: &mut Vec<PrecisionWarning>) -> ModtranResult<String> {
        self.check_validator()?;
        let body = match &self.value {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Int(value) => value.to_string(),
            FieldValue::Real { value, decimals } => self.render_real(*value, *decimals, warnings)?,
        };
        if body.len() > self.width {
            return Err(ModtranError::FormatOverflow {
                field: self.name,
                rendered: body,
                width: self.width,
            });
        }
        Ok(match self.justify {
            Justify::Right => format!("{body:>width$}", width = self.width),
            Justify::Left => format!("{body:<width$}", width = self.width),
        })
    }

    fn render_real(
        &self,
        value: f64,
        decimals: usize,
        warnings: &mut Vec<PrecisionWarning>,
    ) -> ModtranResult<String> {
        if !value.is_finite() {
            return Err(ModtranError::invalid_value(
                self.name,
                value.to_string(),
                "a finite number",
            ));
        }
        // Shortest round-trip decimal form, then truncate; the control
        // format truncates extra digits rather than rounding.
        let text = value.to_string();
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let frac = if frac_part.len() > decimals {
            let warning = PrecisionWarning {
                field: self.name,
                value,
                decimals,
            };
            tracing::warn!(field = self.name, value, decimals, "{}", warning);
            warnings.push(warning);
            frac_part[..decimals].to_string()
        } else {
            format!("{frac_part:0<decimals$}")
        };
        Ok(format!("{int_part}.{frac}"))
    }

    fn check_validator(&self) -> ModtranResult<()> {
        let ok = match (&self.validator, &self.value) {
            (Validator::Any, _) => true,
            (Validator::TextOneOf(set), FieldValue::Text(text)) => set.contains(&text.as_str()),
            (Validator::IntOneOf(set), FieldValue::Int(value)) => set.contains(value),
            (Validator::IntRange(min, max), FieldValue::Int(value)) => {
                (*min..=*max).contains(value)
            }
            (Validator::RealRange(min, max), FieldValue::Real { value, .. }) => {
                *value >= *min && *value <= *max
            }
            (validator, value) => {
                return Err(ModtranError::TypeMismatch {
                    field: self.name,
                    expected: validator_operand(validator),
                    actual: format!("{} value {}", value.type_name(), value_text(value)),
                });
            }
        };
        if ok {
            return Ok(());
        }
        Err(ModtranError::InvalidValue {
            field: self.name,
            value: value_text(&self.value),
            allowed: Some(validator_text(&self.validator)),
        })
    }
}

const fn validator_operand(validator: &Validator) -> &'static str {
    match validator {
        Validator::Any => "any",
        Validator::TextOneOf(_) => "text",
        Validator::IntOneOf(_) | Validator::IntRange(..) => "integer",
        Validator::RealRange(..) => "real",
    }
}

fn value_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => text.clone(),
        FieldValue::Int(value) => value.to_string(),
        FieldValue::Real { value, .. } => value.to_string(),
    }
}

fn validator_text(validator: &Validator) -> String {
    match validator {
        Validator::Any => "any".to_string(),
        Validator::TextOneOf(set) => set.join(", "),
        Validator::IntOneOf(set) => set
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        Validator::IntRange(min, max) => format!("{min}..={max}"),
        Validator::RealRange(min, max) => format!("[{min}, {max}]"),
    }
}
