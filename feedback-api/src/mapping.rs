//! Validation of submitted feedback forms and their translation into store
//! columns.

use crate::error::{AppError, AppResult};
use crate::schema::{
    lookup_label, FeedbackType, FieldKind, FieldSpec, FEEDBACK_TYPE_COLUMN, STATUS_COLUMN,
    STATUS_SUBMITTED, SUBMITTED_AT_COLUMN, TUITION_ID_COLUMN, TUTOR_ID_COLUMN,
};
use chrono::{DateTime, SecondsFormat, Utc};
use feedback_store::Fields;
use serde_json::{Map, Value};

/// Which store call a submission turns into
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitTarget {
    /// Fill in a row that already exists
    Update { record_id: String },
    /// Create a full row, used by forms that only know the tutor and tuition
    Create { tutor_id: Value, tuition_id: Value },
}

/// A form that passed validation
#[derive(Debug, Clone)]
pub struct Submission {
    pub target: SubmitTarget,
    pub feedback_type: FeedbackType,
    form: Map<String, Value>,
}

/// Truthiness used by the feedback forms: null, `""`, `false` and `0` all
/// count as missing.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a rating the way the forms always have: take the leading integer
/// of the value, so `"4"`, `"4.5"` and `"4 stars"` all give 4. Anything
/// without a leading integer, and zero, gives `None`.
pub fn parse_rating(value: &Value) -> Option<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => leading_integer(s),
        _ => None,
    };
    parsed.filter(|n| *n != 0)
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn map_field(spec: &FieldSpec, value: Option<&Value>) -> Value {
    match spec.kind {
        FieldKind::Text => value.cloned().unwrap_or(Value::Null),
        FieldKind::Rating => value
            .and_then(parse_rating)
            .map(Value::from)
            .unwrap_or(Value::Null),
        FieldKind::Label(table) => match value {
            Some(v) => as_text(v)
                .and_then(|code| lookup_label(table, &code))
                .map(Value::from)
                .unwrap_or_else(|| v.clone()),
            None => Value::Null,
        },
        FieldKind::FreeText => match value {
            Some(v) if is_present(Some(v)) => v.clone(),
            _ => Value::String(String::new()),
        },
    }
}

impl Submission {
    /// Check a submitted form, stopping at the first problem found
    pub fn validate(form: Map<String, Value>) -> AppResult<Self> {
        let target = if is_present(form.get("recordId")) {
            let record_id = form
                .get("recordId")
                .and_then(as_text)
                .ok_or_else(|| AppError::InvalidRequest("Invalid record ID".to_string()))?;
            SubmitTarget::Update { record_id }
        } else if is_present(form.get("tutor_id")) && is_present(form.get("tuition_id")) {
            SubmitTarget::Create {
                tutor_id: form["tutor_id"].clone(),
                tuition_id: form["tuition_id"].clone(),
            }
        } else {
            return Err(AppError::InvalidRequest("Missing record ID".to_string()));
        };

        if !is_present(form.get("type")) {
            return Err(AppError::InvalidRequest(
                "Missing feedback type".to_string(),
            ));
        }
        let feedback_type = form
            .get("type")
            .and_then(Value::as_str)
            .and_then(FeedbackType::parse)
            .ok_or_else(|| AppError::InvalidRequest("Invalid feedback type".to_string()))?;

        for spec in feedback_type.schema().required_fields() {
            if !is_present(form.get(spec.key)) {
                let message = spec.required.unwrap_or(crate::schema::INCOMPLETE_FORM);
                return Err(AppError::InvalidRequest(message.to_string()));
            }
        }

        Ok(Self {
            target,
            feedback_type,
            form,
        })
    }

    /// Build the columns to write. `Status` and `Submitted At` are always
    /// set here, whatever the form carried.
    pub fn record_fields(&self, now: DateTime<Utc>) -> Fields {
        let mut fields = Fields::new();

        if let SubmitTarget::Create {
            tutor_id,
            tuition_id,
        } = &self.target
        {
            fields.insert(TUTOR_ID_COLUMN.to_string(), tutor_id.clone());
            fields.insert(TUITION_ID_COLUMN.to_string(), tuition_id.clone());
            fields.insert(
                FEEDBACK_TYPE_COLUMN.to_string(),
                Value::from(self.feedback_type.as_str()),
            );
        }

        for spec in self.feedback_type.schema().fields {
            fields.insert(
                spec.column.to_string(),
                map_field(spec, self.form.get(spec.key)),
            );
        }

        let submitted_at = match self.target {
            SubmitTarget::Update { .. } => now.format("%Y-%m-%d").to_string(),
            SubmitTarget::Create { .. } => now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        fields.insert(STATUS_COLUMN.to_string(), Value::from(STATUS_SUBMITTED));
        fields.insert(SUBMITTED_AT_COLUMN.to_string(), Value::from(submitted_at));

        fields
    }
}
