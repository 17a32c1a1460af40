//! Store-side schema of the two feedback record types.
//!
//! Validation and field mapping are both driven by the tables in this module,
//! so adding a column to a form only touches the matching `RecordSchema`.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const FEEDBACK_ID_COLUMN: &str = "Feedback ID";
pub const FEEDBACK_TYPE_COLUMN: &str = "Feedback Type";
pub const STATUS_COLUMN: &str = "Status";
pub const SUBMITTED_AT_COLUMN: &str = "Submitted At";
pub const TUTOR_NAME_COLUMN: &str = "Tutor Name";
pub const TUTOR_ID_COLUMN: &str = "Tutor ID";
pub const TUITION_ID_COLUMN: &str = "Tuition ID";

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_SUBMITTED: &str = "Submitted";

pub const INCOMPLETE_FORM: &str = "Please complete all required fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Demo,
    Tuition,
}

impl FeedbackType {
    /// Case-insensitive parse of `demo` / `tuition`
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("demo") {
            Some(Self::Demo)
        } else if value.eq_ignore_ascii_case("tuition") {
            Some(Self::Tuition)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Tuition => "tuition",
        }
    }

    pub fn schema(&self) -> &'static RecordSchema {
        match self {
            Self::Demo => &DEMO_SCHEMA,
            Self::Tuition => &TUITION_SCHEMA,
        }
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a form value is written to its column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Copied as sent
    Text,
    /// Integer rating, `null` when it does not parse
    Rating,
    /// Short code expanded through a label table, unknown codes pass through
    Label(&'static [LabelEntry]),
    /// Optional free text, empty string when absent
    FreeText,
}

/// Short code and the option string the store expects for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelEntry {
    pub code: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key in the submitted form
    pub key: &'static str,
    /// Column name in the store
    pub column: &'static str,
    pub kind: FieldKind,
    /// Error reported when the field is missing; `None` for optional fields
    pub required: Option<&'static str>,
}

impl FieldSpec {
    const fn required(key: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            column,
            kind,
            required: Some(INCOMPLETE_FORM),
        }
    }

    const fn optional(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            kind: FieldKind::FreeText,
            required: None,
        }
    }
}

#[derive(Debug)]
pub struct RecordSchema {
    pub feedback_type: FeedbackType,
    /// Fields in validation order; the first missing required field wins
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required.is_some())
    }
}

pub const SERVICE_SATISFACTION_LABELS: &[LabelEntry] = &[
    LabelEntry {
        code: "Excellent",
        label: "Excellent – Extremely satisfied with the service",
    },
    LabelEntry {
        code: "Good",
        label: "Good – Satisfied, but there's some room for improvement",
    },
    LabelEntry {
        code: "Average",
        label: "Average – The service was okay, but could be better",
    },
    LabelEntry {
        code: "Poor",
        label: "Poor – Not satisfied with the service",
    },
    // numeric codes sent by the older form
    LabelEntry {
        code: "4",
        label: "Excellent – Extremely satisfied with the service",
    },
    LabelEntry {
        code: "3",
        label: "Good – Satisfied, but there's some room for improvement",
    },
    LabelEntry {
        code: "2",
        label: "Average – The service was okay, but could be better",
    },
    LabelEntry {
        code: "1",
        label: "Poor – Not satisfied with the service",
    },
];

/// Look up `code` in a label table
pub fn lookup_label(table: &[LabelEntry], code: &str) -> Option<&'static str> {
    table.iter().find(|e| e.code == code).map(|e| e.label)
}

pub static TUITION_SCHEMA: RecordSchema = RecordSchema {
    feedback_type: FeedbackType::Tuition,
    fields: &[
        FieldSpec {
            key: "email",
            column: "Email",
            kind: FieldKind::Text,
            required: Some("Email is required"),
        },
        FieldSpec::required("punctuality", "Punctuality", FieldKind::Rating),
        FieldSpec::required("teaching_quality", "Teaching Quality", FieldKind::Rating),
        FieldSpec::required("communication", "Communication", FieldKind::Rating),
        FieldSpec::required("subject_knowledge", "Subject Knowledge", FieldKind::Rating),
        FieldSpec::required(
            "service_satisfaction",
            "Service Satisfaction",
            FieldKind::Label(SERVICE_SATISFACTION_LABELS),
        ),
        FieldSpec::required("would_recommend", "Would Recommend", FieldKind::Text),
        FieldSpec::optional("comments", "Comments"),
        FieldSpec::optional("suggestions", "Suggestions"),
    ],
};

pub static DEMO_SCHEMA: RecordSchema = RecordSchema {
    feedback_type: FeedbackType::Demo,
    fields: &[
        FieldSpec::required("on_time", "On Time", FieldKind::Text),
        FieldSpec::required("teaching_rating", "Teaching Rating", FieldKind::Rating),
        FieldSpec::required("demo_decision", "Demo Decision", FieldKind::Text),
        FieldSpec::optional("comments", "Comments"),
    ],
};
