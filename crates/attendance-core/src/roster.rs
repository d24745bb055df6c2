//! Pure projection of teacher/student lists into display rows.

use crate::records::string_or_empty;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn lenient_percentage<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    })
}

/// One teacher or student in a list response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub id: String,
    #[serde(default, rename = "name", deserialize_with = "string_or_empty")]
    pub display_name: String,
    #[serde(default, rename = "email", deserialize_with = "string_or_empty")]
    pub contact_email: String,
    /// Institution-issued id: `teacherId` or `studentId`.
    #[serde(
        default,
        alias = "teacherId",
        alias = "studentId",
        deserialize_with = "string_or_empty"
    )]
    pub secondary_identifier: String,
    #[serde(
        default,
        alias = "totalAttendance",
        deserialize_with = "lenient_percentage"
    )]
    pub attendance_percentage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceBand {
    Danger,
    Warning,
    Good,
}

impl AttendanceBand {
    /// `< 60` danger, `60..75` warning, `>= 75` good.
    pub fn classify(percentage: f64) -> Self {
        if percentage < 60.0 {
            AttendanceBand::Danger
        } else if percentage < 75.0 {
            AttendanceBand::Warning
        } else {
            AttendanceBand::Good
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceBand::Danger => "danger",
            AttendanceBand::Warning => "warning",
            AttendanceBand::Good => "good",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterKind {
    /// Teachers with no Bluetooth device id.
    MissingDevices,
    Students,
}

impl RosterKind {
    pub fn placeholder(self) -> &'static str {
        match self {
            RosterKind::MissingDevices => "All teachers have Bluetooth IDs assigned.",
            RosterKind::Students => "No students found for the selected criteria.",
        }
    }

    /// Key holding the list in the response body.
    pub fn payload_key(self) -> &'static str {
        match self {
            RosterKind::MissingDevices => "teachers",
            RosterKind::Students => "students",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<AttendanceBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterRow {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub badge: Option<Badge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum RosterView {
    Placeholder(&'static str),
    Rows(Vec<RosterRow>),
}

impl RosterView {
    pub fn rows(&self) -> &[RosterRow] {
        match self {
            RosterView::Rows(rows) => rows,
            RosterView::Placeholder(_) => &[],
        }
    }
}

pub fn render(kind: RosterKind, entries: &[RosterEntry]) -> RosterView {
    if entries.is_empty() {
        return RosterView::Placeholder(kind.placeholder());
    }
    RosterView::Rows(entries.iter().map(|e| row(kind, e)).collect())
}

fn row(kind: RosterKind, entry: &RosterEntry) -> RosterRow {
    let badge = match kind {
        RosterKind::MissingDevices => Some(Badge {
            label: "Missing Bluetooth ID".to_string(),
            band: None,
        }),
        RosterKind::Students => entry.attendance_percentage.map(|pct| Badge {
            label: format!("{pct}%"),
            band: Some(AttendanceBand::classify(pct)),
        }),
    };
    RosterRow {
        id: entry.id.clone(),
        title: entry.display_name.clone(),
        subtitle: format!("{} | {}", entry.contact_email, entry.secondary_identifier),
        badge,
    }
}

/// Entries under `kind`'s payload key. A missing key reads as an empty list.
/// Every element yields one entry; one that is not an object becomes a
/// blank entry so the list is never shorter than what the server sent.
pub fn entries_from_payload(kind: RosterKind, payload: &Value) -> Vec<RosterEntry> {
    payload
        .get(kind.payload_key())
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .map(|v| {
                    serde_json::from_value(v.clone()).unwrap_or_else(|e| {
                        tracing::warn!(list = kind.payload_key(), error = %e, "unreadable roster entry");
                        RosterEntry::default()
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
