//! Typed projections of the backend's search and metadata payloads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accepts a JSON string or number and yields it as a string.
///
/// Year fields come back as integers from some documents and strings from
/// others.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Text field that may arrive as `null`, a number or a bool. `null` and
/// anything non-scalar read as `""`.
pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Teacher record as returned by `/teacher/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDetails {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub teacher_id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub bluetooth_device_id: String,
}

/// Student record as returned by `/student/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub student_id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub branch_id: String,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub division: String,
}

impl StudentDetails {
    /// `branchName` if the server sent one, else the `branchId` prefix
    /// before the first `_` (`CS_Y2_A` → `CS`).
    pub fn branch(&self) -> Option<&str> {
        if let Some(name) = self.branch_name.as_deref().filter(|n| !n.is_empty()) {
            return Some(name);
        }
        self.branch_id
            .split_once('_')
            .map(|(prefix, _)| prefix)
            .filter(|p| !p.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Branch metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRecord {
    pub branch_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub division: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

/// Choices for the branch / year / division pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchOptions {
    pub branches: Vec<SelectOption>,
    pub years: Vec<SelectOption>,
    pub divisions: Vec<SelectOption>,
}

impl BranchOptions {
    /// Branch names keep first-seen order; years and divisions are sorted.
    pub fn from_records(records: &[BranchRecord]) -> Self {
        let mut branches: Vec<String> = Vec::new();
        for r in records {
            if !branches.contains(&r.branch_name) {
                branches.push(r.branch_name.clone());
            }
        }

        let mut years: Vec<String> = records.iter().filter_map(|r| r.year.clone()).collect();
        // Numeric years sort numerically, anything else after them.
        years.sort_by(|a, b| match (a.parse::<u32>(), b.parse::<u32>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        });
        years.dedup();

        let mut divisions: Vec<String> = records
            .iter()
            .filter(|r| !r.division.is_empty())
            .map(|r| r.division.clone())
            .collect();
        divisions.sort();
        divisions.dedup();

        Self {
            branches: branches
                .into_iter()
                .map(|b| SelectOption {
                    text: b.clone(),
                    value: b,
                })
                .collect(),
            years: years
                .into_iter()
                .map(|y| SelectOption {
                    text: format!("Year {y}"),
                    value: y,
                })
                .collect(),
            divisions: divisions
                .into_iter()
                .map(|d| SelectOption {
                    text: format!("Division {d}"),
                    value: d,
                })
                .collect(),
        }
    }

    /// Parse the `/branches` payload: a bare array, or `{"branches": [...]}`.
    /// Malformed records are skipped.
    pub fn from_payload(payload: &Value) -> Self {
        let items = payload
            .as_array()
            .or_else(|| payload.get("branches").and_then(Value::as_array));
        let records: Vec<BranchRecord> = items
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        Self::from_records(&records)
    }
}
