use crate::form::FormValues;
use crate::notification::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// HttpMethod
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// Side effect applied to the view after an action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Clear the submitted form.
    ResetForm,
    /// Reveal the teacher update section, prefilled from `teacher`.
    ShowTeacher,
    HideTeacher,
    /// Reveal the student update section, prefilled from `student`.
    ShowStudent,
    HideStudent,
    /// Render `teachers` as the missing-device roster.
    ShowMissingDevices,
    /// Render `students` as the class roster.
    ShowStudents,
    /// Fill the branch/year/division pickers.
    PopulateBranches,
    /// Run another action once this one succeeds.
    Refresh(ActionKind),
}

// ---------------------------------------------------------------------------
// ActionKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    UpdateAdmin,
    RemoveTeacher,
    SearchTeacher,
    UpdateTeacher,
    ChangeTeacherPassword,
    ListMissingDevices,
    AssignDevice,
    FetchStudents,
    BlockAttendance,
    SearchStudent,
    UpdateStudent,
    RemoveStudent,
    ListBranches,
}

impl ActionKind {
    pub fn all() -> &'static [ActionKind] {
        &[
            ActionKind::UpdateAdmin,
            ActionKind::RemoveTeacher,
            ActionKind::SearchTeacher,
            ActionKind::UpdateTeacher,
            ActionKind::ChangeTeacherPassword,
            ActionKind::ListMissingDevices,
            ActionKind::AssignDevice,
            ActionKind::FetchStudents,
            ActionKind::BlockAttendance,
            ActionKind::SearchStudent,
            ActionKind::UpdateStudent,
            ActionKind::RemoveStudent,
            ActionKind::ListBranches,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::UpdateAdmin => "update_admin",
            ActionKind::RemoveTeacher => "remove_teacher",
            ActionKind::SearchTeacher => "search_teacher",
            ActionKind::UpdateTeacher => "update_teacher",
            ActionKind::ChangeTeacherPassword => "change_teacher_password",
            ActionKind::ListMissingDevices => "list_missing_devices",
            ActionKind::AssignDevice => "assign_device",
            ActionKind::FetchStudents => "fetch_students",
            ActionKind::BlockAttendance => "block_attendance",
            ActionKind::SearchStudent => "search_student",
            ActionKind::UpdateStudent => "update_student",
            ActionKind::RemoveStudent => "remove_student",
            ActionKind::ListBranches => "list_branches",
        }
    }

    pub fn descriptor(self) -> &'static ActionDescriptor {
        // ACTIONS is declared in the same order as the enum.
        &ACTIONS[self as usize]
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        ActionKind::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| format!("unknown action '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// ActionDescriptor
// ---------------------------------------------------------------------------

/// Everything the controller needs to run one admin action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub kind: ActionKind,
    pub endpoint: &'static str,
    pub method: HttpMethod,
    /// Fields sent to the server, in order.
    pub payload_fields: &'static [&'static str],
    pub required_fields: &'static [&'static str],
    /// `(field, confirmation)`: when `field` is filled both must be equal.
    pub matching_fields: Option<(&'static str, &'static str)>,
    pub confirmation_prompt: Option<&'static str>,
    pub success_message: &'static str,
    /// Shown for a failed response that carries no `error` field.
    pub failure_message: &'static str,
    /// A 2xx body must contain this key to count as success.
    pub required_key: Option<&'static str>,
    pub on_success: Option<Effect>,
    pub on_failure: Option<Effect>,
}

/// Why a form was rejected before any request was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Missing(&'static str),
    Mismatch {
        field: &'static str,
        confirmation: &'static str,
    },
}

impl Rejection {
    pub fn severity(&self) -> Severity {
        match self {
            Rejection::Missing(_) => Severity::Warning,
            Rejection::Mismatch { .. } => Severity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Rejection::Missing(field) => {
                format!("Please fill in all required fields (missing: {field})")
            }
            Rejection::Mismatch { .. } => "Passwords do not match".to_string(),
        }
    }
}

impl ActionDescriptor {
    /// First required field that is empty, in declaration order, then the
    /// matching-field check.
    pub fn check(&self, form: &FormValues) -> Result<(), Rejection> {
        if let Some(field) = self
            .required_fields
            .iter()
            .copied()
            .find(|f| !form.is_filled(f))
        {
            return Err(Rejection::Missing(field));
        }
        if let Some((field, confirmation)) = self.matching_fields {
            if form.is_filled(field) && form.get(field) != form.get(confirmation) {
                return Err(Rejection::Mismatch {
                    field,
                    confirmation,
                });
            }
        }
        Ok(())
    }

    /// Ordered `(field, value)` pairs taken from the form.
    pub fn payload(&self, form: &FormValues) -> Vec<(&'static str, String)> {
        self.payload_fields
            .iter()
            .map(|f| (*f, form.get(f).to_string()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Action table
// ---------------------------------------------------------------------------

static ACTIONS: [ActionDescriptor; 13] = [
    ActionDescriptor {
        kind: ActionKind::UpdateAdmin,
        endpoint: "/admin/update",
        method: HttpMethod::Post,
        payload_fields: &["phone", "email", "newPassword", "confirmPassword"],
        required_fields: &[],
        matching_fields: Some(("newPassword", "confirmPassword")),
        confirmation_prompt: None,
        success_message: "Admin settings updated successfully",
        failure_message: "Failed to update admin settings",
        required_key: None,
        on_success: Some(Effect::ResetForm),
        on_failure: None,
    },
    ActionDescriptor {
        kind: ActionKind::RemoveTeacher,
        endpoint: "/teacher/remove",
        method: HttpMethod::Post,
        payload_fields: &["search", "reason", "reasonText"],
        required_fields: &["search", "reason"],
        matching_fields: None,
        confirmation_prompt: Some(
            "Are you sure you want to remove this teacher? This action cannot be undone.",
        ),
        success_message: "Teacher removed successfully",
        failure_message: "Failed to remove teacher",
        required_key: None,
        on_success: Some(Effect::ResetForm),
        on_failure: None,
    },
    ActionDescriptor {
        kind: ActionKind::SearchTeacher,
        endpoint: "/teacher/search",
        method: HttpMethod::Get,
        payload_fields: &["query"],
        required_fields: &["query"],
        matching_fields: None,
        confirmation_prompt: None,
        success_message: "Teacher found",
        failure_message: "Teacher not found",
        required_key: Some("teacher"),
        on_success: Some(Effect::ShowTeacher),
        on_failure: Some(Effect::HideTeacher),
    },
    ActionDescriptor {
        kind: ActionKind::UpdateTeacher,
        endpoint: "/teacher/update",
        method: HttpMethod::Post,
        payload_fields: &["search", "name", "email", "phone", "bluetoothDeviceId"],
        required_fields: &[],
        matching_fields: None,
        confirmation_prompt: None,
        success_message: "Teacher updated successfully",
        failure_message: "Failed to update teacher",
        required_key: None,
        on_success: None,
        on_failure: None,
    },
    ActionDescriptor {
        kind: ActionKind::ChangeTeacherPassword,
        endpoint: "/teacher/change-password",
        method: HttpMethod::Post,
        payload_fields: &["email", "newPassword"],
        required_fields: &["email", "newPassword"],
        matching_fields: None,
        confirmation_prompt: None,
        success_message: "Teacher password changed successfully",
        failure_message: "Failed to change password",
        required_key: None,
        on_success: Some(Effect::ResetForm),
        on_failure: None,
    },
    ActionDescriptor {
        kind: ActionKind::ListMissingDevices,
        endpoint: "/teacher/missing-bluetooth",
        method: HttpMethod::Get,
        payload_fields: &[],
        required_fields: &[],
        matching_fields: None,
        confirmation_prompt: None,
        success_message: "Teachers loaded",
        failure_message: "Failed to load teachers",
        required_key: None,
        on_success: Some(Effect::ShowMissingDevices),
        on_failure: None,
    },
    ActionDescriptor {
        kind: ActionKind::AssignDevice,
        endpoint: "/teacher/add-bluetooth",
        method: HttpMethod::Post,
        payload_fields: &["teacherId", "bluetoothId"],
        required_fields: &["teacherId", "bluetoothId"],
        matching_fields: None,
        confirmation_prompt: None,
        success_message: "Bluetooth ID added successfully",
        failure_message: "Failed to add Bluetooth ID",
        required_key: None,
        on_success: Some(Effect::Refresh(ActionKind::ListMissingDevices)),
        on_failure: None,
    },
    ActionDescriptor {
        kind: ActionKind::FetchStudents,
        endpoint: "/student/fetch",
        method: HttpMethod::Get,
        payload_fields: &["branch", "year", "division"],
        required_fields: &["branch", "year", "division"],
        matching_fields: None,
        confirmation_prompt: None,
        success_message: "Students loaded",
        failure_message: "Failed to fetch students",
        required_key: None,
        on_success: Some(Effect::ShowStudents),
        on_failure: None,
    },
    ActionDescriptor {
        kind: ActionKind::BlockAttendance,
        endpoint: "/student/block-attendance",
        method: HttpMethod::Post,
        payload_fields: &["studentSearch", "blockUntilDate", "reason", "reasonText"],
        required_fields: &["studentSearch", "blockUntilDate", "reason"],
        matching_fields: None,
        confirmation_prompt: None,
        success_message: "Student attendance blocked successfully",
        failure_message: "Failed to block attendance",
        required_key: None,
        on_success: Some(Effect::ResetForm),
        on_failure: None,
    },
    ActionDescriptor {
        kind: ActionKind::SearchStudent,
        endpoint: "/student/search",
        method: HttpMethod::Get,
        payload_fields: &["query"],
        required_fields: &["query"],
        matching_fields: None,
        confirmation_prompt: None,
        success_message: "Student found",
        failure_message: "Student not found",
        required_key: Some("student"),
        on_success: Some(Effect::ShowStudent),
        on_failure: Some(Effect::HideStudent),
    },
    ActionDescriptor {
        kind: ActionKind::UpdateStudent,
        endpoint: "/student/update",
        method: HttpMethod::Post,
        payload_fields: &[
            "search",
            "newBranch",
            "newYear",
            "newDivision",
            "newPhone",
            "newEmail",
            "newPassword",
        ],
        required_fields: &[],
        matching_fields: None,
        confirmation_prompt: None,
        success_message: "Student details updated successfully",
        failure_message: "Failed to update student",
        required_key: None,
        on_success: None,
        on_failure: None,
    },
    ActionDescriptor {
        kind: ActionKind::RemoveStudent,
        endpoint: "/student/remove",
        method: HttpMethod::Post,
        payload_fields: &["studentSearch", "reason", "reasonText"],
        required_fields: &["studentSearch", "reason"],
        matching_fields: None,
        confirmation_prompt: Some(
            "Are you sure you want to remove this student? This action cannot be undone.",
        ),
        success_message: "Student removed successfully",
        failure_message: "Failed to remove student",
        required_key: None,
        on_success: Some(Effect::ResetForm),
        on_failure: None,
    },
    ActionDescriptor {
        kind: ActionKind::ListBranches,
        endpoint: "/branches",
        method: HttpMethod::Get,
        payload_fields: &[],
        required_fields: &[],
        matching_fields: None,
        confirmation_prompt: None,
        success_message: "Branches loaded",
        failure_message: "Failed to load dropdown data",
        required_key: None,
        on_success: Some(Effect::PopulateBranches),
        on_failure: None,
    },
];
