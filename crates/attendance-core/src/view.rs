use crate::action::Effect;
use crate::controller::FormSurface;
use crate::records::{BranchOptions, StudentDetails, TeacherDetails};
use crate::roster::{self, RosterKind, RosterView};
use serde::Serialize;
use serde_json::Value;

/// Everything an action can put on screen, minus the notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsoleView {
    /// Set while the teacher update section is revealed.
    pub teacher: Option<TeacherDetails>,
    pub student: Option<StudentDetails>,
    pub missing_devices: Option<RosterView>,
    pub students: Option<RosterView>,
    pub branches: Option<BranchOptions>,
    pub forms_reset: u32,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormSurface for ConsoleView {
    fn apply(&mut self, effect: Effect, payload: &Value) {
        match effect {
            Effect::ResetForm => self.forms_reset += 1,
            Effect::ShowTeacher => {
                self.teacher = payload
                    .get("teacher")
                    .and_then(|t| serde_json::from_value(t.clone()).ok());
            }
            Effect::HideTeacher => self.teacher = None,
            Effect::ShowStudent => {
                self.student = payload
                    .get("student")
                    .and_then(|s| serde_json::from_value(s.clone()).ok());
            }
            Effect::HideStudent => self.student = None,
            Effect::ShowMissingDevices => {
                let entries = roster::entries_from_payload(RosterKind::MissingDevices, payload);
                self.missing_devices = Some(roster::render(RosterKind::MissingDevices, &entries));
            }
            Effect::ShowStudents => {
                let entries = roster::entries_from_payload(RosterKind::Students, payload);
                self.students = Some(roster::render(RosterKind::Students, &entries));
            }
            Effect::PopulateBranches => {
                self.branches = Some(BranchOptions::from_payload(payload));
            }
            // Follow-up actions are run by the console, not rendered.
            Effect::Refresh(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use serde_json::json;

    #[test]
    fn teacher_without_device_is_still_shown() {
        let mut view = ConsoleView::new();
        view.apply(
            Effect::ShowTeacher,
            &json!({"teacher": {"id": "t1", "name": "Asha", "email": "a@x.edu", "bluetoothDeviceId": null}}),
        );
        let teacher = view.teacher.as_ref().unwrap();
        assert_eq!(teacher.name, "Asha");
        assert_eq!(teacher.bluetooth_device_id, "");
    }

    #[test]
    fn show_then_hide_teacher() {
        let mut view = ConsoleView::new();
        view.apply(
            Effect::ShowTeacher,
            &json!({"teacher": {"id": "t1", "name": "Asha", "bluetoothDeviceId": "AA"}}),
        );
        let teacher = view.teacher.as_ref().unwrap();
        assert_eq!(teacher.name, "Asha");
        assert_eq!(teacher.bluetooth_device_id, "AA");

        view.apply(Effect::HideTeacher, &Value::Null);
        assert!(view.teacher.is_none());
    }

    #[test]
    fn show_students_empty_renders_placeholder() {
        let mut view = ConsoleView::new();
        view.apply(Effect::ShowStudents, &json!({"students": []}));
        assert_eq!(
            view.students,
            Some(RosterView::Placeholder(RosterKind::Students.placeholder()))
        );
    }

    #[test]
    fn reset_and_refresh_leave_sections_alone() {
        let mut view = ConsoleView::new();
        view.apply(Effect::ResetForm, &json!({}));
        view.apply(Effect::Refresh(ActionKind::ListMissingDevices), &json!({}));
        assert_eq!(view.forms_reset, 1);
        assert!(view.missing_devices.is_none());
    }

    #[test]
    fn populate_branches() {
        let mut view = ConsoleView::new();
        view.apply(
            Effect::PopulateBranches,
            &json!([{"branchName": "CS", "year": 2, "division": "A"}]),
        );
        assert_eq!(view.branches.unwrap().branches[0].value, "CS");
    }
}
