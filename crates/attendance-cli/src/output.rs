use attendance_core::notification::{NotificationEvent, Severity};
use attendance_core::records::{BranchOptions, StudentDetails, TeacherDetails};
use attendance_core::roster::RosterView;
use attendance_core::{ActionKind, ConsoleView};
use serde::Serialize;
use serde_json::Value;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    for line in render_table(headers, &rows) {
        println!("{line}");
    }
}

/// Header, separator and rows, columns padded by character count.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:width$}", c, width = widths.get(i).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.to_vec()));
    out.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out
}

/// Success and info go to stdout, warnings and errors to stderr.
pub fn print_notification(event: &NotificationEvent) {
    let text = format!("{} {}", event.severity.icon(), event.message);
    match event.severity {
        Severity::Success | Severity::Info => println!("{text}"),
        Severity::Warning | Severity::Error => eprintln!("{text}"),
    }
}

// ---------------------------------------------------------------------------
// View sections
// ---------------------------------------------------------------------------

/// Print the part of the view `kind` renders into, if any.
pub fn print_section(kind: ActionKind, view: &ConsoleView) {
    match kind {
        ActionKind::SearchTeacher => {
            if let Some(t) = &view.teacher {
                print_teacher(t);
            }
        }
        ActionKind::SearchStudent => {
            if let Some(s) = &view.student {
                print_student(s);
            }
        }
        ActionKind::ListMissingDevices | ActionKind::AssignDevice => {
            if let Some(r) = &view.missing_devices {
                print_roster(r);
            }
        }
        ActionKind::FetchStudents => {
            if let Some(r) = &view.students {
                print_roster(r);
            }
        }
        ActionKind::ListBranches => {
            if let Some(b) = &view.branches {
                print_branches(b);
            }
        }
        _ => {}
    }
}

/// Same selection as [`print_section`], as JSON. `null` when nothing shows.
pub fn section_json(kind: ActionKind, view: &ConsoleView) -> anyhow::Result<Value> {
    let value = match kind {
        ActionKind::SearchTeacher => serde_json::to_value(&view.teacher)?,
        ActionKind::SearchStudent => serde_json::to_value(&view.student)?,
        ActionKind::ListMissingDevices | ActionKind::AssignDevice => {
            serde_json::to_value(&view.missing_devices)?
        }
        ActionKind::FetchStudents => serde_json::to_value(&view.students)?,
        ActionKind::ListBranches => serde_json::to_value(&view.branches)?,
        _ => Value::Null,
    };
    Ok(value)
}

fn print_fields(fields: &[(&str, &str)]) {
    let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in fields {
        let shown = if value.is_empty() { "-" } else { *value };
        println!("{key:width$}  {shown}");
    }
}

fn print_teacher(t: &TeacherDetails) {
    print_fields(&[
        ("id", t.id.as_str()),
        ("teacher id", t.teacher_id.as_str()),
        ("name", t.name.as_str()),
        ("email", t.email.as_str()),
        ("phone", t.phone.as_str()),
        ("bluetooth", t.bluetooth_device_id.as_str()),
    ]);
}

fn print_student(s: &StudentDetails) {
    print_fields(&[
        ("id", s.id.as_str()),
        ("student id", s.student_id.as_str()),
        ("name", s.name.as_str()),
        ("branch", s.branch().unwrap_or("")),
        ("year", s.year.as_deref().unwrap_or("")),
        ("division", s.division.as_str()),
        ("phone", s.phone.as_str()),
        ("email", s.email.as_str()),
    ]);
}

fn print_roster(view: &RosterView) {
    match view {
        RosterView::Placeholder(text) => println!("{text}"),
        RosterView::Rows(rows) => {
            let table = rows
                .iter()
                .map(|r| {
                    vec![
                        r.id.clone(),
                        r.title.clone(),
                        r.subtitle.clone(),
                        r.badge.as_ref().map(|b| b.label.clone()).unwrap_or_default(),
                    ]
                })
                .collect();
            print_table(&["ID", "NAME", "DETAILS", "ATTENDANCE"], table);
        }
    }
}

fn print_branches(b: &BranchOptions) {
    let join = |opts: &[attendance_core::records::SelectOption]| {
        opts.iter()
            .map(|o| o.text.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("branches   {}", join(&b.branches));
    println!("years      {}", join(&b.years));
    println!("divisions  {}", join(&b.divisions));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_start(line: &str, col: usize) -> usize {
        let mut seen = 0;
        let mut prev_space = false;
        for (i, c) in line.chars().enumerate() {
            if c != ' ' && prev_space {
                seen += 1;
                if seen == col {
                    return i;
                }
            }
            prev_space = c == ' ';
        }
        usize::MAX
    }

    #[test]
    fn table_aligns_non_ascii_text() {
        let lines = render_table(
            &["ÉLÈVE", "NOTE"],
            &[
                vec!["Zoë".to_string(), "82%".to_string()],
                vec!["Ravi".to_string(), "59%".to_string()],
            ],
        );
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "-----  ----");
        let starts: Vec<_> = lines.iter().map(|l| column_start(l, 1)).collect();
        assert_eq!(starts, vec![7, 7, 7, 7]);
    }
}
