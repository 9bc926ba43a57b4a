// Terminal rendering helpers

use serde::Serialize;

use crate::app::Notice;
use crate::records::{ActivityRecord, DayGroup};
use crate::roster::ClassGroup;

pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        eprintln!("{}", notice);
    }
}

pub fn format_classes(classes: &[&ClassGroup]) -> String {
    if classes.is_empty() {
        return "학급이 없습니다.".to_string();
    }
    let mut output = String::new();
    for class in classes {
        output.push_str(&format!(
            "{}  (학생 {}명)  [{}]\n",
            class.name,
            class.students.len(),
            class.id
        ));
    }
    output
}

pub fn format_students(class: &ClassGroup) -> String {
    let mut output = format!("{}\n", class.name);
    for student in &class.students {
        output.push_str(&format!("  {:>3}  {}\n", student.number, student.name));
    }
    output
}

pub fn format_groups(groups: &[DayGroup<'_>]) -> String {
    if groups.is_empty() {
        return "저장된 기록이 없습니다.".to_string();
    }
    let mut output = String::new();
    for group in groups {
        output.push_str(&format!("── {} ──\n", group.label()));
        for record in &group.records {
            output.push_str(&format_record(record));
        }
        output.push('\n');
    }
    output
}

fn format_record(record: &ActivityRecord) -> String {
    format!(
        "  [{}] {} {} ({})\n      {}\n",
        record.id.chars().take(8).collect::<String>(),
        record.student_number,
        record.student_name,
        record.class_name,
        record.content.replace('\n', "\n      ")
    )
}

#[derive(Serialize)]
struct GroupJson<'a> {
    date: Option<String>,
    label: String,
    records: &'a [&'a ActivityRecord],
}

pub fn groups_to_json(groups: &[DayGroup<'_>]) -> serde_json::Result<String> {
    let out: Vec<GroupJson<'_>> = groups
        .iter()
        .map(|g| GroupJson {
            date: g.date.map(|d| d.to_string()),
            label: g.label(),
            records: &g.records,
        })
        .collect();
    serde_json::to_string_pretty(&out)
}
