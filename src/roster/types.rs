// Roster types: classes and their enrolled students

use serde::{Deserialize, Serialize};

/// A student as listed on a class tab of the roster spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique within its class (the companion script uses `"<tab>_<number>"`)
    pub id: String,
    pub name: String,
    /// Roster number within the class
    pub number: i64,
}

/// A class and its ordered list of students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: String,
    pub name: String,
    pub students: Vec<Student>,
}

impl ClassGroup {
    pub fn student_by_number(&self, number: i64) -> Option<&Student> {
        self.students.iter().find(|s| s.number == number)
    }

    pub fn student_by_id(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }
}
