// Roster: the classes and students sourced from the spreadsheet endpoint

mod client;
mod types;

pub use client::{parse_roster, RosterClient, RosterError};
pub use types::{ClassGroup, Student};

/// In-memory roster plus the "connected" flag shown to the user.
///
/// Classes are only ever replaced wholesale by a successful fetch.
#[derive(Debug, Default)]
pub struct Roster {
    classes: Vec<ClassGroup>,
    connected: bool,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> &[ClassGroup] {
        &self.classes
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Apply the outcome of one fetch.
    ///
    /// On connection failures (including a reply that is not JSON) the flag
    /// is cleared; on JSON of the wrong shape the state is left exactly as it
    /// was. Previous classes survive any error.
    pub fn apply(&mut self, outcome: Result<Vec<ClassGroup>, RosterError>) -> Result<(), RosterError> {
        match outcome {
            Ok(classes) => {
                tracing::info!(count = classes.len(), "Roster replaced");
                self.classes = classes;
                self.connected = true;
                Ok(())
            }
            Err(e) => {
                if e.is_connection_failure() {
                    self.connected = false;
                }
                tracing::warn!(error = %e, "Roster fetch failed");
                Err(e)
            }
        }
    }

    /// Look a class up by id, falling back to an exact name match.
    pub fn class(&self, key: &str) -> Option<&ClassGroup> {
        self.classes
            .iter()
            .find(|c| c.id == key)
            .or_else(|| self.classes.iter().find(|c| c.name == key))
    }

    /// Classes whose name contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&ClassGroup> {
        let query = query.to_lowercase();
        self.classes
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn class(id: &str, name: &str) -> ClassGroup {
        ClassGroup {
            id: id.into(),
            name: name.into(),
            students: vec![],
        }
    }

    fn loaded() -> Roster {
        let mut roster = Roster::new();
        roster
            .apply(Ok(vec![class("a", "Grade 1 Class 1"), class("b", "Grade 2 Class 3")]))
            .unwrap();
        roster
    }

    #[test]
    fn test_success_replaces_and_connects() {
        let roster = loaded();
        assert!(roster.is_connected());
        assert_eq!(roster.classes().len(), 2);
    }

    #[test]
    fn test_connection_failure_keeps_classes() {
        let mut roster = loaded();
        let result = roster.apply(Err(RosterError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }));
        assert!(result.is_err());
        assert!(!roster.is_connected());
        assert_eq!(roster.classes().len(), 2);
    }

    #[test]
    fn test_shape_failure_changes_nothing() {
        let mut roster = loaded();
        let result = roster.apply(Err(RosterError::Shape {
            reason: "expected a JSON array".into(),
        }));
        assert!(result.is_err());
        assert!(roster.is_connected());
        assert_eq!(roster.classes().len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let roster = loaded();
        let hits = roster.search("grade 2");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "b");
        assert_eq!(roster.search("").len(), 2);
    }

    #[test]
    fn test_class_lookup_by_id_or_name() {
        let roster = loaded();
        assert_eq!(roster.class("a").unwrap().name, "Grade 1 Class 1");
        assert_eq!(roster.class("Grade 2 Class 3").unwrap().id, "b");
        assert!(roster.class("missing").is_none());
    }
}
