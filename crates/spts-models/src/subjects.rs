//! Subject catalogue.

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Category whose subjects every student is enrolled in.
pub const MANDATORY_CATEGORY: &str = "T";

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Subject {
    pub subject_id: i32,
    pub medium: Option<String>,
    pub subject_name: String,
    pub subject_category: String,
}

/// Subjects keyed by category (`C1`, `Science`, `Maths`, ...).
pub type SubjectsByCategory = BTreeMap<String, Vec<Subject>>;

/// Groups subjects by category, keeping their input order within a group.
pub fn group_by_category(subjects: Vec<Subject>) -> SubjectsByCategory {
    let mut grouped = SubjectsByCategory::new();
    for subject in subjects {
        grouped
            .entry(subject.subject_category.clone())
            .or_default()
            .push(subject);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(id: i32, name: &str, category: &str) -> Subject {
        Subject {
            subject_id: id,
            medium: Some("English".to_string()),
            subject_name: name.to_string(),
            subject_category: category.to_string(),
        }
    }

    #[test]
    fn test_group_by_category() {
        let grouped = group_by_category(vec![
            subject(1, "Art", "C1"),
            subject(2, "Physics", "Science"),
            subject(3, "Music", "C1"),
        ]);

        assert_eq!(grouped.len(), 2);
        let c1: Vec<_> = grouped["C1"].iter().map(|s| s.subject_id).collect();
        assert_eq!(c1, vec![1, 3]);
        assert_eq!(grouped["Science"][0].subject_name, "Physics");
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_category(Vec::new()).is_empty());
    }
}
