//! Semantic checks on a fetched catalog.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::core::walk::for_each_task;

/// Check catalog invariants the wire format does not enforce:
/// - Task ids are non-empty
/// - Task ids are unique across the whole catalog
///
/// Violations are reported, never fixed; the catalog is owned by the service.
pub fn validate_catalog(catalog: &Catalog) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for_each_task(catalog, |task, _| {
        if task.id.trim().is_empty() {
            errors.push(format!("task '{}' has an empty id", task.title));
            return;
        }
        if !seen.insert(task.id.as_str()) {
            errors.push(format!("duplicate id '{}' ({})", task.id, task.title));
        }
    });
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{grouping, task, task_with_subtasks};

    #[test]
    fn reports_duplicate_and_empty_ids() {
        let catalog = Catalog::new(vec![
            grouping(
                "a",
                vec![task_with_subtasks("dup", "FINISHED", vec![task("", "FINISHED")])],
            ),
            grouping("b", vec![task("dup", "STARTED")]),
        ]);

        let errors = validate_catalog(&catalog);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|err| err.contains("empty id")));
        assert!(errors.iter().any(|err| err.contains("duplicate id 'dup'")));
    }

    #[test]
    fn clean_catalog_has_no_errors() {
        let catalog = Catalog::new(vec![grouping(
            "a",
            vec![task("one", "FINISHED"), task("two", "NOT_STARTED")],
        )]);
        assert!(validate_catalog(&catalog).is_empty());
    }
}
