//! Deterministic depth-first traversal of the task catalog.
//!
//! Order: top-level groupings in catalog order; within a grouping its own
//! tasks first, then its nested sub-sections. Each task is visited before
//! its own `sub_tasks` (pre-order). Source order is preserved at every level.

use std::convert::Infallible;

use crate::catalog::{Catalog, Grouping, TaskNode};

/// Visit every task node in traversal order, stopping at the first error.
///
/// `depth` is 0 for tasks owned directly by a top-level grouping and grows by
/// one per nested sub-section or sub-task level.
pub fn try_for_each_task<'a, E, F>(catalog: &'a Catalog, mut visit: F) -> Result<(), E>
where
    F: FnMut(&'a TaskNode, usize) -> Result<(), E>,
{
    for grouping in &catalog.groupings {
        walk_grouping(grouping, 0, &mut visit)?;
    }
    Ok(())
}

/// Infallible variant of [`try_for_each_task`].
pub fn for_each_task<'a, F>(catalog: &'a Catalog, mut visit: F)
where
    F: FnMut(&'a TaskNode, usize),
{
    let result: Result<(), Infallible> = try_for_each_task(catalog, |task, depth| {
        visit(task, depth);
        Ok(())
    });
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

fn walk_grouping<'a, E, F>(grouping: &'a Grouping, depth: usize, visit: &mut F) -> Result<(), E>
where
    F: FnMut(&'a TaskNode, usize) -> Result<(), E>,
{
    for task in &grouping.tasks {
        walk_task(task, depth, visit)?;
    }
    for section in &grouping.sub_sections {
        walk_grouping(section, depth + 1, visit)?;
    }
    Ok(())
}

fn walk_task<'a, E, F>(task: &'a TaskNode, depth: usize, visit: &mut F) -> Result<(), E>
where
    F: FnMut(&'a TaskNode, usize) -> Result<(), E>,
{
    visit(task, depth)?;
    for sub_task in &task.sub_tasks {
        walk_task(sub_task, depth + 1, visit)?;
    }
    Ok(())
}

/// Ids of every reachable task, in traversal order.
pub fn task_ids(catalog: &Catalog) -> Vec<&str> {
    let mut ids = Vec::new();
    for_each_task(catalog, |task, _| ids.push(task.id.as_str()));
    ids
}

/// Number of task nodes reachable through tasks, sub-tasks and sub-sections.
pub fn count_tasks(catalog: &Catalog) -> usize {
    let mut count = 0;
    for_each_task(catalog, |_, _| count += 1);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{grouping, grouping_with_sections, task, task_with_subtasks};

    #[test]
    fn own_tasks_before_sub_sections_and_parent_before_sub_tasks() {
        let catalog = Catalog::new(vec![
            grouping_with_sections(
                "first",
                vec![task_with_subtasks("a", "NOT_STARTED", vec![task("a1", "FINISHED")])],
                vec![grouping("nested", vec![task("b", "STARTED")])],
            ),
            grouping("second", vec![task("c", "FINISHED"), task("d", "FINISHED")]),
        ]);

        assert_eq!(task_ids(&catalog), vec!["a", "a1", "b", "c", "d"]);
    }

    #[test]
    fn depth_counts_sections_and_sub_tasks() {
        let catalog = Catalog::new(vec![grouping_with_sections(
            "root",
            vec![task_with_subtasks("a", "FINISHED", vec![task("a1", "FINISHED")])],
            vec![grouping_with_sections(
                "l1",
                Vec::new(),
                vec![grouping("l2", vec![task("deep", "FINISHED")])],
            )],
        )]);

        let mut depths = Vec::new();
        for_each_task(&catalog, |task, depth| depths.push((task.id.clone(), depth)));
        assert_eq!(
            depths,
            vec![
                ("a".to_string(), 0),
                ("a1".to_string(), 1),
                ("deep".to_string(), 2),
            ]
        );
    }

    #[test]
    fn empty_groupings_contribute_nothing() {
        let catalog = Catalog::new(vec![
            grouping("empty", Vec::new()),
            grouping_with_sections("hollow", Vec::new(), vec![grouping("inner", Vec::new())]),
        ]);
        assert_eq!(count_tasks(&catalog), 0);
    }

    #[test]
    fn try_for_each_stops_at_first_error() {
        let catalog = Catalog::new(vec![grouping(
            "g",
            vec![task("a", "FINISHED"), task("b", "FINISHED"), task("c", "FINISHED")],
        )]);

        let mut seen = Vec::new();
        let result = try_for_each_task(&catalog, |task, _| {
            if task.id == "b" {
                return Err("boom");
            }
            seen.push(task.id.clone());
            Ok(())
        });

        assert_eq!(result, Err("boom"));
        assert_eq!(seen, vec!["a".to_string()]);
    }
}
