use std::collections::HashMap;

use crate::models::{MemberSummary, ProjectRow, ProjectView};

/// Fold flat project/member join rows into one view per project.
///
/// Projects come out in first-occurrence order. Every row whose
/// `projectId` column is present adds a member to its project, in row
/// order and without deduplication; the project columns of later rows
/// for the same id are ignored.
pub fn group_project_rows<I>(rows: I) -> Vec<ProjectView>
where
    I: IntoIterator<Item = ProjectRow>,
{
    let mut views: Vec<ProjectView> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.id).or_insert_with(|| {
            views.push(ProjectView {
                id: row.id,
                name: row.name.clone(),
                created_date_time: row.created_date_time,
                created_by: row.created_by,
                updated_by: row.updated_by,
                is_active: row.is_active,
                members: Vec::new(),
            });
            views.len() - 1
        });

        if let Some(project_id) = row.project_id {
            views[slot].members.push(MemberSummary {
                project_id,
                member_id: row.member_id,
                member_name: row.member_name,
            });
        }
    }

    views
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: i64) -> ProjectRow {
        ProjectRow {
            id,
            name: format!("project-{}", id),
            created_date_time: None,
            created_by: 1,
            updated_by: None,
            is_active: true,
            project_id: None,
            member_id: None,
            member_name: None,
        }
    }

    fn with_member(id: i64, member_id: i64) -> ProjectRow {
        ProjectRow {
            project_id: Some(id),
            member_id: Some(member_id),
            member_name: Some(format!("user{}@example.com", member_id)),
            ..project(id)
        }
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(group_project_rows(Vec::new()).is_empty());
    }

    #[test]
    fn groups_members_under_their_project() {
        let rows = vec![
            with_member(1, 10),
            with_member(1, 11),
            with_member(1, 12),
            project(2),
        ];

        let views = group_project_rows(rows);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, 1);
        let ids: Vec<_> = views[0].members.iter().map(|m| m.member_id).collect();
        assert_eq!(ids, vec![Some(10), Some(11), Some(12)]);
        assert_eq!(views[1].id, 2);
        assert!(views[1].members.is_empty());
    }

    #[test]
    fn keeps_first_occurrence_order_for_interleaved_rows() {
        let rows = vec![
            with_member(3, 1),
            with_member(1, 2),
            with_member(3, 4),
            project(2),
            with_member(1, 5),
        ];

        let views = group_project_rows(rows);
        let order: Vec<_> = views.iter().map(|v| v.id).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(views[0].members.len(), 2);
        assert_eq!(views[1].members.len(), 2);
        assert_eq!(views[2].members.len(), 0);
    }

    #[test]
    fn duplicate_member_rows_are_kept() {
        let rows = vec![with_member(1, 10), with_member(1, 10)];
        let views = group_project_rows(rows);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].members.len(), 2);
        assert_eq!(views[0].members[0], views[0].members[1]);
    }

    #[test]
    fn rows_without_project_id_contribute_no_member() {
        let mut partial = project(1);
        partial.member_id = Some(99);
        partial.member_name = Some("orphan@example.com".to_string());

        let views = group_project_rows(vec![partial, with_member(1, 10)]);
        assert_eq!(views[0].members.len(), 1);
        assert_eq!(views[0].members[0].member_id, Some(10));
    }

    #[test]
    fn project_fields_come_from_first_row() {
        let mut first = with_member(1, 10);
        first.name = "Apollo".to_string();
        let mut second = with_member(1, 11);
        second.name = "Renamed".to_string();

        let views = group_project_rows(vec![first, second]);
        assert_eq!(views[0].name, "Apollo");
    }

    #[test]
    fn counts_match_for_mixed_input() {
        let rows = vec![
            with_member(1, 1),
            project(2),
            with_member(3, 1),
            with_member(1, 2),
            project(3),
            with_member(2, 9),
        ];
        let expected_members = [(1, 2), (2, 1), (3, 1)];

        let views = group_project_rows(rows);
        assert_eq!(views.len(), 3);
        for (id, count) in expected_members {
            let view = views.iter().find(|v| v.id == id).unwrap();
            assert_eq!(view.members.len(), count, "project {}", id);
        }
    }
}
