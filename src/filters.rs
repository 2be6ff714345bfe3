//! Query-string filters for the list views.

use serde::Deserialize;

use crate::db::enums::TaskPriority;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        match raw.map(str::trim).unwrap_or("") {
            "" | "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(AppError::field(
                "status",
                format!("Select a valid choice. {} is not one of the available choices.", other),
            )),
        }
    }

    /// Value the `is_completed` column must have, if any.
    pub fn is_completed(&self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(false),
            StatusFilter::Completed => Some(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(TaskPriority),
}

impl PriorityFilter {
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        match raw.map(str::trim).unwrap_or("") {
            "" | "all" => Ok(PriorityFilter::All),
            other => other.parse::<TaskPriority>().map(PriorityFilter::Only).map_err(|_| {
                AppError::field(
                    "priority",
                    format!("Select a valid choice. {} is not one of the available choices.", other),
                )
            }),
        }
    }

    pub fn priority(&self) -> Option<TaskPriority> {
        match self {
            PriorityFilter::All => None,
            PriorityFilter::Only(priority) => Some(*priority),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamFilter {
    #[default]
    All,
    Team(i32),
}

impl TeamFilter {
    /// Only teams listed in `allowed` (the requester's own) are selectable.
    pub fn parse(raw: Option<&str>, allowed: &[i32]) -> AppResult<Self> {
        let invalid = || AppError::field("team", "Select a valid team.");
        match raw.map(str::trim).unwrap_or("") {
            "" | "all" => Ok(TeamFilter::All),
            other => {
                let id = other.parse::<i32>().map_err(|_| invalid())?;
                if allowed.contains(&id) {
                    Ok(TeamFilter::Team(id))
                } else {
                    Err(invalid())
                }
            }
        }
    }

    pub fn team_id(&self) -> Option<i32> {
        match self {
            TeamFilter::All => None,
            TeamFilter::Team(id) => Some(*id),
        }
    }
}

#[derive(Deserialize, Default, Debug)]
pub struct StatusQuery {
    pub status: Option<String>,
    pub page: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
pub struct TaskFilterQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub team: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    pub team: TeamFilter,
}

impl TaskFilter {
    pub fn from_query(query: &TaskFilterQuery, member_team_ids: &[i32]) -> AppResult<Self> {
        Ok(Self {
            status: StatusFilter::parse(query.status.as_deref())?,
            priority: PriorityFilter::parse(query.priority.as_deref())?,
            team: TeamFilter::parse(query.team.as_deref(), member_team_ids)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_completion_predicate() {
        assert_eq!(StatusFilter::parse(None).unwrap().is_completed(), None);
        assert_eq!(StatusFilter::parse(Some("all")).unwrap().is_completed(), None);
        assert_eq!(StatusFilter::parse(Some("active")).unwrap().is_completed(), Some(false));
        assert_eq!(
            StatusFilter::parse(Some("completed")).unwrap().is_completed(),
            Some(true)
        );
        assert!(StatusFilter::parse(Some("done")).is_err());
    }

    #[test]
    fn priority_matches_enumeration_exactly() {
        assert_eq!(PriorityFilter::parse(Some("all")).unwrap(), PriorityFilter::All);
        assert_eq!(
            PriorityFilter::parse(Some("urgent")).unwrap().priority(),
            Some(TaskPriority::Urgent)
        );
        let err = PriorityFilter::parse(Some("U")).unwrap_err();
        assert_eq!(err.field_name(), Some("priority"));
    }

    #[test]
    fn team_is_restricted_to_membership() {
        let mine = [3, 7];
        assert_eq!(TeamFilter::parse(Some("7"), &mine).unwrap().team_id(), Some(7));
        assert_eq!(TeamFilter::parse(Some("all"), &mine).unwrap(), TeamFilter::All);
        assert!(TeamFilter::parse(Some("8"), &mine).is_err());
        assert!(TeamFilter::parse(Some("seven"), &mine).is_err());
    }

    #[test]
    fn combined_filter_from_query() {
        let query = TaskFilterQuery {
            status: Some("active".into()),
            priority: Some("low".into()),
            team: Some("3".into()),
            page: None,
        };
        let filter = TaskFilter::from_query(&query, &[3]).unwrap();
        assert_eq!(filter.status, StatusFilter::Active);
        assert_eq!(filter.priority, PriorityFilter::Only(TaskPriority::Low));
        assert_eq!(filter.team, TeamFilter::Team(3));

        assert_eq!(
            TaskFilter::from_query(&TaskFilterQuery::default(), &[]).unwrap(),
            TaskFilter::default()
        );
    }
}
