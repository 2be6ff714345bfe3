//! Membership-based authorization.
//!
//! Every detail or mutating operation on a team, project, task or comment
//! walks the ownership chain up to the owning team and requires the caller
//! to be one of that team's members. The check is expressed over
//! [`MembershipLookup`] so it does not depend on the storage engine; the
//! diesel implementation lives in `db::repositories::membership`.

use std::fmt;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Team(i32),
    Project(i32),
    Task(i32),
    Comment(i32),
}

impl Resource {
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Team(_) => "Team",
            Resource::Project(_) => "Project",
            Resource::Task(_) => "Task",
            Resource::Comment(_) => "Comment",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Team(id)
            | Resource::Project(id)
            | Resource::Task(id)
            | Resource::Comment(id) => write!(f, "{} {}", self.kind(), id),
        }
    }
}

pub trait MembershipLookup {
    /// Id of the team that transitively owns `resource`, or `None` when the
    /// resource does not exist.
    fn owning_team(&mut self, resource: Resource) -> AppResult<Option<i32>>;

    fn is_member(&mut self, team_id: i32, employee_id: i32) -> AppResult<bool>;
}

/// Returns the owning team id when `employee_id` may act on `resource`.
///
/// A missing resource is reported as not found before membership is
/// considered; a non-member gets a generic forbidden error.
pub fn authorize<L>(lookup: &mut L, employee_id: i32, resource: Resource) -> AppResult<i32>
where
    L: MembershipLookup + ?Sized,
{
    let team_id = lookup
        .owning_team(resource)?
        .ok_or_else(|| AppError::not_found(resource.kind()))?;

    if !lookup.is_member(team_id, employee_id)? {
        tracing::warn!(employee_id, team_id, resource = %resource, "Access denied");
        return Err(AppError::forbidden());
    }

    Ok(team_id)
}

/// The member-removal path never removes the caller.
pub fn ensure_not_self_removal(actor_id: i32, member_id: i32) -> AppResult<()> {
    if actor_id == member_id {
        return Err(AppError::field(
            "member",
            "You cannot delete yourself from the team.",
        ));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::{HashMap, HashSet};

    use super::*;

    /// Ownership graph kept in maps, for exercising the guard without a database.
    #[derive(Default)]
    pub struct MemoryMembership {
        pub members: HashMap<i32, HashSet<i32>>,
        pub projects: HashMap<i32, i32>,
        pub tasks: HashMap<i32, i32>,
        pub comments: HashMap<i32, i32>,
    }

    impl MemoryMembership {
        pub fn team(mut self, team_id: i32, members: &[i32]) -> Self {
            self.members
                .insert(team_id, members.iter().copied().collect());
            self
        }

        pub fn project(mut self, project_id: i32, team_id: i32) -> Self {
            self.projects.insert(project_id, team_id);
            self
        }

        pub fn task(mut self, task_id: i32, project_id: i32) -> Self {
            self.tasks.insert(task_id, project_id);
            self
        }

        pub fn comment(mut self, comment_id: i32, task_id: i32) -> Self {
            self.comments.insert(comment_id, task_id);
            self
        }
    }

    impl MembershipLookup for MemoryMembership {
        fn owning_team(&mut self, resource: Resource) -> AppResult<Option<i32>> {
            let team = match resource {
                Resource::Team(id) => self.members.contains_key(&id).then_some(id),
                Resource::Project(id) => self.projects.get(&id).copied(),
                Resource::Task(id) => self
                    .tasks
                    .get(&id)
                    .and_then(|project| self.projects.get(project).copied()),
                Resource::Comment(id) => self
                    .comments
                    .get(&id)
                    .and_then(|task| self.tasks.get(task))
                    .and_then(|project| self.projects.get(project).copied()),
            };
            Ok(team)
        }

        fn is_member(&mut self, team_id: i32, employee_id: i32) -> AppResult<bool> {
            Ok(self
                .members
                .get(&team_id)
                .is_some_and(|members| members.contains(&employee_id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryMembership;
    use super::*;

    fn graph() -> MemoryMembership {
        MemoryMembership::default()
            .team(1, &[10, 11])
            .team(2, &[20])
            .project(100, 1)
            .project(200, 2)
            .task(1000, 100)
            .task(2000, 200)
            .comment(5, 1000)
    }

    #[test]
    fn member_is_allowed_on_every_level() {
        let mut lookup = graph();
        assert_eq!(authorize(&mut lookup, 10, Resource::Team(1)).unwrap(), 1);
        assert_eq!(authorize(&mut lookup, 11, Resource::Project(100)).unwrap(), 1);
        assert_eq!(authorize(&mut lookup, 10, Resource::Task(1000)).unwrap(), 1);
        assert_eq!(authorize(&mut lookup, 11, Resource::Comment(5)).unwrap(), 1);
    }

    #[test]
    fn non_member_is_forbidden() {
        let mut lookup = graph();
        for resource in [
            Resource::Team(1),
            Resource::Project(100),
            Resource::Task(1000),
            Resource::Comment(5),
        ] {
            let err = authorize(&mut lookup, 20, resource).unwrap_err();
            assert!(matches!(err, AppError::Forbidden { .. }), "{resource}");
        }
    }

    #[test]
    fn missing_resource_is_not_found_before_membership() {
        let mut lookup = graph();
        let err = authorize(&mut lookup, 10, Resource::Team(99)).unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err = authorize(&mut lookup, 10, Resource::Task(42)).unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn self_removal_is_a_field_error() {
        let err = ensure_not_self_removal(10, 10).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.field_name(), Some("member"));
        assert!(ensure_not_self_removal(10, 11).is_ok());
    }
}
