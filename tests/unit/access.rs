use std::collections::{HashMap, HashSet};

use projectflow::{
    access::{MembershipLookup, Resource, authorize, ensure_not_self_removal},
    error::{AppError, AppResult},
};

/// Team 1 = {10, 11} owns project 100 -> task 1000 -> comment 5000.
/// Team 2 = {20} owns project 200.
struct Org {
    members: HashMap<i32, HashSet<i32>>,
    projects: HashMap<i32, i32>,
    tasks: HashMap<i32, i32>,
    comments: HashMap<i32, i32>,
}

impl Org {
    fn sample() -> Self {
        Self {
            members: HashMap::from([(1, HashSet::from([10, 11])), (2, HashSet::from([20]))]),
            projects: HashMap::from([(100, 1), (200, 2)]),
            tasks: HashMap::from([(1000, 100)]),
            comments: HashMap::from([(5000, 1000)]),
        }
    }
}

impl MembershipLookup for Org {
    fn owning_team(&mut self, resource: Resource) -> AppResult<Option<i32>> {
        let project_team = |project: i32| self.projects.get(&project).copied();
        Ok(match resource {
            Resource::Team(id) => self.members.contains_key(&id).then_some(id),
            Resource::Project(id) => project_team(id),
            Resource::Task(id) => self.tasks.get(&id).and_then(|p| project_team(*p)),
            Resource::Comment(id) => self
                .comments
                .get(&id)
                .and_then(|t| self.tasks.get(t))
                .and_then(|p| project_team(*p)),
        })
    }

    fn is_member(&mut self, team_id: i32, employee_id: i32) -> AppResult<bool> {
        Ok(self
            .members
            .get(&team_id)
            .is_some_and(|members| members.contains(&employee_id)))
    }
}

#[test]
fn members_reach_every_level_of_their_team() {
    let mut org = Org::sample();
    assert_eq!(authorize(&mut org, 10, Resource::Team(1)).unwrap(), 1);
    assert_eq!(authorize(&mut org, 11, Resource::Project(100)).unwrap(), 1);
    assert_eq!(authorize(&mut org, 10, Resource::Task(1000)).unwrap(), 1);
    assert_eq!(authorize(&mut org, 11, Resource::Comment(5000)).unwrap(), 1);
}

#[test]
fn outsiders_are_forbidden() {
    let mut org = Org::sample();
    for resource in [
        Resource::Team(1),
        Resource::Project(100),
        Resource::Task(1000),
        Resource::Comment(5000),
    ] {
        assert!(matches!(
            authorize(&mut org, 20, resource),
            Err(AppError::Forbidden { .. })
        ));
    }
}

#[test]
fn missing_resources_are_not_found_even_for_outsiders() {
    let mut org = Org::sample();
    assert!(matches!(
        authorize(&mut org, 99, Resource::Task(4242)),
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        authorize(&mut org, 99, Resource::Team(3)),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
fn self_removal_is_a_field_error() {
    assert!(ensure_not_self_removal(10, 11).is_ok());
    let err = ensure_not_self_removal(10, 10).unwrap_err();
    assert_eq!(err.field_name(), Some("member"));
}
