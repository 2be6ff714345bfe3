use diesel::prelude::*;

use crate::access::{MembershipLookup, Resource};
use crate::error::AppResult;
use crate::schema::{comments, projects, tasks, team_members, teams};

impl MembershipLookup for PgConnection {
    fn owning_team(&mut self, resource: Resource) -> AppResult<Option<i32>> {
        let team_id = match resource {
            Resource::Team(id) => teams::table
                .find(id)
                .select(teams::id)
                .first::<i32>(self)
                .optional()?,
            Resource::Project(id) => projects::table
                .find(id)
                .select(projects::team_id)
                .first::<i32>(self)
                .optional()?,
            Resource::Task(id) => tasks::table
                .inner_join(projects::table)
                .filter(tasks::id.eq(id))
                .select(projects::team_id)
                .first::<i32>(self)
                .optional()?,
            Resource::Comment(id) => comments::table
                .inner_join(tasks::table.inner_join(projects::table))
                .filter(comments::id.eq(id))
                .select(projects::team_id)
                .first::<i32>(self)
                .optional()?,
        };
        Ok(team_id)
    }

    fn is_member(&mut self, team_id: i32, employee_id: i32) -> AppResult<bool> {
        let exists = diesel::select(diesel::dsl::exists(
            team_members::table
                .filter(team_members::team_id.eq(team_id))
                .filter(team_members::employee_id.eq(employee_id)),
        ))
        .get_result(self)?;
        Ok(exists)
    }
}
