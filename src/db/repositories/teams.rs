use std::collections::HashMap;

use diesel::prelude::*;

use super::projects::ProjectsRepo;
use crate::db::models::employee::{Employee, EmployeeBasicInfo};
use crate::db::models::position::Position;
use crate::db::models::team::{NewTeam, NewTeamMember, Team};
use crate::schema::{employees, positions, projects, team_members, teams};

pub struct TeamsRepo;

impl TeamsRepo {
    pub fn find_by_id(conn: &mut PgConnection, team_id: i32) -> Result<Option<Team>, diesel::result::Error> {
        teams::table
            .find(team_id)
            .select(Team::as_select())
            .first(conn)
            .optional()
    }

    pub fn name_taken(
        conn: &mut PgConnection,
        team_name: &str,
        except_id: Option<i32>,
    ) -> Result<bool, diesel::result::Error> {
        let mut query = teams::table.filter(teams::name.eq(team_name)).into_boxed();
        if let Some(id) = except_id {
            query = query.filter(teams::id.ne(id));
        }
        diesel::select(diesel::dsl::exists(query)).get_result(conn)
    }

    pub fn insert(conn: &mut PgConnection, new_team: &NewTeam) -> Result<Team, diesel::result::Error> {
        diesel::insert_into(teams::table)
            .values(new_team)
            .returning(Team::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        team_id: i32,
        team_name: &str,
        team_description: &str,
    ) -> Result<Team, diesel::result::Error> {
        diesel::update(teams::table.find(team_id))
            .set((
                teams::name.eq(team_name),
                teams::description.eq(team_description),
            ))
            .returning(Team::as_returning())
            .get_result(conn)
    }

    /// Replaces the whole member set of `team_id`.
    pub fn set_members(
        conn: &mut PgConnection,
        team_id: i32,
        employee_ids: &[i32],
    ) -> Result<(), diesel::result::Error> {
        diesel::delete(team_members::table.filter(team_members::team_id.eq(team_id)))
            .execute(conn)?;
        let rows: Vec<NewTeamMember> = employee_ids
            .iter()
            .map(|&employee_id| NewTeamMember {
                team_id,
                employee_id,
            })
            .collect();
        if !rows.is_empty() {
            diesel::insert_into(team_members::table)
                .values(&rows)
                .execute(conn)?;
        }
        Ok(())
    }

    pub fn add_member(
        conn: &mut PgConnection,
        team_id: i32,
        employee_id: i32,
    ) -> Result<usize, diesel::result::Error> {
        diesel::insert_into(team_members::table)
            .values(&NewTeamMember {
                team_id,
                employee_id,
            })
            .on_conflict_do_nothing()
            .execute(conn)
    }

    pub fn remove_member(
        conn: &mut PgConnection,
        team_id: i32,
        employee_id: i32,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(
            team_members::table
                .filter(team_members::team_id.eq(team_id))
                .filter(team_members::employee_id.eq(employee_id)),
        )
        .execute(conn)
    }

    pub fn members(
        conn: &mut PgConnection,
        team_id: i32,
    ) -> Result<Vec<EmployeeBasicInfo>, diesel::result::Error> {
        let rows = team_members::table
            .inner_join(employees::table.left_join(positions::table))
            .filter(team_members::team_id.eq(team_id))
            .order(employees::username.asc())
            .select((Employee::as_select(), positions::all_columns.nullable()))
            .load::<(Employee, Option<Position>)>(conn)?;
        Ok(rows
            .into_iter()
            .map(|(employee, position)| EmployeeBasicInfo::from_parts(employee, position))
            .collect())
    }

    /// Ids of every team `employee_id` belongs to.
    pub fn ids_for_employee(
        conn: &mut PgConnection,
        employee_id: i32,
    ) -> Result<Vec<i32>, diesel::result::Error> {
        team_members::table
            .filter(team_members::employee_id.eq(employee_id))
            .select(team_members::team_id)
            .order(team_members::team_id.asc())
            .load(conn)
    }

    pub fn count_for_employee(
        conn: &mut PgConnection,
        employee_id: i32,
    ) -> Result<i64, diesel::result::Error> {
        team_members::table
            .filter(team_members::employee_id.eq(employee_id))
            .count()
            .get_result(conn)
    }

    pub fn list_for_employee(
        conn: &mut PgConnection,
        employee_id: i32,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Team>, diesel::result::Error> {
        teams::table
            .inner_join(team_members::table)
            .filter(team_members::employee_id.eq(employee_id))
            .select(Team::as_select())
            .order((teams::name.asc(), teams::id.asc()))
            .offset(offset)
            .limit(limit)
            .load(conn)
    }

    pub fn member_counts(
        conn: &mut PgConnection,
        team_ids: &[i32],
    ) -> Result<HashMap<i32, i64>, diesel::result::Error> {
        let rows = team_members::table
            .filter(team_members::team_id.eq_any(team_ids))
            .group_by(team_members::team_id)
            .select((team_members::team_id, diesel::dsl::count_star()))
            .load::<(i32, i64)>(conn)?;
        Ok(rows.into_iter().collect())
    }

    /// Deletes the team with its projects, their tasks, the tasks' comments
    /// and assignments, and the member rows. Run inside a transaction.
    pub fn delete_cascade(conn: &mut PgConnection, team_id: i32) -> Result<usize, diesel::result::Error> {
        let project_ids: Vec<i32> = projects::table
            .filter(projects::team_id.eq(team_id))
            .select(projects::id)
            .load(conn)?;
        ProjectsRepo::delete_cascade(conn, &project_ids)?;
        diesel::delete(team_members::table.filter(team_members::team_id.eq(team_id)))
            .execute(conn)?;
        diesel::delete(teams::table.find(team_id)).execute(conn)
    }
}
