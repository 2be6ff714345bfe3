use diesel::prelude::*;

use super::tasks::TasksRepo;
use crate::db::models::project::{Project, ProjectForm};
use crate::db::models::team::Team;
use crate::schema::{projects, teams};

pub struct ProjectsRepo;

impl ProjectsRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        project_id: i32,
    ) -> Result<Option<Project>, diesel::result::Error> {
        projects::table
            .find(project_id)
            .select(Project::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_with_team(
        conn: &mut PgConnection,
        project_id: i32,
    ) -> Result<Option<(Project, Team)>, diesel::result::Error> {
        projects::table
            .inner_join(teams::table)
            .filter(projects::id.eq(project_id))
            .select((Project::as_select(), Team::as_select()))
            .first(conn)
            .optional()
    }

    pub fn name_taken(
        conn: &mut PgConnection,
        project_name: &str,
        except_id: Option<i32>,
    ) -> Result<bool, diesel::result::Error> {
        let mut query = projects::table
            .filter(projects::name.eq(project_name))
            .into_boxed();
        if let Some(id) = except_id {
            query = query.filter(projects::id.ne(id));
        }
        diesel::select(diesel::dsl::exists(query)).get_result(conn)
    }

    pub fn insert(conn: &mut PgConnection, form: &ProjectForm) -> Result<Project, diesel::result::Error> {
        diesel::insert_into(projects::table)
            .values(form)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        project_id: i32,
        form: &ProjectForm,
    ) -> Result<Project, diesel::result::Error> {
        diesel::update(projects::table.find(project_id))
            .set(form)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    /// Whether `project_id` is owned by one of `team_ids`.
    pub fn belongs_to_teams(
        conn: &mut PgConnection,
        project_id: i32,
        team_ids: &[i32],
    ) -> Result<bool, diesel::result::Error> {
        diesel::select(diesel::dsl::exists(
            projects::table
                .filter(projects::id.eq(project_id))
                .filter(projects::team_id.eq_any(team_ids)),
        ))
        .get_result(conn)
    }

    pub fn count_for_teams(
        conn: &mut PgConnection,
        team_ids: &[i32],
        is_completed: Option<bool>,
    ) -> Result<i64, diesel::result::Error> {
        let mut query = projects::table
            .filter(projects::team_id.eq_any(team_ids))
            .select(diesel::dsl::count_star())
            .into_boxed();
        if let Some(done) = is_completed {
            query = query.filter(projects::is_completed.eq(done));
        }
        query.first(conn)
    }

    pub fn list_for_teams(
        conn: &mut PgConnection,
        team_ids: &[i32],
        is_completed: Option<bool>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<(Project, Team)>, diesel::result::Error> {
        let mut query = projects::table
            .inner_join(teams::table)
            .filter(projects::team_id.eq_any(team_ids))
            .select((Project::as_select(), Team::as_select()))
            .into_boxed();
        if let Some(done) = is_completed {
            query = query.filter(projects::is_completed.eq(done));
        }
        query
            .order((projects::deadline.asc(), projects::id.asc()))
            .offset(offset)
            .limit(limit)
            .load(conn)
    }

    pub fn count_by_team(conn: &mut PgConnection, team_id: i32) -> Result<i64, diesel::result::Error> {
        projects::table
            .filter(projects::team_id.eq(team_id))
            .count()
            .get_result(conn)
    }

    pub fn list_by_team(
        conn: &mut PgConnection,
        team_id: i32,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Project>, diesel::result::Error> {
        projects::table
            .filter(projects::team_id.eq(team_id))
            .select(Project::as_select())
            .order((projects::deadline.asc(), projects::id.asc()))
            .offset(offset)
            .limit(limit)
            .load(conn)
    }

    /// `(active, finished)` project counts across `team_ids`.
    pub fn completion_counts(
        conn: &mut PgConnection,
        team_ids: &[i32],
    ) -> Result<(i64, i64), diesel::result::Error> {
        let rows = projects::table
            .filter(projects::team_id.eq_any(team_ids))
            .group_by(projects::is_completed)
            .select((projects::is_completed, diesel::dsl::count_star()))
            .load::<(bool, i64)>(conn)?;
        Ok(split_counts(&rows))
    }

    /// Deletes the projects together with their tasks and the tasks'
    /// dependents. Run inside a transaction.
    pub fn delete_cascade(
        conn: &mut PgConnection,
        project_ids: &[i32],
    ) -> Result<usize, diesel::result::Error> {
        if project_ids.is_empty() {
            return Ok(0);
        }
        let task_ids = TasksRepo::ids_for_projects(conn, project_ids)?;
        TasksRepo::delete_cascade(conn, &task_ids)?;
        diesel::delete(projects::table.filter(projects::id.eq_any(project_ids))).execute(conn)
    }
}

/// Folds `(is_completed, count)` rows into `(active, finished)`.
pub(crate) fn split_counts(rows: &[(bool, i64)]) -> (i64, i64) {
    rows.iter()
        .fold((0, 0), |(active, finished), &(done, count)| {
            if done {
                (active, finished + count)
            } else {
                (active + count, finished)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::split_counts;

    #[test]
    fn split_counts_handles_missing_groups() {
        assert_eq!(split_counts(&[]), (0, 0));
        assert_eq!(split_counts(&[(true, 3)]), (0, 3));
        assert_eq!(split_counts(&[(false, 2), (true, 5)]), (2, 5));
    }
}
