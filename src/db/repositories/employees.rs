use diesel::prelude::*;

use crate::db::models::employee::{Employee, EmployeeBasicInfo, EmployeeChanges, NewEmployee};
use crate::db::models::position::Position;
use crate::error::AppResult;
use crate::resolver::EntityLookup;
use crate::schema::{employees, positions};

pub struct EmployeeRepo;

impl EmployeeRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        employee_id: i32,
    ) -> Result<Option<Employee>, diesel::result::Error> {
        employees::table
            .find(employee_id)
            .select(Employee::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_active_by_id(
        conn: &mut PgConnection,
        employee_id: i32,
    ) -> Result<Option<Employee>, diesel::result::Error> {
        employees::table
            .find(employee_id)
            .filter(employees::is_active.eq(true))
            .select(Employee::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_username(
        conn: &mut PgConnection,
        target_username: &str,
    ) -> Result<Option<Employee>, diesel::result::Error> {
        employees::table
            .filter(employees::username.eq(target_username))
            .select(Employee::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        target_email: &str,
    ) -> Result<Option<Employee>, diesel::result::Error> {
        employees::table
            .filter(employees::email.eq(target_email))
            .select(Employee::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists(conn: &mut PgConnection, employee_id: i32) -> Result<bool, diesel::result::Error> {
        diesel::select(diesel::dsl::exists(employees::table.find(employee_id))).get_result(conn)
    }

    /// Whether another employee (not `except_id`) already uses `target_username`.
    pub fn username_taken(
        conn: &mut PgConnection,
        target_username: &str,
        except_id: Option<i32>,
    ) -> Result<bool, diesel::result::Error> {
        let mut query = employees::table
            .filter(employees::username.eq(target_username))
            .into_boxed();
        if let Some(id) = except_id {
            query = query.filter(employees::id.ne(id));
        }
        diesel::select(diesel::dsl::exists(query)).get_result(conn)
    }

    pub fn email_taken(
        conn: &mut PgConnection,
        target_email: &str,
        except_id: Option<i32>,
    ) -> Result<bool, diesel::result::Error> {
        let mut query = employees::table
            .filter(employees::email.eq(target_email))
            .into_boxed();
        if let Some(id) = except_id {
            query = query.filter(employees::id.ne(id));
        }
        diesel::select(diesel::dsl::exists(query)).get_result(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_employee: &NewEmployee,
    ) -> Result<Employee, diesel::result::Error> {
        diesel::insert_into(employees::table)
            .values(new_employee)
            .returning(Employee::as_returning())
            .get_result(conn)
    }

    pub fn update_profile(
        conn: &mut PgConnection,
        employee_id: i32,
        changes: &EmployeeChanges,
    ) -> Result<Employee, diesel::result::Error> {
        diesel::update(employees::table.find(employee_id))
            .set(changes)
            .returning(Employee::as_returning())
            .get_result(conn)
    }

    pub fn update_password(
        conn: &mut PgConnection,
        employee_id: i32,
        new_hash: &str,
    ) -> Result<usize, diesel::result::Error> {
        diesel::update(employees::table.find(employee_id))
            .set(employees::password_hash.eq(new_hash))
            .execute(conn)
    }

    pub fn with_position(
        conn: &mut PgConnection,
        employee_id: i32,
    ) -> Result<Option<EmployeeBasicInfo>, diesel::result::Error> {
        let row = employees::table
            .left_join(positions::table)
            .filter(employees::id.eq(employee_id))
            .select((Employee::as_select(), positions::all_columns.nullable()))
            .first::<(Employee, Option<Position>)>(conn)
            .optional()?;
        Ok(row.map(|(employee, position)| EmployeeBasicInfo::from_parts(employee, position)))
    }

    pub fn find_by_ids(
        conn: &mut PgConnection,
        ids: &[i32],
    ) -> Result<Vec<Employee>, diesel::result::Error> {
        employees::table
            .filter(employees::id.eq_any(ids))
            .select(Employee::as_select())
            .order(employees::id.asc())
            .load(conn)
    }
}

/// Employee lookup for the id-list resolver.
pub struct EmployeeDirectory<'a>(pub &'a mut PgConnection);

impl EntityLookup for EmployeeDirectory<'_> {
    type Entity = Employee;

    fn find_by_ids(&mut self, ids: &[i32]) -> AppResult<Vec<Employee>> {
        Ok(EmployeeRepo::find_by_ids(self.0, ids)?)
    }
}
