use diesel::prelude::*;

use crate::db::models::position::{NewPosition, Position};

pub struct PositionsRepo;

impl PositionsRepo {
    pub fn list(conn: &mut PgConnection) -> Result<Vec<Position>, diesel::result::Error> {
        use crate::schema::positions::dsl::*;
        positions.order(name.asc()).load::<Position>(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        position_id: i32,
    ) -> Result<Option<Position>, diesel::result::Error> {
        use crate::schema::positions::dsl::*;
        positions.find(position_id).first::<Position>(conn).optional()
    }

    /// Returns the position called `position_name`, creating it first if needed.
    pub fn get_or_create(
        conn: &mut PgConnection,
        position_name: &str,
    ) -> Result<Position, diesel::result::Error> {
        use crate::schema::positions::dsl::*;
        diesel::insert_into(positions)
            .values(&NewPosition { name: position_name })
            .on_conflict(name)
            .do_nothing()
            .execute(conn)?;
        positions.filter(name.eq(position_name)).first::<Position>(conn)
    }
}
