//! School database queries.
//!
//! Records are create-once, read-many: there is an insert and a filtered
//! listing, and nothing that updates or deletes rows.

use rusqlite::{Connection, Row};
use schooldir_common::{Error, NewSchool, Result, School, SchoolFilter};

const SCHOOL_COLUMNS: &str = "id, name, address, city, state, contact, image, email_id";

/// Insert a school and return it with its assigned id.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `school` - Validated school with its stored image path
///
/// # Returns
///
/// * `Ok(School)` - The inserted record
/// * `Err(Error)` - If the table is missing or the insert fails
pub fn insert_school(conn: &Connection, school: &NewSchool) -> Result<School> {
    conn.execute(
        "INSERT INTO schools (name, address, city, state, contact, image, email_id)
         VALUES (:name, :address, :city, :state, :contact, :image, :email_id)",
        rusqlite::named_params! {
            ":name": school.name,
            ":address": school.address,
            ":city": school.city,
            ":state": school.state,
            ":contact": school.contact,
            ":image": school.image,
            ":email_id": school.email_id,
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(School {
        id: conn.last_insert_rowid(),
        name: school.name.clone(),
        address: school.address.clone(),
        city: school.city.clone(),
        state: school.state.clone(),
        contact: school.contact.clone(),
        image: school.image.clone(),
        email_id: school.email_id.clone(),
    })
}

/// List schools matching every given filter, newest first.
///
/// `search` is a literal, case-insensitive substring match on the name,
/// folded with the `fold_case` function so non-ASCII letters match too. The
/// connection must have [`crate::functions::register_functions`] applied,
/// which every pooled connection does. `city` and `state` are exact matches.
/// Blank filter values are ignored.
///
/// # Returns
///
/// * `Ok(Vec<School>)` - Matching schools ordered by descending id
/// * `Err(Error)` - If a database error occurs
pub fn list_schools(conn: &Connection, filter: &SchoolFilter) -> Result<Vec<School>> {
    let filter = filter.clone().normalized();

    let mut query = format!("SELECT {} FROM schools WHERE 1=1", SCHOOL_COLUMNS);

    let mut params: Vec<(&str, &dyn rusqlite::ToSql)> = Vec::new();

    if let Some(ref search) = filter.search {
        query.push_str(" AND instr(fold_case(name), fold_case(:search)) > 0");
        params.push((":search", search));
    }

    if let Some(ref city) = filter.city {
        query.push_str(" AND city = :city");
        params.push((":city", city));
    }

    if let Some(ref state) = filter.state {
        query.push_str(" AND state = :state");
        params.push((":state", state));
    }

    query.push_str(" ORDER BY id DESC");

    let mut stmt = conn
        .prepare(&query)
        .map_err(|e| Error::database(e.to_string()))?;

    let schools = stmt
        .query_map(&*params, parse_school_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(schools)
}

/// Count all stored schools.
pub fn count_schools(conn: &Connection) -> Result<u64> {
    conn.query_row("SELECT COUNT(*) FROM schools", [], |row| row.get::<_, i64>(0))
        .map(|n| n as u64)
        .map_err(|e| Error::database(e.to_string()))
}

fn parse_school_row(row: &Row<'_>) -> rusqlite::Result<School> {
    Ok(School {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        city: row.get(3)?,
        state: row.get(4)?,
        contact: row.get(5)?,
        image: row.get(6)?,
        email_id: row.get(7)?,
    })
}
