use std::collections::BTreeMap;

use diesel::{
    r2d2::{self, ConnectionManager},
    SqliteConnection,
};

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Field name to the list of problems found with it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;
