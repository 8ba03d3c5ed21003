//! Spatial scalar functions for SQLite.
//!
//! SQLite has no native point type; points are stored as WKT text
//! (`POINT(lat lon)`) and these functions operate on that text.
//!
//! # Invariants
//! - Functions are deterministic and return `NULL` for unparseable input.

use super::DbResult;
use crate::geo::coordinates::Coordinates;
use crate::spatial::wkt::parse_point_literal;
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::Connection;

/// Registers `st_distance(a, b)`, `st_x(p)` and `st_y(p)` on `conn`.
pub fn register_spatial_functions(conn: &Connection) -> DbResult<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;

    conn.create_scalar_function("st_distance", 2, flags, |ctx| {
        let from = point_arg(ctx, 0)?;
        let to = point_arg(ctx, 1)?;
        Ok(from.zip(to).map(|(from, to)| planar_distance(from, to)))
    })?;
    conn.create_scalar_function("st_x", 1, flags, |ctx| {
        Ok(point_arg(ctx, 0)?.map(|point| point.lat))
    })?;
    conn.create_scalar_function("st_y", 1, flags, |ctx| {
        Ok(point_arg(ctx, 0)?.map(|point| point.lon))
    })?;

    Ok(())
}

fn point_arg(ctx: &Context<'_>, index: usize) -> rusqlite::Result<Option<Coordinates>> {
    let value = ctx.get::<Option<String>>(index)?;
    Ok(value.as_deref().and_then(parse_point_literal))
}

/// Euclidean distance in degrees.
fn planar_distance(from: Coordinates, to: Coordinates) -> f64 {
    (from.lat - to.lat).hypot(from.lon - to.lon)
}
