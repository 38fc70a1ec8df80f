use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use crate::entities::{Accommodation, Activity, Destination, Itinerary, PackingItem, User};

/// Storage format for date columns.
const DATE_FMT: &str = "%Y-%m-%d";

// ============================================================================
// Schema
// ============================================================================

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS itineraries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS destinations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            itinerary_id INTEGER NOT NULL REFERENCES itineraries(id) ON DELETE CASCADE,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS activities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            destination_id INTEGER NOT NULL REFERENCES destinations(id) ON DELETE CASCADE,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS accommodations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            check_in_date TEXT NOT NULL,
            check_out_date TEXT NOT NULL,
            price REAL NOT NULL,
            destination_id INTEGER NOT NULL REFERENCES destinations(id) ON DELETE CASCADE,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS packing_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_name TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1,
            packed INTEGER NOT NULL DEFAULT 0,
            itinerary_id INTEGER NOT NULL REFERENCES itineraries(id) ON DELETE CASCADE,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_itineraries_user ON itineraries(user_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_destinations_itinerary ON destinations(itinerary_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_activities_destination ON activities(destination_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_accommodations_destination ON accommodations(destination_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_packing_items_itinerary ON packing_items(itinerary_id)",
        [],
    )?;

    Ok(())
}

/// Drop all tables and recreate them. Used by seeding.
pub fn reset_database(conn: &Connection) -> Result<()> {
    for table in [
        "packing_items",
        "accommodations",
        "activities",
        "destinations",
        "itineraries",
        "users",
    ] {
        conn.execute(&format!("DROP TABLE IF EXISTS {}", table), [])?;
    }
    setup_database(conn)
}

// ============================================================================
// Date column helpers
// ============================================================================

fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

fn date_from_sql(idx: usize, raw: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&raw, DATE_FMT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

// ============================================================================
// Insert helpers
// ============================================================================

pub fn create_user(conn: &Connection, username: &str, email: &str) -> Result<User> {
    let mut user = User {
        id: 0,
        username: username.trim().to_string(),
        email: email.trim().to_string(),
    };
    user.validate().map_err(anyhow::Error::msg)?;

    conn.execute(
        "INSERT INTO users (username, email) VALUES (?1, ?2)",
        params![user.username, user.email],
    )
    .context("Failed to insert user")?;
    user.id = conn.last_insert_rowid();

    Ok(user)
}

pub fn create_itinerary(
    conn: &Connection,
    user_id: i64,
    name: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Itinerary> {
    let mut itinerary = Itinerary {
        id: 0,
        name: name.trim().to_string(),
        start_date,
        end_date,
        user_id,
    };
    itinerary.validate().map_err(anyhow::Error::msg)?;

    conn.execute(
        "INSERT INTO itineraries (name, start_date, end_date, user_id) VALUES (?1, ?2, ?3, ?4)",
        params![
            itinerary.name,
            date_to_sql(start_date),
            date_to_sql(end_date),
            user_id
        ],
    )
    .context("Failed to insert itinerary")?;
    itinerary.id = conn.last_insert_rowid();

    Ok(itinerary)
}

pub fn create_destination(conn: &Connection, itinerary_id: i64, name: &str) -> Result<Destination> {
    let mut destination = Destination {
        id: 0,
        name: name.trim().to_string(),
        itinerary_id,
    };
    destination.validate().map_err(anyhow::Error::msg)?;

    conn.execute(
        "INSERT INTO destinations (name, itinerary_id) VALUES (?1, ?2)",
        params![destination.name, itinerary_id],
    )
    .context("Failed to insert destination")?;
    destination.id = conn.last_insert_rowid();

    Ok(destination)
}

pub fn create_activity(
    conn: &Connection,
    destination_id: i64,
    name: &str,
    description: &str,
) -> Result<Activity> {
    let mut activity = Activity {
        id: 0,
        name: name.trim().to_string(),
        description: description.trim().to_string(),
        destination_id,
    };
    activity.validate().map_err(anyhow::Error::msg)?;

    conn.execute(
        "INSERT INTO activities (name, description, destination_id) VALUES (?1, ?2, ?3)",
        params![activity.name, activity.description, destination_id],
    )
    .context("Failed to insert activity")?;
    activity.id = conn.last_insert_rowid();

    Ok(activity)
}

#[allow(clippy::too_many_arguments)]
pub fn create_accommodation(
    conn: &Connection,
    destination_id: i64,
    name: &str,
    address: &str,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    price: f64,
) -> Result<Accommodation> {
    let mut accommodation = Accommodation {
        id: 0,
        name: name.trim().to_string(),
        address: address.trim().to_string(),
        check_in_date,
        check_out_date,
        price,
        destination_id,
    };
    accommodation.validate().map_err(anyhow::Error::msg)?;

    conn.execute(
        "INSERT INTO accommodations (name, address, check_in_date, check_out_date, price, destination_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            accommodation.name,
            accommodation.address,
            date_to_sql(check_in_date),
            date_to_sql(check_out_date),
            price,
            destination_id
        ],
    )
    .context("Failed to insert accommodation")?;
    accommodation.id = conn.last_insert_rowid();

    Ok(accommodation)
}

pub fn create_packing_item(
    conn: &Connection,
    itinerary_id: i64,
    item_name: &str,
    quantity: i64,
    packed: bool,
) -> Result<PackingItem> {
    let mut item = PackingItem {
        id: 0,
        item_name: item_name.trim().to_string(),
        quantity,
        packed,
        itinerary_id,
    };
    item.validate().map_err(anyhow::Error::msg)?;

    conn.execute(
        "INSERT INTO packing_items (item_name, quantity, packed, itinerary_id) VALUES (?1, ?2, ?3, ?4)",
        params![item.item_name, item.quantity, item.packed as i64, itinerary_id],
    )
    .context("Failed to insert packing item")?;
    item.id = conn.last_insert_rowid();

    Ok(item)
}

// ============================================================================
// Entity Graph Accessor
// ============================================================================

/// Fully materialized itinerary tree, loaded up front as a read-only snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryGraph {
    pub itinerary: Itinerary,
    pub owner: User,
    pub destinations: Vec<DestinationNode>,
    pub packing_items: Vec<PackingItem>,
}

/// One destination with its child records.
#[derive(Debug, Clone, Serialize)]
pub struct DestinationNode {
    pub destination: Destination,
    pub activities: Vec<Activity>,
    pub accommodations: Vec<Accommodation>,
}

/// Load an itinerary with its destinations (each carrying activities and
/// accommodations) and packing items, or `None` when the id does not resolve.
///
/// Ordering contract: every child list comes back in creation/insertion order
/// (ascending id). Report output relies on this, so it is a guarantee of the
/// accessor, not an accident of the store.
pub fn load_itinerary_graph(conn: &Connection, itinerary_id: i64) -> Result<Option<ItineraryGraph>> {
    let header = conn
        .query_row(
            "SELECT i.id, i.name, i.start_date, i.end_date, i.user_id, u.username, u.email
             FROM itineraries i
             JOIN users u ON u.id = i.user_id
             WHERE i.id = ?1",
            params![itinerary_id],
            |row| {
                let start_raw: String = row.get(2)?;
                let end_raw: String = row.get(3)?;
                let itinerary = Itinerary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    start_date: date_from_sql(2, start_raw)?,
                    end_date: date_from_sql(3, end_raw)?,
                    user_id: row.get(4)?,
                };
                let owner = User {
                    id: itinerary.user_id,
                    username: row.get(5)?,
                    email: row.get(6)?,
                };
                Ok((itinerary, owner))
            },
        )
        .optional()
        .context("Failed to load itinerary")?;

    let Some((itinerary, owner)) = header else {
        return Ok(None);
    };

    let mut destinations = Vec::new();
    for destination in load_destinations(conn, itinerary.id)? {
        let activities = load_activities(conn, destination.id)?;
        let accommodations = load_accommodations(conn, destination.id)?;
        destinations.push(DestinationNode {
            destination,
            activities,
            accommodations,
        });
    }

    let packing_items = load_packing_items(conn, itinerary.id)?;

    Ok(Some(ItineraryGraph {
        itinerary,
        owner,
        destinations,
        packing_items,
    }))
}

fn load_destinations(conn: &Connection, itinerary_id: i64) -> Result<Vec<Destination>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, itinerary_id FROM destinations WHERE itinerary_id = ?1 ORDER BY id",
    )?;
    let destinations = stmt
        .query_map(params![itinerary_id], |row| {
            Ok(Destination {
                id: row.get(0)?,
                name: row.get(1)?,
                itinerary_id: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(destinations)
}

fn load_activities(conn: &Connection, destination_id: i64) -> Result<Vec<Activity>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, destination_id
         FROM activities WHERE destination_id = ?1 ORDER BY id",
    )?;
    let activities = stmt
        .query_map(params![destination_id], |row| {
            Ok(Activity {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                destination_id: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(activities)
}

fn load_accommodations(conn: &Connection, destination_id: i64) -> Result<Vec<Accommodation>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, address, check_in_date, check_out_date, price, destination_id
         FROM accommodations WHERE destination_id = ?1 ORDER BY id",
    )?;
    let accommodations = stmt
        .query_map(params![destination_id], |row| {
            let check_in_raw: String = row.get(3)?;
            let check_out_raw: String = row.get(4)?;
            Ok(Accommodation {
                id: row.get(0)?,
                name: row.get(1)?,
                address: row.get(2)?,
                check_in_date: date_from_sql(3, check_in_raw)?,
                check_out_date: date_from_sql(4, check_out_raw)?,
                price: row.get(5)?,
                destination_id: row.get(6)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(accommodations)
}

fn load_packing_items(conn: &Connection, itinerary_id: i64) -> Result<Vec<PackingItem>> {
    let mut stmt = conn.prepare(
        "SELECT id, item_name, quantity, packed, itinerary_id
         FROM packing_items WHERE itinerary_id = ?1 ORDER BY id",
    )?;
    let items = stmt
        .query_map(params![itinerary_id], |row| {
            let packed: i64 = row.get(3)?;
            Ok(PackingItem {
                id: row.get(0)?,
                item_name: row.get(1)?,
                quantity: row.get(2)?,
                packed: packed != 0,
                itinerary_id: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(items)
}

// ============================================================================
// Summaries
// ============================================================================

/// One row per itinerary for listings (CLI `list`, API index).
#[derive(Debug, Clone, Serialize)]
pub struct ItinerarySummary {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub username: String,
    pub destination_count: i64,
}

pub fn list_itinerary_summaries(conn: &Connection) -> Result<Vec<ItinerarySummary>> {
    let mut stmt = conn.prepare(
        "SELECT i.id, i.name, i.start_date, i.end_date, u.username, COUNT(d.id)
         FROM itineraries i
         JOIN users u ON u.id = i.user_id
         LEFT JOIN destinations d ON d.itinerary_id = i.id
         GROUP BY i.id
         ORDER BY i.id",
    )?;
    let summaries = stmt
        .query_map([], |row| {
            let start_raw: String = row.get(2)?;
            let end_raw: String = row.get(3)?;
            Ok(ItinerarySummary {
                id: row.get(0)?,
                name: row.get(1)?,
                start_date: date_from_sql(2, start_raw)?,
                end_date: date_from_sql(3, end_raw)?,
                username: row.get(4)?,
                destination_count: row.get(5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(summaries)
}

// ============================================================================
// Tests
// ============================================================================
