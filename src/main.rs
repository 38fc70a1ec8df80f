use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::env;
use std::path::Path;

use travel_planner::{
    create_accommodation, create_activity, create_destination, create_itinerary,
    create_packing_item, create_user, generate_report, list_itinerary_summaries, reset_database,
    ReportError, REPORT_FILENAME,
};

const DEFAULT_DB_PATH: &str = "travel.db";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("seed") => run_seed(args.get(2).map(String::as_str))?,
        Some("list") => run_list(args.get(2).map(String::as_str))?,
        Some("report") => run_report(&args[2..])?,
        _ => print_usage(),
    }

    Ok(())
}

fn print_usage() {
    println!("🧳 Travel Planner v{}", travel_planner::VERSION);
    println!();
    println!("Usage:");
    println!("  travel-planner seed [db]                 Reset the database and load demo data");
    println!("  travel-planner list [db]                 List itineraries");
    println!("  travel-planner report <id> [db] [out]    Generate an itinerary PDF report");
}

fn open_existing(db_path: &str) -> Result<Connection> {
    if !Path::new(db_path).exists() {
        eprintln!("❌ Database not found: {}", db_path);
        eprintln!("   Run: travel-planner seed");
        std::process::exit(1);
    }
    Connection::open(db_path).with_context(|| format!("Failed to open database {}", db_path))
}

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).context("Invalid seed date")
}

fn run_seed(db_path: Option<&str>) -> Result<()> {
    let db_path = db_path.unwrap_or(DEFAULT_DB_PATH);

    println!("🌱 Seeding travel planner database: {}", db_path);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path))?;
    reset_database(&conn)?;
    println!("✓ Database reset with WAL mode");

    let user = create_user(&conn, "maria_v", "maria@example.com")?;
    println!("✓ Created user: {}", user.username);

    let itinerary = create_itinerary(
        &conn,
        user.id,
        "Pacific Northwest Loop",
        date(2026, 6, 12)?,
        date(2026, 6, 19)?,
    )?;
    println!(
        "✓ Created itinerary: {} ({} days)",
        itinerary.name,
        itinerary.duration_days()
    );

    let seattle = create_destination(&conn, itinerary.id, "Seattle")?;
    create_activity(
        &conn,
        seattle.id,
        "Pike Place Market",
        "Browse the stalls, watch the fish toss, and grab coffee at the original Starbucks before the crowds arrive.",
    )?;
    create_activity(
        &conn,
        seattle.id,
        "Underground Tour",
        "Guided walk through the buried storefronts of Pioneer Square.",
    )?;
    create_accommodation(
        &conn,
        seattle.id,
        "Hotel Ballard",
        "5216 Ballard Ave NW, Seattle, WA",
        date(2026, 6, 12)?,
        date(2026, 6, 15)?,
        189.5,
    )?;

    let portland = create_destination(&conn, itinerary.id, "Portland")?;
    create_activity(
        &conn,
        portland.id,
        "Powell's City of Books",
        "A full city block of new and used books. Budget at least two hours.",
    )?;
    create_accommodation(
        &conn,
        portland.id,
        "Ace Hotel Portland",
        "1022 SW Harvey Milk St, Portland, OR",
        date(2026, 6, 15)?,
        date(2026, 6, 19)?,
        204.0,
    )?;
    println!("✓ Created 2 destinations with activities and accommodations");

    create_packing_item(&conn, itinerary.id, "Passport", 1, true)?;
    create_packing_item(&conn, itinerary.id, "Rain jacket", 1, false)?;
    create_packing_item(&conn, itinerary.id, "Wool socks", 4, false)?;
    create_packing_item(&conn, itinerary.id, "Camera battery", 2, true)?;
    println!("✓ Created 4 packing items");

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🎉 Seeding complete!");
    println!("   Try: travel-planner report {}", itinerary.id);

    Ok(())
}

fn run_list(db_path: Option<&str>) -> Result<()> {
    let db_path = db_path.unwrap_or(DEFAULT_DB_PATH);
    let conn = open_existing(db_path)?;

    let summaries = list_itinerary_summaries(&conn)?;
    if summaries.is_empty() {
        println!("No itineraries yet. Run: travel-planner seed");
        return Ok(());
    }

    println!("📋 Itineraries ({})", summaries.len());
    for summary in summaries {
        println!(
            "  #{} {} | {} to {} | {} | {} destination(s)",
            summary.id,
            summary.name,
            summary.start_date,
            summary.end_date,
            summary.username,
            summary.destination_count
        );
    }

    Ok(())
}

fn run_report(args: &[String]) -> Result<()> {
    let Some(raw_id) = args.first() else {
        eprintln!("❌ Missing itinerary id");
        eprintln!("   Usage: travel-planner report <id> [db] [out]");
        std::process::exit(1);
    };
    let itinerary_id: i64 = raw_id
        .parse()
        .with_context(|| format!("Invalid itinerary id: {}", raw_id))?;
    let db_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_DB_PATH);
    let out_path = args.get(2).map(String::as_str).unwrap_or(REPORT_FILENAME);

    let conn = open_existing(db_path)?;

    match generate_report(&conn, itinerary_id) {
        Ok(doc) => {
            std::fs::write(out_path, &doc.bytes)
                .with_context(|| format!("Failed to write {}", out_path))?;
            println!(
                "✓ Generated: {} ({} page(s), {} bytes)",
                out_path,
                doc.pages,
                doc.bytes.len()
            );
            Ok(())
        }
        Err(ReportError::NotFound(id)) => {
            eprintln!("❌ Itinerary {} not found", id);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
