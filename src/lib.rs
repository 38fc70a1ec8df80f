// Travel Planner - Core Library
// Exposes the entity models, the SQLite store, and the itinerary report
// generator for use in the CLI, the API server, and tests.

pub mod db;
pub mod entities;
pub mod report;

// Re-export commonly used types
pub use db::{
    create_accommodation, create_activity, create_destination, create_itinerary,
    create_packing_item, create_user, list_itinerary_summaries, load_itinerary_graph,
    reset_database, setup_database, DestinationNode, ItineraryGraph, ItinerarySummary,
};
pub use entities::{Accommodation, Activity, Destination, Itinerary, PackingItem, User};
pub use report::{
    generate as generate_report, ReportDocument, ReportError, REPORT_CONTENT_TYPE,
    REPORT_FILENAME,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
