// 🧾 Report Generator - paginated itinerary PDF
//
// Walks the loaded entity graph (itinerary → destinations → activities /
// accommodations, plus the packing checklist) and renders it into a
// fixed-layout, paginated document. A render is synchronous and allocates
// its own cursor and output buffer, so concurrent renders share nothing;
// the graph snapshot is read-only for the duration of one render.

pub mod cursor;
pub mod sections;
pub mod wrap;

use anyhow::Context;
use rusqlite::Connection;
use thiserror::Error;

use crate::db::{self, ItineraryGraph};
use self::cursor::{PageCursor, PageMetrics};
use self::sections::ReportFonts;

/// Suggested attachment filename, constant across all itineraries.
pub const REPORT_FILENAME: &str = "itinerary_report.pdf";

/// Declared media type of the finished document.
pub const REPORT_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum ReportError {
    /// The itinerary id does not resolve to a record. Raised before any
    /// drawing begins; the transport layer surfaces it as a 404.
    #[error("Itinerary {0} not found")]
    NotFound(i64),

    /// Unexpected failure while loading or drawing. The render aborts
    /// without partial output; the transport layer surfaces it as a 500.
    #[error("Report rendering failed: {0}")]
    Render(#[from] anyhow::Error),
}

/// Finished report: opaque PDF bytes plus transport metadata.
pub struct ReportDocument {
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub filename: &'static str,
    pub content_type: &'static str,
}

/// Generate the PDF report for one itinerary.
///
/// The full entity graph is loaded up front, then the sections draw in
/// fixed order: title banner, trip info, destinations, packing list.
/// All-or-nothing: on error no bytes are produced.
pub fn generate(conn: &Connection, itinerary_id: i64) -> Result<ReportDocument, ReportError> {
    let graph = db::load_itinerary_graph(conn, itinerary_id)?
        .ok_or(ReportError::NotFound(itinerary_id))?;

    let (bytes, pages) = render_graph(&graph, PageMetrics::default())?;

    Ok(ReportDocument {
        bytes,
        pages,
        filename: REPORT_FILENAME,
        content_type: REPORT_CONTENT_TYPE,
    })
}

/// Render an already-loaded graph. Page geometry is injectable so tests can
/// shrink the page and force breaks.
fn render_graph(graph: &ItineraryGraph, metrics: PageMetrics) -> anyhow::Result<(Vec<u8>, usize)> {
    let mut cursor = PageCursor::new(&graph.itinerary.name, metrics);
    let fonts = ReportFonts::load(&cursor).context("Failed to load report fonts")?;

    sections::draw_title_banner(&mut cursor, &fonts, &graph.itinerary.name);
    sections::draw_trip_info(&mut cursor, &fonts, &graph.itinerary, &graph.owner);
    sections::draw_destinations(&mut cursor, &fonts, &graph.destinations);
    sections::draw_packing_list(&mut cursor, &fonts, &graph.packing_items);

    let pages = cursor.pages();
    let bytes = cursor
        .into_bytes()
        .context("Failed to finalize report document")?;
    Ok((bytes, pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        create_activity, create_destination, create_itinerary, create_packing_item, create_user,
        setup_database, DestinationNode,
    };
    use crate::entities::{Activity, Destination, Itinerary, PackingItem, User};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn
    }

    fn small_metrics() -> PageMetrics {
        PageMetrics {
            width: 80.0,
            height: 60.0,
            margin: 10.0,
        }
    }

    fn bare_graph() -> ItineraryGraph {
        ItineraryGraph {
            itinerary: Itinerary {
                id: 1,
                name: "Weekend Escape".to_string(),
                start_date: date(2026, 5, 1),
                end_date: date(2026, 5, 3),
                user_id: 1,
            },
            owner: User {
                id: 1,
                username: "maria_v".to_string(),
                email: "maria@example.com".to_string(),
            },
            destinations: Vec::new(),
            packing_items: Vec::new(),
        }
    }

    fn graph_with_packing_items(count: i64) -> ItineraryGraph {
        let mut graph = bare_graph();
        graph.packing_items = (0..count)
            .map(|i| PackingItem {
                id: i + 1,
                item_name: format!("Item {}", i + 1),
                quantity: 1,
                packed: false,
                itinerary_id: 1,
            })
            .collect();
        graph
    }

    #[test]
    fn test_missing_itinerary_is_not_found() {
        let conn = test_conn();
        let result = generate(&conn, 42);
        assert!(matches!(result, Err(ReportError::NotFound(42))));
    }

    #[test]
    fn test_empty_itinerary_renders_one_page() {
        let conn = test_conn();
        let user = create_user(&conn, "maria_v", "maria@example.com").unwrap();
        let itinerary = create_itinerary(
            &conn,
            user.id,
            "Weekend Escape",
            date(2026, 5, 1),
            date(2026, 5, 3),
        )
        .unwrap();

        let doc = generate(&conn, itinerary.id).unwrap();
        assert_eq!(doc.pages, 1);
        assert!(doc.bytes.starts_with(b"%PDF"));
        assert_eq!(doc.filename, "itinerary_report.pdf");
        assert_eq!(doc.content_type, "application/pdf");
    }

    #[test]
    fn test_full_graph_renders_from_store() {
        let conn = test_conn();
        let user = create_user(&conn, "sam", "sam@example.com").unwrap();
        let itinerary =
            create_itinerary(&conn, user.id, "Europe", date(2026, 9, 1), date(2026, 9, 20))
                .unwrap();
        let zurich = create_destination(&conn, itinerary.id, "Zurich").unwrap();
        create_activity(&conn, zurich.id, "Uetliberg hike", "Ride the train up, walk down").unwrap();
        create_packing_item(&conn, itinerary.id, "Passport", 1, true).unwrap();

        let doc = generate(&conn, itinerary.id).unwrap();
        assert!(doc.bytes.starts_with(b"%PDF"));
        assert!(doc.pages >= 1);
    }

    #[test]
    fn test_page_count_grows_monotonically_with_content() {
        let mut previous = 0;
        for count in [0, 4, 12, 40] {
            let graph = graph_with_packing_items(count);
            let (_, pages) = render_graph(&graph, small_metrics()).unwrap();
            assert!(
                pages >= previous,
                "pages shrank from {} to {} at {} items",
                previous,
                pages,
                count
            );
            previous = pages;
        }
        assert!(previous > 1);
    }

    #[test]
    fn test_long_descriptions_span_pages_in_order() {
        // Bounding case: six activities at the 500-character description cap,
        // on a page small enough that each wraps to several lines.
        let mut graph = bare_graph();
        let description = "plan ahead ".repeat(45) + "done!";
        assert_eq!(description.len(), 500);

        let activities = (0..6)
            .map(|i| Activity {
                id: i + 1,
                name: format!("Activity {}", i + 1),
                description: description.clone(),
                destination_id: 1,
            })
            .collect();
        graph.destinations = vec![DestinationNode {
            destination: Destination {
                id: 1,
                name: "Kyoto".to_string(),
                itinerary_id: 1,
            },
            activities,
            accommodations: Vec::new(),
        }];

        let (bytes, pages) = render_graph(&graph, small_metrics()).unwrap();
        assert!(pages > 1, "expected a multi-page document, got {}", pages);
        assert!(bytes.starts_with(b"%PDF"));

        // Each truncated description wraps to more than one line at this
        // page width, so breaks can land inside a description block.
        let column_width = small_metrics().content_width() - 12.0;
        let wrapper = wrap::TextWrapper::for_width(column_width, sections::BODY_FONT_SIZE);
        let truncated = sections::truncate_description(&description);
        assert!(wrapper.wrap(&truncated).count() > 1);
    }
}
