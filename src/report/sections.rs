// 🖨️ Section Renderers - the semantic blocks of the itinerary report
//
// Each renderer draws one section (title banner, trip info, destinations,
// packing list) onto the shared cursor. Every atomic block reserves its
// height through the cursor before drawing, so blocks never straddle a page
// boundary; only wrapped description text may flow across pages, one line at
// a time.

use anyhow::Result;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, Point, Polygon, Rgb};

use crate::db::DestinationNode;
use crate::entities::{Accommodation, Activity, Itinerary, PackingItem, User};
use crate::report::cursor::PageCursor;
use crate::report::wrap::TextWrapper;

// ============================================================================
// Layout constants
// ============================================================================

pub const TITLE_FONT_SIZE: f32 = 16.0;
pub const HEADER_FONT_SIZE: f32 = 12.0;
pub const SUBHEADING_FONT_SIZE: f32 = 10.5;
pub const BODY_FONT_SIZE: f32 = 10.0;

pub const LINE_HEIGHT_MM: f32 = 5.5;
pub const BANNER_HEIGHT_MM: f32 = 9.0;
pub const TITLE_BANNER_HEIGHT_MM: f32 = 12.0;
const BANNER_GAP_MM: f32 = 3.0;
const SECTION_GAP_MM: f32 = 4.0;
const BASELINE_OFFSET_MM: f32 = 4.0;

// Estimated record heights for page-break checks. Deliberately coarse fixed
// budgets per record kind; each wrapped line re-reserves its own height, so
// a loose estimate can start a record lower on the page but never push ink
// below the margin.
const DESTINATION_BLOCK_ESTIMATE_MM: f32 = 12.0;
const ACTIVITY_BLOCK_ESTIMATE_MM: f32 = 11.0;
const ROW_ESTIMATE_MM: f32 = LINE_HEIGHT_MM;

// Indents from the left margin, in millimetres.
const INDENT_SUBHEADING: f32 = 4.0;
const INDENT_ITEM: f32 = 8.0;
const INDENT_DESCRIPTION: f32 = 12.0;

/// Description column truncation, applied before word-wrapping.
pub const DESCRIPTION_LIMIT: usize = 50;
pub const ELLIPSIS: &str = "...";

const DISPLAY_DATE_FMT: &str = "%B %-d, %Y";

// ============================================================================
// Fonts and colors
// ============================================================================

/// Built-in faces shared by every section of one render.
pub struct ReportFonts {
    pub regular: IndirectFontRef,
    pub bold: IndirectFontRef,
}

impl ReportFonts {
    pub fn load(cursor: &PageCursor) -> Result<ReportFonts> {
        Ok(ReportFonts {
            regular: cursor.builtin_font(BuiltinFont::Helvetica)?,
            bold: cursor.builtin_font(BuiltinFont::HelveticaBold)?,
        })
    }
}

fn banner_fill() -> Color {
    Color::Rgb(Rgb::new(0.17, 0.33, 0.59, None))
}

fn paper() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

fn ink() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

// ============================================================================
// Drawing primitives
// ============================================================================

fn filled_rect(x: f32, y: f32, width: f32, height: f32) -> Polygon {
    Polygon {
        rings: vec![vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y + height)), false),
            (Point::new(Mm(x), Mm(y + height)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    }
}

/// Draw one line of text as an atomic block: reserve, draw, advance.
fn text_line(cursor: &mut PageCursor, font: &IndirectFontRef, size: f32, indent: f32, text: &str) {
    cursor.ensure_space(LINE_HEIGHT_MM);
    let x = cursor.metrics().margin + indent;
    let y = cursor.y() - BASELINE_OFFSET_MM;
    cursor.layer().use_text(text, size, Mm(x), Mm(y), font);
    cursor.advance(LINE_HEIGHT_MM);
}

/// Draw a colored banner block with its title inside.
fn banner(cursor: &mut PageCursor, fonts: &ReportFonts, title: &str, height: f32, size: f32) {
    cursor.ensure_space(height + BANNER_GAP_MM);
    let margin = cursor.metrics().margin;
    let width = cursor.metrics().content_width();
    let bottom = cursor.y() - height;

    let layer = cursor.layer().clone();
    layer.set_fill_color(banner_fill());
    layer.add_polygon(filled_rect(margin, bottom, width, height));
    layer.set_fill_color(paper());
    layer.use_text(title, size, Mm(margin + 2.5), Mm(bottom + height * 0.3), &fonts.bold);
    layer.set_fill_color(ink());

    cursor.advance(height + BANNER_GAP_MM);
}

// ============================================================================
// Formatting helpers
// ============================================================================

/// Cut a description to the report column limit, marking the cut with an
/// ellipsis. Truncation happens before word-wrapping.
pub fn truncate_description(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(DESCRIPTION_LIMIT).collect();
    if chars.next().is_some() {
        format!("{}{}", head, ELLIPSIS)
    } else {
        head
    }
}

/// Prices always render with exactly two decimal digits.
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

fn format_date(date: chrono::NaiveDate) -> String {
    date.format(DISPLAY_DATE_FMT).to_string()
}

// ============================================================================
// Sections
// ============================================================================

/// Title banner carrying the itinerary name.
pub fn draw_title_banner(cursor: &mut PageCursor, fonts: &ReportFonts, name: &str) {
    banner(cursor, fonts, name, TITLE_BANNER_HEIGHT_MM, TITLE_FONT_SIZE);
}

/// Trip info: date range and the owning traveler.
pub fn draw_trip_info(
    cursor: &mut PageCursor,
    fonts: &ReportFonts,
    itinerary: &Itinerary,
    owner: &User,
) {
    banner(cursor, fonts, "Trip Information", BANNER_HEIGHT_MM, HEADER_FONT_SIZE);

    let start = format!("Start Date: {}", format_date(itinerary.start_date));
    let end = format!("End Date: {}", format_date(itinerary.end_date));
    let traveler = format!("Traveler: {}", owner.username);
    text_line(cursor, &fonts.regular, BODY_FONT_SIZE, INDENT_SUBHEADING, &start);
    text_line(cursor, &fonts.regular, BODY_FONT_SIZE, INDENT_SUBHEADING, &end);
    text_line(cursor, &fonts.regular, BODY_FONT_SIZE, INDENT_SUBHEADING, &traveler);

    cursor.advance(SECTION_GAP_MM);
}

/// Destinations with their activities and accommodations, in insertion order.
/// The banner is drawn even when there are no destinations.
pub fn draw_destinations(
    cursor: &mut PageCursor,
    fonts: &ReportFonts,
    destinations: &[DestinationNode],
) {
    banner(cursor, fonts, "Destinations", BANNER_HEIGHT_MM, HEADER_FONT_SIZE);

    for node in destinations {
        cursor.ensure_space(DESTINATION_BLOCK_ESTIMATE_MM);
        text_line(cursor, &fonts.bold, HEADER_FONT_SIZE - 1.0, 0.0, &node.destination.name);

        if !node.activities.is_empty() {
            text_line(cursor, &fonts.bold, SUBHEADING_FONT_SIZE, INDENT_SUBHEADING, "Activities");
            for activity in &node.activities {
                draw_activity(cursor, fonts, activity);
            }
        }

        if !node.accommodations.is_empty() {
            text_line(
                cursor,
                &fonts.bold,
                SUBHEADING_FONT_SIZE,
                INDENT_SUBHEADING,
                "Accommodations",
            );
            for accommodation in &node.accommodations {
                draw_accommodation(cursor, fonts, accommodation);
            }
        }

        cursor.advance(2.0);
    }

    cursor.advance(SECTION_GAP_MM);
}

fn draw_activity(cursor: &mut PageCursor, fonts: &ReportFonts, activity: &Activity) {
    cursor.ensure_space(ACTIVITY_BLOCK_ESTIMATE_MM);
    text_line(cursor, &fonts.regular, BODY_FONT_SIZE, INDENT_ITEM, &activity.name);

    let column_width = cursor.metrics().content_width() - INDENT_DESCRIPTION;
    let wrapper = TextWrapper::for_width(column_width, BODY_FONT_SIZE);
    let truncated = truncate_description(&activity.description);
    for line in wrapper.wrap(&truncated) {
        text_line(cursor, &fonts.regular, BODY_FONT_SIZE, INDENT_DESCRIPTION, &line);
    }
}

fn draw_accommodation(cursor: &mut PageCursor, fonts: &ReportFonts, accommodation: &Accommodation) {
    cursor.ensure_space(ROW_ESTIMATE_MM);
    let row = format!(
        "{} - ${}",
        accommodation.name,
        format_price(accommodation.price)
    );
    text_line(cursor, &fonts.regular, BODY_FONT_SIZE, INDENT_ITEM, &row);
}

/// Packing checklist: glyph, item name, quantity per row, in insertion order.
/// The banner is drawn even when the list is empty.
pub fn draw_packing_list(cursor: &mut PageCursor, fonts: &ReportFonts, items: &[PackingItem]) {
    banner(cursor, fonts, "Packing List", BANNER_HEIGHT_MM, HEADER_FONT_SIZE);

    for item in items {
        cursor.ensure_space(ROW_ESTIMATE_MM);
        let glyph = if item.packed { "[x]" } else { "[ ]" };
        let row = format!("{} {}  x{}", glyph, item.item_name, item.quantity);
        text_line(cursor, &fonts.regular, BODY_FONT_SIZE, INDENT_SUBHEADING, &row);
    }
}

// ============================================================================
// Tests
// ============================================================================
