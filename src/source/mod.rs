pub mod records;

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, SiteError};
pub use records::{City, Image, Named, Salon, SalonDetail, SalonEdge};

pub const SALONS_FILE: &str = "beauty_salon.csv";
pub const DETAILS_FILE: &str = "beauty_salon_detail.csv";
pub const CATEGORIES_FILE: &str = "category.csv";
pub const SALON_CATEGORIES_FILE: &str = "beauty_salon_x_category.csv";
pub const CITIES_FILE: &str = "city.csv";
pub const CITY_SALONS_FILE: &str = "city_x_beauty_salon.csv";
pub const STATES_FILE: &str = "state.csv";
pub const AMENITIES_FILE: &str = "amenity.csv";
pub const SALON_AMENITIES_FILE: &str = "amenity_x_beauty_salon.csv";
pub const PAYMENTS_FILE: &str = "payment.csv";
pub const SALON_PAYMENTS_FILE: &str = "payment_x_beauty_salon.csv";
pub const IMAGES_FILE: &str = "image_2.csv";

/// Every CSV export, fully parsed into typed rows in file order.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub salons: Vec<Salon>,
    pub details: Vec<SalonDetail>,
    pub categories: Vec<Named>,
    pub salon_categories: Vec<SalonEdge>,
    pub cities: Vec<City>,
    pub city_salons: Vec<SalonEdge>,
    pub states: Vec<Named>,
    pub amenities: Vec<Named>,
    pub salon_amenities: Vec<SalonEdge>,
    pub payments: Vec<Named>,
    pub salon_payments: Vec<SalonEdge>,
    pub images: Vec<Image>,
}

impl SourceTables {
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(SourceTables {
            salons: read_table(dir, SALONS_FILE)?,
            details: read_table(dir, DETAILS_FILE)?,
            categories: read_table(dir, CATEGORIES_FILE)?,
            salon_categories: read_table(dir, SALON_CATEGORIES_FILE)?,
            cities: read_table(dir, CITIES_FILE)?,
            city_salons: read_table(dir, CITY_SALONS_FILE)?,
            states: read_table(dir, STATES_FILE)?,
            amenities: read_table(dir, AMENITIES_FILE)?,
            salon_amenities: read_table(dir, SALON_AMENITIES_FILE)?,
            payments: read_table(dir, PAYMENTS_FILE)?,
            salon_payments: read_table(dir, SALON_PAYMENTS_FILE)?,
            images: read_table(dir, IMAGES_FILE)?,
        })
    }

    pub fn row_counts(&self) -> [(&'static str, usize); 12] {
        [
            (SALONS_FILE, self.salons.len()),
            (DETAILS_FILE, self.details.len()),
            (CATEGORIES_FILE, self.categories.len()),
            (SALON_CATEGORIES_FILE, self.salon_categories.len()),
            (CITIES_FILE, self.cities.len()),
            (CITY_SALONS_FILE, self.city_salons.len()),
            (STATES_FILE, self.states.len()),
            (AMENITIES_FILE, self.amenities.len()),
            (SALON_AMENITIES_FILE, self.salon_amenities.len()),
            (PAYMENTS_FILE, self.payments.len()),
            (SALON_PAYMENTS_FILE, self.salon_payments.len()),
            (IMAGES_FILE, self.images.len()),
        ]
    }
}

fn read_table<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>> {
    let path = dir.join(file);
    let text = std::fs::read_to_string(&path).map_err(|e| SiteError::io(&path, e))?;
    let rows = parse_table(file, &text)?;
    debug!(file, rows = rows.len(), "loaded table");
    Ok(rows)
}

/// Parse CSV text with a header row into typed records.
///
/// Any tokenizing problem fails the whole table: a quoted field that never
/// closes, a closing quote followed by anything but a delimiter, or a row
/// whose field count differs from the header.
pub fn parse_table<T: DeserializeOwned>(file: &str, text: &str) -> Result<Vec<T>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    check_quotes(file, text)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::None)
        .from_reader(text.as_bytes());

    rdr.deserialize()
        .map(|rec| {
            rec.map_err(|source| SiteError::Csv {
                file: file.to_string(),
                source,
            })
        })
        .collect()
}

/// The `csv` reader keeps text after a closing quote and reads an open quote
/// to end of file, so quoting is validated up front.
fn check_quotes(file: &str, text: &str) -> Result<()> {
    let unbalanced = || SiteError::UnbalancedQuotes {
        file: file.to_string(),
    };

    let bytes = text.as_bytes();
    let mut in_quotes = false;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'"' {
            if !in_quotes {
                in_quotes = true;
            } else if bytes.get(i + 1) == Some(&b'"') {
                // "" escape
                i += 1;
            } else {
                match bytes.get(i + 1) {
                    None | Some(b',') | Some(b'\r') | Some(b'\n') => in_quotes = false,
                    Some(_) => return Err(unbalanced()),
                }
            }
        }
        i += 1;
    }

    if in_quotes {
        return Err(unbalanced());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salon_fields_and_numeric_defaults() {
        let csv = "id,ts,title,_yf_slug,telephone,latitude,longitude,reviews,average_star,service_product\n\
                   7,2024-01-01,Smooth Skin Spa,,555-0100,30.26,,n/a,4.5,\"facial, body\"\n";
        let salons: Vec<Salon> = parse_table(SALONS_FILE, csv).unwrap();
        assert_eq!(salons.len(), 1);
        let s = &salons[0];
        assert_eq!(s.id, 7);
        assert_eq!(s.title, "Smooth Skin Spa");
        assert_eq!(s.slug, "");
        assert_eq!(s.phone, "555-0100");
        assert_eq!(s.latitude, 30.26);
        assert_eq!(s.longitude, 0.0);
        assert_eq!(s.reviews, 0);
        assert_eq!(s.rating, 4.5);
        assert_eq!(s.service_product, "facial, body");
        // columns absent from the header fall back to empty strings
        assert_eq!(s.email, "");
    }

    #[test]
    fn lookup_rows_share_one_shape() {
        let cats: Vec<Named> =
            parse_table(CATEGORIES_FILE, "id,ts,category\n1,x,Electrolysis\n2,x,Waxing\n").unwrap();
        let states: Vec<Named> = parse_table(STATES_FILE, "id,state\n5,Texas\n").unwrap();
        assert_eq!(cats[1].name, "Waxing");
        assert_eq!(states[0].id, 5);
        assert_eq!(states[0].name, "Texas");
    }

    #[test]
    fn junction_rows_map_target_column() {
        let edges: Vec<SalonEdge> = parse_table(
            CITY_SALONS_FILE,
            "id,city_id,beauty_salon_id\n1,3,10\n2,4,\n",
        )
        .unwrap();
        assert_eq!(edges[0].salon_id, 10);
        assert_eq!(edges[0].target_id, 3);
        assert_eq!(edges[1].salon_id, 0);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let cats: Vec<Named> =
            parse_table(CATEGORIES_FILE, "id,category\n1,Electrolysis\n\n2,Waxing\n\n").unwrap();
        assert_eq!(cats.len(), 2);
    }

    #[test]
    fn ragged_row_is_fatal() {
        let err = parse_table::<Named>(CATEGORIES_FILE, "id,category\n1,Electrolysis,extra\n")
            .unwrap_err();
        assert!(matches!(err, SiteError::Csv { .. }));
    }

    #[test]
    fn unbalanced_quote_is_fatal() {
        let err = parse_table::<Named>(CATEGORIES_FILE, "id,category\n1,\"Electrolysis\n")
            .unwrap_err();
        assert!(matches!(err, SiteError::UnbalancedQuotes { .. }));
    }

    #[test]
    fn escaped_quote_cannot_swallow_next_row() {
        let err = parse_table::<Named>(CATEGORIES_FILE, "id,category\n1,\"a\"\"\n2,\"b\n")
            .unwrap_err();
        assert!(matches!(err, SiteError::UnbalancedQuotes { .. }));
    }

    #[test]
    fn text_after_closing_quote_is_fatal() {
        let err = parse_table::<Named>(CATEGORIES_FILE, "id,category\n1,\"Elec\"trolysis\"\"\n")
            .unwrap_err();
        assert!(matches!(err, SiteError::UnbalancedQuotes { .. }));
    }

    #[test]
    fn escaped_quotes_and_commas_parse() {
        let cats: Vec<Named> = parse_table(
            CATEGORIES_FILE,
            "id,category\n1,\"Laser, \"\"IPL\"\"\"\r\n2,\"\"\n",
        )
        .unwrap();
        assert_eq!(cats[0].name, "Laser, \"IPL\"");
        assert_eq!(cats[1].name, "");
    }

    #[test]
    fn load_reads_fixture_directory() {
        let tables = SourceTables::load(Path::new("tests/fixtures/directory")).unwrap();
        assert_eq!(tables.salons.len(), 6);
        assert_eq!(tables.images[0].url, "https://img.example.com/10-front.jpg");
        assert!(tables.row_counts().iter().all(|(_, n)| *n > 0));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SourceTables::load(dir.path()).unwrap_err();
        assert!(matches!(err, SiteError::Io { .. }));
    }
}
