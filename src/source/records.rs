use serde::{Deserialize, Deserializer};

use crate::utils::{parse_float, parse_int};

fn lenient_int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().map(parse_int).unwrap_or(0))
}

fn lenient_float<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().map(parse_float).unwrap_or(0.0))
}

/// Row of `beauty_salon.csv`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Salon {
    #[serde(deserialize_with = "lenient_int")]
    pub id: i64,
    pub title: String,
    #[serde(rename = "_yf_slug")]
    pub slug: String,
    pub website: String,
    #[serde(rename = "telephone")]
    pub phone: String,
    pub address: String,
    pub postal_code: String,
    #[serde(deserialize_with = "lenient_float")]
    pub latitude: f64,
    #[serde(deserialize_with = "lenient_float")]
    pub longitude: f64,
    pub email: String,
    pub opening_hours: String,
    pub description: String,
    pub service_product: String,
    #[serde(deserialize_with = "lenient_int")]
    pub reviews: i64,
    #[serde(rename = "average_star", deserialize_with = "lenient_float")]
    pub rating: f64,
}

/// Row of `beauty_salon_detail.csv`: one key/value attribute of a salon.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SalonDetail {
    pub key: String,
    pub value: String,
    #[serde(rename = "beauty_salon_id", deserialize_with = "lenient_int")]
    pub salon_id: i64,
}

/// `(id, name)` lookup row. The name column is called `category`, `amenity`,
/// `payment` or `state` depending on the table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Named {
    #[serde(deserialize_with = "lenient_int")]
    pub id: i64,
    #[serde(alias = "category", alias = "amenity", alias = "payment", alias = "state")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct City {
    #[serde(deserialize_with = "lenient_int")]
    pub id: i64,
    #[serde(rename = "city")]
    pub name: String,
    #[serde(rename = "_yf_slug")]
    pub slug: String,
    #[serde(deserialize_with = "lenient_int")]
    pub state_id: i64,
}

/// Junction row linking a salon to a category, city, amenity or payment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SalonEdge {
    #[serde(deserialize_with = "lenient_int")]
    pub id: i64,
    #[serde(rename = "beauty_salon_id", deserialize_with = "lenient_int")]
    pub salon_id: i64,
    #[serde(
        alias = "category_id",
        alias = "city_id",
        alias = "amenity_id",
        alias = "payment_id",
        deserialize_with = "lenient_int"
    )]
    pub target_id: i64,
}

/// Row of `image_2.csv`; `path` holds the image URL.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(rename = "beauty_salon_id", deserialize_with = "lenient_int")]
    pub salon_id: i64,
    #[serde(rename = "path")]
    pub url: String,
}
