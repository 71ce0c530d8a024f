use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Page-ready projection of one salon with every association resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessListing {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub description: String,
    pub hours: String,
    pub services: Vec<String>,
    pub amenities: Vec<String>,
    pub payment_methods: Vec<String>,
    pub details: IndexMap<String, String>,
    pub rating: f64,
    pub reviews: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub images: Vec<String>,
    /// Category names; not part of the page payload.
    #[serde(skip)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityListing {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub state: String,
    pub state_code: String,
    pub business_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPageData {
    pub city_name: String,
    pub state_name: String,
    pub businesses: Vec<BusinessListing>,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePageData {
    pub state_name: String,
    pub cities: Vec<CityListing>,
    pub business_count: usize,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPageData {
    pub business: BusinessListing,
    pub nearby_businesses: Vec<BusinessListing>,
    pub slug: String,
}

/// Contents of `pagesData.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagesData {
    pub business_listings: Vec<BusinessListing>,
    pub city_pages: Vec<CityPageData>,
    pub state_pages: Vec<StatePageData>,
    pub business_pages: Vec<BusinessPageData>,
}
