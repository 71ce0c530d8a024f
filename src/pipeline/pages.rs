use std::collections::HashSet;

use crate::models::{BusinessListing, BusinessPageData, CityListing, CityPageData, StatePageData};
use crate::source::City;
use crate::utils::{clean_slug, dash_lower, state_prefix};

use super::index::RelationIndex;

pub const MAX_NEARBY: usize = 5;

/// One page per city (city-table order) with at least one listing linked to
/// it. Cities whose state is unknown get no page.
pub fn city_pages(listings: &[BusinessListing], index: &RelationIndex) -> Vec<CityPageData> {
    let mut pages = Vec::new();
    for city in &index.tables().cities {
        let Some(state) = index.state(city.state_id) else {
            continue;
        };
        let businesses: Vec<BusinessListing> =
            listings_in_city(listings, index.salons_in_city(city.id))
                .cloned()
                .collect();
        if businesses.is_empty() {
            continue;
        }
        pages.push(CityPageData {
            city_name: city.name.clone(),
            state_name: state.name.clone(),
            businesses,
            slug: city_slug(city, &state.name),
        });
    }
    pages
}

/// One page per state that has a city with at least one listing. The state
/// total is the sum of its city counts, so a listing linked to two cities of
/// the same state counts twice.
pub fn state_pages(listings: &[BusinessListing], index: &RelationIndex) -> Vec<StatePageData> {
    let mut pages = Vec::new();
    for state in &index.tables().states {
        let cities: Vec<CityListing> = index
            .cities_in_state(state.id)
            .map(|city| CityListing {
                id: city.id,
                name: city.name.clone(),
                slug: city_slug(city, &state.name),
                state: state.name.clone(),
                state_code: state_prefix(&state.name).to_uppercase(),
                business_count: listings_in_city(listings, index.salons_in_city(city.id))
                    .count(),
            })
            .filter(|c| c.business_count > 0)
            .collect();
        if cities.is_empty() {
            continue;
        }
        pages.push(StatePageData {
            state_name: state.name.clone(),
            business_count: cities.iter().map(|c| c.business_count).sum(),
            cities,
            slug: dash_lower(&state.name),
        });
    }
    pages
}

/// Pair every listing with up to five others sharing its city name.
/// Proximity is the city name alone; the state is not compared.
pub fn business_pages(listings: &[BusinessListing]) -> Vec<BusinessPageData> {
    listings
        .iter()
        .map(|business| BusinessPageData {
            nearby_businesses: listings
                .iter()
                .filter(|other| other.id != business.id && other.city == business.city)
                .take(MAX_NEARBY)
                .cloned()
                .collect(),
            slug: business.slug.clone(),
            business: business.clone(),
        })
        .collect()
}

/// Explicit city slug when present, else `{city}-{first two letters of state}`.
pub fn city_slug(city: &City, state_name: &str) -> String {
    clean_slug(&city.slug).unwrap_or_else(|| {
        format!(
            "{}-{}",
            dash_lower(&city.name),
            state_prefix(state_name).to_lowercase()
        )
    })
}

fn listings_in_city<'l>(
    listings: &'l [BusinessListing],
    salons: Option<&'l HashSet<i64>>,
) -> impl Iterator<Item = &'l BusinessListing> {
    listings
        .iter()
        .filter(move |l| salons.is_some_and(|s| s.contains(&l.id)))
}
