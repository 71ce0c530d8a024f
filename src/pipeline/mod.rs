pub mod category;
pub mod index;
pub mod listing;
pub mod pages;

use tracing::info;

use crate::error::Result;
use crate::models::PagesData;
use crate::source::SourceTables;
use index::RelationIndex;

/// Category filter → listings → city, state and business pages.
pub fn generate(tables: &SourceTables, category: &str) -> Result<PagesData> {
    let category_id = category::find_category_id(&tables.categories, category)?;
    let providers = category::filter_salons(&tables.salons, &tables.salon_categories, category_id);
    info!(
        "Found {} {} providers out of {} salons",
        providers.len(),
        category,
        tables.salons.len()
    );

    let index = RelationIndex::build(tables);
    let business_listings = listing::build_listings(&providers, &index);
    let city_pages = pages::city_pages(&business_listings, &index);
    let state_pages = pages::state_pages(&business_listings, &index);
    let business_pages = pages::business_pages(&business_listings);
    info!(
        cities = city_pages.len(),
        states = state_pages.len(),
        "assembled pages"
    );

    Ok(PagesData {
        business_listings,
        city_pages,
        state_pages,
        business_pages,
    })
}
