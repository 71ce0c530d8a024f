use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::warn;

use crate::source::{City, Named, SalonEdge, SourceTables};

/// Read-only relational view over the loaded tables.
///
/// Lookup tables are indexed id → row position (first row wins on a
/// duplicated id) and junction tables are grouped by salon id, so each
/// association is resolved without rescanning whole tables. Resolved lists
/// keep the order of the table they come from.
pub struct RelationIndex<'a> {
    tables: &'a SourceTables,
    category_pos: HashMap<i64, usize>,
    city_pos: HashMap<i64, usize>,
    state_pos: HashMap<i64, usize>,
    amenity_pos: HashMap<i64, usize>,
    payment_pos: HashMap<i64, usize>,
    categories_by_salon: HashMap<i64, Vec<i64>>,
    cities_by_salon: HashMap<i64, Vec<i64>>,
    amenities_by_salon: HashMap<i64, Vec<i64>>,
    payments_by_salon: HashMap<i64, Vec<i64>>,
    salons_by_city: HashMap<i64, HashSet<i64>>,
    cities_by_state: HashMap<i64, Vec<usize>>,
    details_by_salon: HashMap<i64, Vec<usize>>,
    images_by_salon: HashMap<i64, Vec<usize>>,
}

impl<'a> RelationIndex<'a> {
    pub fn build(tables: &'a SourceTables) -> Self {
        let category_pos = positions(tables.categories.iter().map(|c| c.id));
        let city_pos = positions(tables.cities.iter().map(|c| c.id));
        let state_pos = positions(tables.states.iter().map(|s| s.id));
        let amenity_pos = positions(tables.amenities.iter().map(|a| a.id));
        let payment_pos = positions(tables.payments.iter().map(|p| p.id));

        warn_dangling("category", &tables.salon_categories, &category_pos);
        warn_dangling("city", &tables.city_salons, &city_pos);
        warn_dangling("amenity", &tables.salon_amenities, &amenity_pos);
        warn_dangling("payment", &tables.salon_payments, &payment_pos);

        RelationIndex {
            tables,
            categories_by_salon: by_salon(&tables.salon_categories),
            cities_by_salon: by_salon(&tables.city_salons),
            amenities_by_salon: by_salon(&tables.salon_amenities),
            payments_by_salon: by_salon(&tables.salon_payments),
            salons_by_city: tables
                .city_salons
                .iter()
                .map(|e| (e.target_id, e.salon_id))
                .into_grouping_map()
                .collect::<HashSet<_>>(),
            cities_by_state: tables
                .cities
                .iter()
                .enumerate()
                .map(|(pos, c)| (c.state_id, pos))
                .into_group_map(),
            details_by_salon: tables
                .details
                .iter()
                .enumerate()
                .map(|(pos, d)| (d.salon_id, pos))
                .into_group_map(),
            images_by_salon: tables
                .images
                .iter()
                .enumerate()
                .map(|(pos, i)| (i.salon_id, pos))
                .into_group_map(),
            category_pos,
            city_pos,
            state_pos,
            amenity_pos,
            payment_pos,
        }
    }

    pub fn tables(&self) -> &'a SourceTables {
        self.tables
    }

    pub fn category_names(&self, salon_id: i64) -> Vec<String> {
        resolve_names(
            &self.tables.categories,
            &self.category_pos,
            self.categories_by_salon.get(&salon_id),
        )
    }

    pub fn amenity_names(&self, salon_id: i64) -> Vec<String> {
        resolve_names(
            &self.tables.amenities,
            &self.amenity_pos,
            self.amenities_by_salon.get(&salon_id),
        )
    }

    pub fn payment_names(&self, salon_id: i64) -> Vec<String> {
        resolve_names(
            &self.tables.payments,
            &self.payment_pos,
            self.payments_by_salon.get(&salon_id),
        )
    }

    /// The salon's canonical city: of all linked cities, the one listed
    /// first in the city table.
    pub fn canonical_city(&self, salon_id: i64) -> Option<&'a City> {
        let pos = self
            .cities_by_salon
            .get(&salon_id)?
            .iter()
            .filter_map(|id| self.city_pos.get(id).copied())
            .min()?;
        Some(&self.tables.cities[pos])
    }

    pub fn state(&self, state_id: i64) -> Option<&'a Named> {
        let pos = *self.state_pos.get(&state_id)?;
        Some(&self.tables.states[pos])
    }

    /// Cities of a state in city-table order.
    pub fn cities_in_state(&self, state_id: i64) -> impl Iterator<Item = &'a City> + '_ {
        let tables = self.tables;
        self.cities_by_state
            .get(&state_id)
            .into_iter()
            .flatten()
            .map(move |pos| &tables.cities[*pos])
    }

    /// Salon ids linked to a city through the city junction table.
    pub fn salons_in_city(&self, city_id: i64) -> Option<&HashSet<i64>> {
        self.salons_by_city.get(&city_id)
    }

    /// Detail rows folded into a map in file order; a repeated key keeps its
    /// first position and takes the last value.
    pub fn details(&self, salon_id: i64) -> IndexMap<String, String> {
        let mut map = IndexMap::new();
        for pos in self.details_by_salon.get(&salon_id).into_iter().flatten() {
            let detail = &self.tables.details[*pos];
            map.insert(detail.key.clone(), detail.value.clone());
        }
        map
    }

    pub fn image_urls(&self, salon_id: i64) -> Vec<String> {
        self.images_by_salon
            .get(&salon_id)
            .into_iter()
            .flatten()
            .map(|pos| self.tables.images[*pos].url.clone())
            .collect()
    }
}

fn positions(ids: impl Iterator<Item = i64>) -> HashMap<i64, usize> {
    let mut map = HashMap::new();
    for (pos, id) in ids.enumerate() {
        map.entry(id).or_insert(pos);
    }
    map
}

fn by_salon(edges: &[SalonEdge]) -> HashMap<i64, Vec<i64>> {
    edges
        .iter()
        .map(|e| (e.salon_id, e.target_id))
        .into_group_map()
}

fn resolve_names(
    table: &[Named],
    pos_by_id: &HashMap<i64, usize>,
    ids: Option<&Vec<i64>>,
) -> Vec<String> {
    ids.into_iter()
        .flatten()
        .filter_map(|id| pos_by_id.get(id).copied())
        .sorted_unstable()
        .dedup()
        .map(|pos| table[pos].name.clone())
        .collect()
}

fn warn_dangling(table: &str, edges: &[SalonEdge], known: &HashMap<i64, usize>) {
    let dangling: Vec<i64> = edges
        .iter()
        .filter(|e| !known.contains_key(&e.target_id))
        .map(|e| e.id)
        .collect();
    if let Some(first) = dangling.first() {
        warn!(
            table,
            count = dangling.len(),
            first_edge = *first,
            "junction edges reference unknown ids"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn fixture() -> SourceTables {
        SourceTables::load(Path::new("tests/fixtures/directory")).unwrap()
    }

    #[test]
    fn names_follow_lookup_table_order() {
        let tables = fixture();
        let index = RelationIndex::build(&tables);
        // edges list Parking before Wi-Fi; the amenity table lists Wi-Fi first
        assert_eq!(index.amenity_names(7), vec!["Wi-Fi", "Parking"]);
        // duplicate Electrolysis edge for salon 10 resolves once
        assert_eq!(index.category_names(10), vec!["Electrolysis", "Waxing"]);
        // amenity 99 does not exist
        assert_eq!(index.amenity_names(10), vec!["Wheelchair Accessible"]);
        assert!(index.payment_names(13).is_empty());
    }

    #[test]
    fn canonical_city_is_first_in_city_table() {
        let tables = fixture();
        let index = RelationIndex::build(&tables);
        // salon 12 is linked to Dallas (id 5) before Houston (id 2)
        assert_eq!(index.canonical_city(12).map(|c| c.name.as_str()), Some("Houston"));
        assert!(index.canonical_city(999).is_none());
    }

    #[test]
    fn details_last_value_wins() {
        let tables = fixture();
        let index = RelationIndex::build(&tables);
        let details = index.details(10);
        let pairs: Vec<(&str, &str)> = details
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(pairs, vec![("Accessibility", "Elevator"), ("Gender", "Women-owned")]);
    }

    #[test]
    fn cities_grouped_by_state() {
        let tables = fixture();
        let index = RelationIndex::build(&tables);
        let texas: Vec<&str> = index.cities_in_state(1).map(|c| c.name.as_str()).collect();
        assert_eq!(texas, vec!["Austin", "Houston", "El Paso", "Dallas"]);
        let vermont: Vec<&str> = index.cities_in_state(3).map(|c| c.name.as_str()).collect();
        assert_eq!(vermont, vec!["Burlington"]);
        assert!(index.salons_in_city(7).unwrap().contains(&11));
        assert!(index.salons_in_city(1).unwrap().contains(&11));
        assert_eq!(index.state(9).map(|s| s.id), None);
    }
}
