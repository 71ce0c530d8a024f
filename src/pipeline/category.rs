use std::collections::HashSet;

use crate::error::{Result, SiteError};
use crate::source::{Named, Salon, SalonEdge};

/// Id of the category whose name matches `name`, ignoring case.
pub fn find_category_id(categories: &[Named], name: &str) -> Result<i64> {
    let wanted = name.to_lowercase();
    categories
        .iter()
        .find(|c| c.name.to_lowercase() == wanted)
        .map(|c| c.id)
        .ok_or_else(|| SiteError::MissingCategory {
            name: name.to_string(),
        })
}

/// Salons carrying at least one edge to `category_id`, in salon-table order.
/// Repeated edges do not repeat a salon.
pub fn filter_salons<'a>(
    salons: &'a [Salon],
    salon_categories: &[SalonEdge],
    category_id: i64,
) -> Vec<&'a Salon> {
    let members: HashSet<i64> = salon_categories
        .iter()
        .filter(|e| e.target_id == category_id)
        .map(|e| e.salon_id)
        .collect();
    salons.iter().filter(|s| members.contains(&s.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: i64, name: &str) -> Named {
        Named {
            id,
            name: name.to_string(),
        }
    }

    fn edge(id: i64, salon_id: i64, target_id: i64) -> SalonEdge {
        SalonEdge {
            id,
            salon_id,
            target_id,
        }
    }

    fn salon(id: i64) -> Salon {
        Salon {
            id,
            title: format!("Salon {id}"),
            ..Default::default()
        }
    }

    #[test]
    fn only_electrolysis_salons_survive() {
        let categories = vec![named(1, "Electrolysis"), named(2, "Waxing")];
        let edges = vec![edge(1, 10, 1), edge(2, 11, 2)];
        let salons = vec![salon(10), salon(11)];

        let id = find_category_id(&categories, "electrolysis").unwrap();
        let ids: Vec<i64> = filter_salons(&salons, &edges, id).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![10]);
    }

    #[test]
    fn duplicate_edges_do_not_duplicate_salons() {
        let edges = vec![edge(1, 10, 1), edge(2, 10, 1), edge(3, 12, 1)];
        let salons = vec![salon(12), salon(10)];
        let ids: Vec<i64> = filter_salons(&salons, &edges, 1).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![12, 10]);
    }

    #[test]
    fn missing_category_is_fatal() {
        let err = find_category_id(&[named(2, "Waxing")], "Electrolysis").unwrap_err();
        assert!(matches!(err, SiteError::MissingCategory { ref name } if name == "Electrolysis"));
    }
}
