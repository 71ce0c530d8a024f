use crate::models::BusinessListing;
use crate::source::Salon;
use crate::utils::{clean_slug, split_services, title_slug};

use super::index::RelationIndex;

pub fn build_listings(salons: &[&Salon], index: &RelationIndex) -> Vec<BusinessListing> {
    salons.iter().map(|s| build_listing(s, index)).collect()
}

/// Project one salon into its listing. Unresolvable associations become
/// empty strings or lists; an empty service list gets the default services.
pub fn build_listing(salon: &Salon, index: &RelationIndex) -> BusinessListing {
    let city = index.canonical_city(salon.id);
    let state = city.and_then(|c| index.state(c.state_id));

    BusinessListing {
        id: salon.id,
        name: salon.title.clone(),
        slug: listing_slug(salon),
        address: salon.address.clone(),
        city: city.map(|c| c.name.clone()).unwrap_or_default(),
        state: state.map(|s| s.name.clone()).unwrap_or_default(),
        zip_code: salon.postal_code.clone(),
        phone: salon.phone.clone(),
        email: salon.email.clone(),
        website: salon.website.clone(),
        description: salon.description.clone(),
        hours: salon.opening_hours.clone(),
        services: split_services(&salon.service_product),
        amenities: index.amenity_names(salon.id),
        payment_methods: index.payment_names(salon.id),
        details: index.details(salon.id),
        rating: salon.rating,
        reviews: salon.reviews,
        latitude: salon.latitude,
        longitude: salon.longitude,
        images: index.image_urls(salon.id),
        categories: index.category_names(salon.id),
    }
}

fn listing_slug(salon: &Salon) -> String {
    clean_slug(&salon.slug).unwrap_or_else(|| title_slug(&salon.title, salon.id))
}
