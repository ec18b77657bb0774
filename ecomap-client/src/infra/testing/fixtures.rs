use ecomap_model::prelude::*;
use std::ops::RangeInclusive;

/// A facility near Manchester with deterministic fields derived from `id`.
pub fn facility(id: u64) -> Facility {
    Facility {
        id: FacilityId(id),
        title: format!("Facility {id}"),
        description: format!("Recycling point number {id}"),
        category_id: CategoryId(1 + id % 3),
        category_name: "Recycling".to_string(),
        lat: 53.48 + id as f64 * 0.001,
        lng: -2.24 - id as f64 * 0.001,
        house_number: Some(id.to_string()),
        street_name: Some("Oxford Road".to_string()),
        town: Some("Manchester".to_string()),
        postcode: Some("M1 1AA".to_string()),
        distance: None,
    }
}

/// One page holding a facility per id in `ids`.
pub fn page_of(ids: RangeInclusive<u64>, total: u64, pages: u32) -> FacilityPage {
    FacilityPage {
        facilities: ids.map(facility).collect(),
        total,
        pages,
    }
}

pub fn category(id: u64, name: &str) -> Category {
    Category {
        id: CategoryId(id),
        name: name.to_string(),
    }
}

pub fn comment(id: u64, facility_id: u64, author_id: u64, text: &str) -> StatusComment {
    StatusComment {
        id: StatusId(id),
        facility_id: FacilityId(facility_id),
        author_id: UserId(author_id),
        author_name: format!("user{author_id}"),
        text: text.to_string(),
        created_at: None,
    }
}
