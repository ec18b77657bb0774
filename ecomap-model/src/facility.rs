use crate::geo::Point;
use crate::ids::{CategoryId, FacilityId};

/// Snapshot of one facility row as returned by the paginate endpoint.
///
/// Records are never patched in place; an updated facility arrives as a full
/// replacement on a later fetch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facility {
    pub id: FacilityId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(rename = "category"))]
    pub category_id: CategoryId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category_name: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::serde_helpers::f64_lenient")
    )]
    pub lat: f64,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::serde_helpers::f64_lenient")
    )]
    pub lng: f64,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "housenumber",
            default,
            deserialize_with = "crate::serde_helpers::opt_non_empty"
        )
    )]
    pub house_number: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "streetname",
            default,
            deserialize_with = "crate::serde_helpers::opt_non_empty"
        )
    )]
    pub street_name: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::serde_helpers::opt_non_empty"
        )
    )]
    pub town: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::serde_helpers::opt_non_empty"
        )
    )]
    pub postcode: Option<String>,
    /// Kilometres from the viewer, when the server computed it.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::serde_helpers::opt_f64_lenient"
        )
    )]
    pub distance: Option<f64>,
}

impl Facility {
    pub fn position(&self) -> Point {
        Point::new(self.lat, self.lng)
    }

    /// `"12 High Street, Salford, M5 4WT"`, skipping absent parts.
    pub fn address_line(&self) -> String {
        let street = match (&self.house_number, &self.street_name) {
            (Some(number), Some(street)) => Some(format!("{number} {street}")),
            (None, Some(street)) => Some(street.clone()),
            (Some(number), None) => Some(number.clone()),
            (None, None) => None,
        };

        [street, self.town.clone(), self.postcode.clone()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `"Salford, M5 4WT"` as shown under the title in list rows.
    pub fn locality(&self) -> String {
        [self.town.as_deref(), self.postcode.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Reference data for the category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Facility {
        Facility {
            id: FacilityId(1),
            title: "Community Compost".into(),
            description: "Garden waste drop-off".into(),
            category_id: CategoryId(2),
            category_name: "Composting".into(),
            lat: 53.48,
            lng: -2.24,
            house_number: Some("12".into()),
            street_name: Some("High Street".into()),
            town: Some("Salford".into()),
            postcode: None,
            distance: Some(1.234),
        }
    }

    #[test]
    fn address_line_skips_missing_parts() {
        assert_eq!(sample().address_line(), "12 High Street, Salford");
        assert_eq!(sample().locality(), "Salford");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn decodes_server_row_with_string_numbers() {
        let raw = r#"{
            "id": "14",
            "title": "Bottle Bank",
            "description": "Glass recycling",
            "category": "3",
            "category_name": "Recycling",
            "lat": "53.4794",
            "lng": -2.2453,
            "housenumber": "",
            "streetname": "Deansgate",
            "town": "Manchester",
            "postcode": "M3 2BW",
            "distance": "0.82"
        }"#;

        let facility: Facility = serde_json::from_str(raw).unwrap();
        assert_eq!(facility.id, FacilityId(14));
        assert_eq!(facility.category_id, CategoryId(3));
        assert_eq!(facility.lat, 53.4794);
        assert_eq!(facility.house_number, None);
        assert_eq!(facility.distance, Some(0.82));
        assert_eq!(facility.address_line(), "Deansgate, Manchester, M3 2BW");
    }
}
