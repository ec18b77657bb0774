/// WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    /// Manchester city centre; used whenever location sensing is unavailable.
    pub const FALLBACK: Point = Point {
        lat: 53.480759,
        lng: -2.242631,
    };

    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_manchester() {
        assert_eq!(Point::FALLBACK.lat, 53.480759);
        assert_eq!(Point::FALLBACK.lng, -2.242631);
        assert!(Point::FALLBACK.is_valid());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(!Point::new(91.0, 0.0).is_valid());
        assert!(!Point::new(0.0, f64::NAN).is_valid());
    }
}
