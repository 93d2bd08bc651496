use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// NaN and infinities have no JSON form and cannot be stored.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

// geosearch expects "<lat>|<lon>"
impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{}|{}", coordinates.latitude, coordinates.longitude)
    }
}

#[test]
fn non_finite_coordinates() {
    assert!(Coordinates::new(51.501, -0.141).is_finite());
    assert!(!Coordinates::new(f64::NAN, 0.0).is_finite());
    assert!(!Coordinates::new(0.0, f64::INFINITY).is_finite());
}

#[test]
fn coordinates_into_geosearch_string() {
    let coordinates = Coordinates::new(51.501, -0.141);
    let s: String = coordinates.into();

    assert_eq!(s, "51.501|-0.141");
}
