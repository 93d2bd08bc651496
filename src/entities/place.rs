use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

pub const DEFAULT_PLACE_NAME: &str = "New location";

/// A named point of interest on the user's bucket list.
///
/// Identity is `id`; lookups and updates always match on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    pub fn new(coordinates: Coordinates) -> Self {
        Place {
            id: Uuid::new_v4(),
            name: DEFAULT_PLACE_NAME.into(),
            description: "".into(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        }
    }

    pub fn example() -> Self {
        Place {
            id: Uuid::new_v4(),
            name: "Buckingham Palace".into(),
            description: "Lit by over 40,000 lightbulbs.".into(),
            latitude: 51.501,
            longitude: -0.141,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn apply(&mut self, update: PlaceUpdate) {
        self.name = update.name;
        self.description = update.description;
        self.latitude = update.latitude;
        self.longitude = update.longitude;
    }
}

/// Replacement values for every mutable field of a [`Place`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceUpdate {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceUpdate {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

impl From<&Place> for PlaceUpdate {
    fn from(place: &Place) -> Self {
        PlaceUpdate {
            name: place.name.clone(),
            description: place.description.clone(),
            latitude: place.latitude,
            longitude: place.longitude,
        }
    }
}

#[test]
fn new_place_uses_default_name() {
    let place = Place::new(Coordinates::new(56.0, -3.0));

    assert_eq!(place.name, DEFAULT_PLACE_NAME);
    assert_eq!(place.description, "");
    assert_eq!(place.coordinates(), Coordinates::new(56.0, -3.0));
}

#[test]
fn apply_keeps_identity() {
    let mut place = Place::example();
    let id = place.id;

    place.apply(PlaceUpdate {
        name: "Palace".into(),
        description: "".into(),
        latitude: 1.0,
        longitude: 2.0,
    });

    assert_eq!(place.id, id);
    assert_eq!(place.name, "Palace");
    assert_eq!(place.coordinates(), Coordinates::new(1.0, 2.0));
}

#[test]
fn place_serializes_with_flat_field_names() {
    let place = Place::example();
    let value = serde_json::to_value(&place).unwrap();

    for field in ["id", "name", "description", "latitude", "longitude"] {
        assert!(value.get(field).is_some(), "missing {}", field);
    }
}
