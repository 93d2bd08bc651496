use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{
    entities::{Coordinates, Place, PlaceUpdate},
    error::Error,
};

pub const SAVE_FILE_NAME: &str = "SavedPlaces";

/// Places persisted as a JSON array in a single file.
///
/// Every mutation is written through before it returns. A mutation whose
/// write fails is rolled back in memory, so the in-memory list always
/// matches what the next `load` would see.
#[derive(Debug)]
pub struct PlaceStore {
    path: PathBuf,
    places: Vec<Place>,
}

impl PlaceStore {
    #[tracing::instrument(name = "PlaceStore::open")]
    pub fn open(path: PathBuf) -> Self {
        let places = load(&path);
        tracing::info!(count = places.len(), "loaded places");

        Self { path, places }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn get(&self, id: Uuid) -> Option<&Place> {
        self.places.iter().find(|place| place.id == id)
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> Result<(), Error> {
        save(&self.path, &self.places)
    }

    #[tracing::instrument(skip(self))]
    pub fn add(&mut self, at: Coordinates) -> Result<Place, Error> {
        if !at.is_finite() {
            return Err(Error::invalid_input_error());
        }

        let place = Place::new(at);
        self.places.push(place.clone());

        if let Err(err) = self.save() {
            self.places.pop();
            return Err(err);
        }

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    pub fn update(&mut self, id: Uuid, update: PlaceUpdate) -> Result<Place, Error> {
        let index = self
            .places
            .iter()
            .position(|place| place.id == id)
            .ok_or_else(Error::not_found_error)?;

        if !update.coordinates().is_finite() {
            return Err(Error::invalid_input_error());
        }

        let previous = self.places[index].clone();
        self.places[index].apply(update);

        if let Err(err) = self.save() {
            self.places[index] = previous;
            return Err(err);
        }

        Ok(self.places[index].clone())
    }
}

/// Reads places from `path`. Missing or unreadable data is an empty list.
pub fn load(path: &Path) -> Vec<Place> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return vec![],
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "unable to read places");
            return vec![];
        }
    };

    match serde_json::from_slice(&data) {
        Ok(places) => places,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "unable to decode places");
            vec![]
        }
    }
}

/// Writes `places` to `path` through a synced temp file and a rename.
pub fn save(path: &Path, places: &[Place]) -> Result<(), Error> {
    let data = serde_json::to_vec(places)?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(&data)?;
    temp_file.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    temp_file.persist(path)?;

    tracing::debug!(count = places.len(), "saved places");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::DEFAULT_PLACE_NAME;

    fn store_in(dir: &tempfile::TempDir) -> PlaceStore {
        PlaceStore::open(dir.path().join(SAVE_FILE_NAME))
    }

    #[test]
    fn cold_start_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.places().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SAVE_FILE_NAME);
        fs::write(&path, b"{ not json").unwrap();

        assert!(load(&path).is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SAVE_FILE_NAME);

        let places = vec![
            Place::example(),
            Place::new(Coordinates::new(56.0, -3.0)),
            Place::new(Coordinates::new(-33.8568, 151.2153)),
        ];

        save(&path, &places).unwrap();

        assert_eq!(load(&path), places);
    }

    #[test]
    fn save_creates_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SAVE_FILE_NAME);

        save(&path, &[Place::example()]).unwrap();

        assert_eq!(load(&path).len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SAVE_FILE_NAME);
        save(&path, &[]).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn add_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.add(Coordinates::new(1.0, 1.0)).unwrap();

        let place = store.add(Coordinates::new(51.501, -0.141)).unwrap();

        assert_eq!(place.coordinates(), Coordinates::new(51.501, -0.141));
        assert_eq!(place.name, DEFAULT_PLACE_NAME);
        assert_eq!(place.description, "");
        assert_eq!(store.places().len(), 2);
        assert_eq!(store.places().last(), Some(&place));

        let reopened = store_in(&dir);
        assert_eq!(reopened.places(), store.places());
    }

    #[test]
    fn add_gives_fresh_ids() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        let a = store.add(Coordinates::new(0.0, 0.0)).unwrap();
        let b = store.add(Coordinates::new(0.0, 0.0)).unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn update_changes_only_target() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let first = store.add(Coordinates::new(1.0, 1.0)).unwrap();
        let second = store.add(Coordinates::new(2.0, 2.0)).unwrap();
        let third = store.add(Coordinates::new(3.0, 3.0)).unwrap();

        let before: Vec<Vec<u8>> = store
            .places()
            .iter()
            .map(|place| serde_json::to_vec(place).unwrap())
            .collect();

        let updated = store
            .update(
                second.id,
                PlaceUpdate {
                    name: "Edinburgh Castle".into(),
                    description: "On Castle Rock.".into(),
                    latitude: 55.9486,
                    longitude: -3.1999,
                },
            )
            .unwrap();

        assert_eq!(updated.id, second.id);
        assert_eq!(updated.name, "Edinburgh Castle");
        assert_eq!(store.places()[1], updated);

        let after: Vec<Vec<u8>> = store
            .places()
            .iter()
            .map(|place| serde_json::to_vec(place).unwrap())
            .collect();
        assert_eq!(before[0], after[0]);
        assert_eq!(before[2], after[2]);
        assert_ne!(before[1], after[1]);

        assert_eq!(store.places()[0].id, first.id);
        assert_eq!(store.places()[2].id, third.id);
        assert_eq!(store_in(&dir).places(), store.places());
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let place = store.add(Coordinates::new(1.0, 1.0)).unwrap();

        let err = store
            .update(Uuid::new_v4(), PlaceUpdate::from(&place))
            .unwrap_err();

        assert!(err.is_not_found_error());
        assert_eq!(store.places(), &[place]);
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let kept = store.add(Coordinates::new(1.0, 1.0)).unwrap();
        let target = store.add(Coordinates::new(2.0, 2.0)).unwrap();
        let on_disk = fs::read(store.path()).unwrap();

        let err = store.add(Coordinates::new(f64::NAN, 0.0)).unwrap_err();
        assert!(err.is_invalid_input_error());

        let mut update = PlaceUpdate::from(&target);
        update.latitude = f64::NAN;
        let err = store.update(target.id, update).unwrap_err();
        assert!(err.is_invalid_input_error());

        let mut update = PlaceUpdate::from(&target);
        update.longitude = f64::NEG_INFINITY;
        let err = store.update(target.id, update).unwrap_err();
        assert!(err.is_invalid_input_error());

        assert_eq!(store.places(), &[kept.clone(), target.clone()]);
        assert_eq!(fs::read(store.path()).unwrap(), on_disk);
        assert_eq!(store_in(&dir).places(), &[kept, target]);
    }

    #[test]
    fn failed_save_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let mut store = PlaceStore::open(blocker.join(SAVE_FILE_NAME));

        let err = store.add(Coordinates::new(1.0, 1.0)).unwrap_err();

        assert!(err.is_storage_error());
        assert!(store.places().is_empty());
    }

    #[test]
    fn failed_save_restores_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let place = store.add(Coordinates::new(1.0, 1.0)).unwrap();

        // point the store below a plain file so the next write fails
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        store.path = blocker.join(SAVE_FILE_NAME);

        let mut update = PlaceUpdate::from(&place);
        update.name = "Renamed".into();
        let err = store.update(place.id, update).unwrap_err();

        assert!(err.is_storage_error());
        assert_eq!(store.places(), &[place]);
    }
}
