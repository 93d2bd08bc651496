mod access;
mod directory_entry;
mod loading;
mod location;
mod place;

pub use access::AccessState;
pub use directory_entry::{DirectoryEntry, PageCoordinates, Thumbnail, NO_DESCRIPTION};
pub use loading::LoadingState;
pub use location::Coordinates;
pub use place::{Place, PlaceUpdate, DEFAULT_PLACE_NAME};
