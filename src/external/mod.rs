pub mod wikipedia;

pub use wikipedia::DirectoryClient;
