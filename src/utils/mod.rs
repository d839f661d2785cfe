//! Utility helpers: serializers for parameter files.
pub mod serialization;

pub use serialization::{load_file, JsonSerializer, Serializer, YamlSerializer};
