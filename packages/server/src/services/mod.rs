pub mod design_registry;
pub mod tag_store;

pub use design_registry::{DesignRegistry, RegistryError};
pub use tag_store::{DataItemPage, DataItemRecord, TagStore};
