pub mod data;
pub mod design;
pub mod experience;
pub mod portfolio;
pub mod profile;
pub mod project;
