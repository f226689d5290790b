pub mod data_item;
pub mod data_tag;
pub mod design_system;
pub mod experience;
pub mod profile;
pub mod project;
pub mod string_list;
pub mod tag;
