pub mod data;
pub mod folder;
pub mod genre;
pub mod style;
pub mod tags;
