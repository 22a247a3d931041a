pub mod config;
pub mod dates;
pub mod handler;
pub mod ical;
pub mod images;
pub mod model;
pub mod names;
pub mod portraits;
pub mod view_model;
