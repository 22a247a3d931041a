pub mod card;
pub mod reservation;
