pub mod broadcasts;
pub mod catalog;
pub mod engagement;
pub mod giving;
pub mod health;
pub mod media;
pub mod progress;
pub mod search;
pub mod uploads;
