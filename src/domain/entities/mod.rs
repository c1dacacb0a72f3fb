mod hotel;

pub use hotel::{Hotel, HotelChanges, NewHotel};
