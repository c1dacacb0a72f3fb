pub mod health;
pub mod health_checks;
pub mod hotel_form;
pub mod hotels;
pub mod user;


pub use health::{health_handler, readiness_handler};
pub use hotels::{
    create_hotel_handler, delete_hotel_handler, list_hotels_handler, show_hotel_handler,
    update_hotel_handler, update_hotel_via_form_handler,
};
pub use user::current_user_handler;
