mod postgres_hotel_repository;

pub use postgres_hotel_repository::PostgresHotelRepository;
