//! HTTP clients for remote services

pub mod hotels_api;

pub use hotels_api::HttpHotelSource;
