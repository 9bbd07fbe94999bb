pub mod entities;
pub mod errors;
pub mod events;
pub mod finders;
pub mod ports;
pub mod services;
