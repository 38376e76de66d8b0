pub mod auth_service;
pub mod order_service;
pub mod payment_service;
pub mod resource_service;
pub mod user_service;
