pub mod document;
pub mod order;
pub mod resource;
pub mod user;

pub use document::*;
pub use order::*;
pub use resource::*;
pub use user::*;
