pub mod category;
pub mod log;
pub mod product;
pub mod user;

pub use category::{Category, CategoryLookup};
pub use log::{AppLog, LogEntry};
pub use product::Product;
pub use user::User;
