pub mod audit_log;
pub mod seeder;

pub use audit_log::AuditLogger;
pub use seeder::{Seeder, SeederOptions};
