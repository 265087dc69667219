// Repositories own the SQL for one table each. Every method runs on the
// caller's borrowed pool connection and is awaited inside the request future,
// so dropping the request cancels the in-flight query.
//
// Name-uniqueness is check-then-act: repositories expose exact-name lookups
// for the command layer's pre-checks, and the unique indexes on lower(name)
// catch the concurrent-create race the pre-check cannot see.

pub mod category;
pub mod log;
pub mod product;
pub mod user;

pub use category::CategoryRepository;
pub use log::LogRepository;
pub use product::ProductRepository;
pub use user::UserRepository;
