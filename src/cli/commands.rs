pub mod initdb;
pub mod reset;
pub mod seed;
pub mod showcase;

pub use initdb::init_database;
pub use reset::reset_database;
pub use seed::seed_database;
pub use showcase::showcase;
