pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryUserRepository;
pub use postgres::PostgresUserRepository;
pub use store::UserStore;
