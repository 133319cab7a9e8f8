pub mod memory;
pub mod postgres;

pub use astrologer_core::repository::{ReadRepository, Repository};
pub use astrologer_core::StorageError;
pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;
