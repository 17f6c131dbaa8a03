//! Save-document persistence behind a repository trait.

mod error;
mod file;
mod memory;
mod traits;

pub use error::RepositoryError;
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
