/// Filesystem adapters for file I/O operations
mod documents;
mod file_reader;
mod file_writer;

pub use documents::DocumentFormat;
pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
