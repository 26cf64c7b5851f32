pub mod batch_driver;
pub mod literal_writer;

pub use batch_driver::{BatchDriver, BatchProgress, BatchReport, EntryReport};
pub use literal_writer::{render_literals, LiteralWriter};
