mod read;
mod write;

pub use read::ReadSession;
pub use write::WriteSession;
