//! Reading transaction exports into raw rows

pub mod columns;
pub mod reader;

pub use columns::ColumnMap;
pub use reader::{read_file, read_rows, RawExport, RawRow};
