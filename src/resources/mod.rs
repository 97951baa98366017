mod spreadsheet;

pub use spreadsheet::{is_supported, load_spreadsheet, SUPPORTED_EXTENSIONS};
