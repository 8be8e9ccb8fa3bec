mod copy;
pub mod extract;
mod io;
pub mod range;
mod types;

pub use extract::{extract_page_ranges, extract_pages, extract_pages_sync};
pub use io::{load_pdf, load_pdf_mem, page_count, save_pdf, save_pdf_bytes, split_file_name};
pub use range::{PageRange, parse_page_ranges, resolve_page_ranges};
pub use types::*;
