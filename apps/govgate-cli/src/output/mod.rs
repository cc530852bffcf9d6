//! Terminal output helpers

mod printer;
pub mod table;

pub use printer::{print_header, print_info, print_json, print_key_value, print_success, print_warning};
pub use table::{format_date, format_when, parse_comma_list, truncate, yes_no, Table};
