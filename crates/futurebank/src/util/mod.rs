pub mod format;

pub use format::{format_amount, format_amount_precise, format_percentage};
