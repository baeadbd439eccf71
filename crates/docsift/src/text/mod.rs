pub mod cleanup;
pub mod markdown;

pub use cleanup::{clean_extracted_text, substitute_confusables};
pub use markdown::{markdown_to_plain, plain_to_markdown};
