// Report module: renders catalog records for the terminal and as HTML.

pub mod console;
pub mod html;
