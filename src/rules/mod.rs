//! Rule documents and the metadata generated for each supported tool.

pub mod category;
pub mod definition;
pub mod front_matter;
pub mod tool;

pub use definition::Definition;
pub use front_matter::FrontMatter;
pub use tool::Tool;
