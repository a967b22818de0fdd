//! CLI command implementations

pub mod diff;
pub mod fields;
pub mod generate;
pub mod new;
pub mod preview;

pub use diff::DiffCommand;
pub use fields::FieldsCommand;
pub use generate::GenerateCommand;
pub use new::NewCommand;
pub use preview::PreviewCommand;
