// Form data model: the draft record, its option lists, and field identifiers.

pub mod choices;
pub mod draft;
pub mod field;

pub use draft::{ApplicationDraft, FieldEdit};
pub use field::FieldId;
