pub mod deadline;
pub mod newtype_index;
