//! Model to entity mappers
//!
//! - `From<Model> for Entity` where every column maps losslessly
//! - `TryFrom<Model>` where a column carries a constrained string

mod message;
mod preference;
mod reaction;
