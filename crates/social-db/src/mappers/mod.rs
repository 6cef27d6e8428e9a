//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects. Reaction
//! rows use `TryFrom` because the polarity column is free text.

mod analytics;
mod comment;
mod post;
mod reaction;
mod user;
