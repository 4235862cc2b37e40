//! Small parsing helpers shared by services and controllers.

pub mod parse;
