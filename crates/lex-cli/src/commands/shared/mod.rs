pub mod input;
pub mod parse;
pub mod session;
