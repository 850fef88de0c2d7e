pub mod assign;
pub mod sweep;
