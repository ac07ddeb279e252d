pub mod dictionary;
pub mod rules;
pub mod sanitize;
pub mod translate;
