pub mod doh;
pub mod rules;
