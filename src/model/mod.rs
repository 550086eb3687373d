pub mod effect;
pub mod profile;
pub mod rates;
pub mod rating;
pub mod record;

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
