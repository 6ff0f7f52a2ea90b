pub mod actions;
pub mod species;
pub mod types;

#[cfg(test)]
mod tests;
