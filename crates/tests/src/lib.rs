pub mod fixtures;

#[cfg(test)]
mod deal_crud_tests;
