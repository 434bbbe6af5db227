pub mod game;
pub mod link;
#[cfg(test)]
pub mod test_support;
