pub mod config;
pub mod flux;
pub mod monitor;
pub mod transport;

#[cfg(test)]
mod test_support;
