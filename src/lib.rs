pub mod analyze;
pub mod capture;
pub mod metric;
pub mod replay;
pub mod trace;

#[cfg(test)]
mod test;
