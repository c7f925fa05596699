pub mod cli;
pub mod launch;
