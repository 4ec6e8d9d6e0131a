pub mod backup;
pub mod commands;
pub mod git;
pub mod paths;
pub mod profiles;
pub mod ssh_config;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
