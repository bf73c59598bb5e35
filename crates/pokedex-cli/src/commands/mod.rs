// One module per subcommand. main.rs parses arguments and dispatches here.

pub mod cache;
pub mod evolution;
pub mod matchups;
pub mod show;
