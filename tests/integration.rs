#[path = "integration/cli.rs"]
mod cli;
#[path = "integration/end_to_end.rs"]
mod end_to_end;
#[path = "integration/errors.rs"]
mod errors;
#[path = "integration/files.rs"]
mod files;
#[path = "integration/properties.rs"]
mod properties;
