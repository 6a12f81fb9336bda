pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CREDENTIALS_FILE_NAME: &str = "credentials.json";
pub const BINARY_NAME: &str = env!("CARGO_BIN_NAME");
