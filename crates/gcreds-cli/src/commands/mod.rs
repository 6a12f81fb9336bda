use clap::Subcommand;

pub mod exec;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod status;

// Re-export the command args structs
pub use exec::ExecArgs;
pub use login::LoginArgs;
pub use logout::LogoutArgs;
pub use refresh::RefreshArgs;
pub use status::StatusArgs;

// Example strings for after_long_help
const LOGIN_EXAMPLES: &str = r#"EXAMPLES:
  gcreds login                             # Sign in and store credentials
  gcreds login --timeout 300               # Give up after five minutes without a redirect
  gcreds login --client-id ID --client-secret SECRET"#;

const REFRESH_EXAMPLES: &str = r#"EXAMPLES:
  gcreds refresh                           # Refresh, signing in again only if rejected
  gcreds refresh --timeout 300             # Bound the sign-in wait"#;

const LOGOUT_EXAMPLES: &str = r#"EXAMPLES:
  gcreds logout                            # Delete the credential file"#;

const STATUS_EXAMPLES: &str = r#"EXAMPLES:
  gcreds status                            # Inspect the credential file, offline"#;

const EXEC_EXAMPLES: &str = r#"EXAMPLES:
  gcreds exec -- gsutil ls gs://my-bucket  # Child sees GOOGLE_APPLICATION_CREDENTIALS
  gcreds exec --timeout 300 -- python upload.py"#;

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with Google and store fresh credentials
    #[command(after_long_help = LOGIN_EXAMPLES)]
    Login(LoginArgs),
    /// Make stored credentials usable, signing in again only when needed
    #[command(after_long_help = REFRESH_EXAMPLES)]
    Refresh(RefreshArgs),
    /// Delete stored credentials
    #[command(after_long_help = LOGOUT_EXAMPLES)]
    Logout(LogoutArgs),
    /// Report the state of the credential file
    #[command(after_long_help = STATUS_EXAMPLES)]
    Status(StatusArgs),
    /// Run a command with GOOGLE_APPLICATION_CREDENTIALS pointing at the credential file
    #[command(after_long_help = EXEC_EXAMPLES)]
    Exec(ExecArgs),
}
