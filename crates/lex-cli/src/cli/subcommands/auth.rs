use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password.
    Signin(AuthSigninArgs),
    /// Create an account and its organization.
    Signup(AuthSignupArgs),
    /// Sign out and clear the stored session.
    Signout,
    /// Show the current session and organization.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthSigninArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthSignupArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// Organization name.
    #[arg(long)]
    pub org_name: String,
    /// Headquarters location.
    #[arg(long)]
    pub hq: String,
    /// Billing plan: monthly, 1_year, 2_year, 5_year.
    #[arg(long, default_value = "monthly")]
    pub plan: String,
}
