//! Mint an access token for operators and scripts.
//!
//! ```text
//! rolegate-token <subject> [role...]
//! ```
//!
//! Reads `JWT_SECRET` / `JWT_ACCESS_EXPIRY_MINS` exactly like the server.

use std::process::ExitCode;

use rolegate_api::auth::jwt::{generate_access_token, JwtConfig};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let Some(subject) = args.next() else {
        eprintln!("usage: rolegate-token <subject> [role...]");
        return ExitCode::from(2);
    };
    let roles: Vec<String> = args.collect();

    let config = JwtConfig::from_env();
    match generate_access_token(&subject, &roles, &config) {
        Ok(token) => {
            println!("{token}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("failed to sign token: {e}");
            ExitCode::FAILURE
        }
    }
}
