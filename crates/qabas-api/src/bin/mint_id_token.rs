// Issue an ID token for local testing
//
// Usage: cargo run --bin mint-id-token -- <uid> <email> [--name <name>]
//
// The token is signed with QABAS_PRIVATE_KEY, so the API server accepts it
// as a bearer token or as the `idToken` of a login request.

use anyhow::Result;
use clap::Parser;
use qabas_api::auth::{AuthConfig, LocalIdentityProvider};
use qabas_core::IdentityClaims;

#[derive(Parser)]
#[command(name = "mint-id-token")]
#[command(about = "Issue a development ID token signed with QABAS_PRIVATE_KEY")]
struct Args {
    /// User id (token subject)
    uid: String,

    /// Email claim
    email: String,

    /// Display name claim
    #[arg(long)]
    name: Option<String>,

    /// Picture URL claim
    #[arg(long)]
    picture: Option<String>,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = AuthConfig::from_env()?;
    let provider = LocalIdentityProvider::new(config.identity);

    let token = provider.issue_id_token(&IdentityClaims {
        uid: args.uid,
        email: Some(args.email),
        name: args.name,
        picture: args.picture,
    })?;

    println!("{token}");
    Ok(())
}
