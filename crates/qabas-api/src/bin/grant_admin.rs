// Grant admin access to a user id
//
// Usage: cargo run --bin grant-admin -- <uid> <email>
//
// Writes the `admins` document for the uid. Requires DATABASE_URL; the
// in-memory store does not outlive this process.

use anyhow::Result;
use clap::Parser;
use qabas_api::services::AdminService;
use qabas_storage::StorageBackend;

#[derive(Parser)]
#[command(name = "grant-admin")]
#[command(about = "Grant admin access to a user id")]
struct Args {
    /// User id to grant
    uid: String,

    /// Email recorded alongside the grant
    email: String,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let store = StorageBackend::postgres(&args.database_url).await?;

    AdminService::new(store, Vec::new())
        .grant(&args.uid, &args.email)
        .await?;
    println!("Granted admin access to {} ({})", args.uid, args.email);
    Ok(())
}
