// First-run setup: seed the admin and backfill grants

use anyhow::Result;
use clearance_authorization::{backfill_missing_grants, bootstrap_admin};
use tracing::info;

use super::common::{print_principal, Session};

pub async fn run(session: &Session) -> Result<()> {
    let username = &session.config.admin_username;
    info!(store = %session.config.store_path.display(), "Initializing principal store");

    let admin = bootstrap_admin(session.store.as_ref(), username).await?;
    let backfilled = backfill_missing_grants(session.store.as_ref(), session.audit_sink()).await?;
    session.store.flush().await?;

    println!("Store: {}", session.config.store_path.display());
    print_principal(&admin);
    if backfilled > 0 {
        println!("Backfilled grants for {backfilled} principal(s)");
    }
    Ok(())
}
