// Grant-set replacement commands

use anyhow::Result;
use clap::Subcommand;
use clearance_core::ClassificationLevel;

use super::common::{print_principal, Session};

#[derive(Subcommand)]
pub enum PermissionCommand {
    /// Replace a principal's grants; keys outside the vocabulary are dropped
    Set {
        /// Username or id
        user: String,

        /// Permission keys such as read_0 write_1
        keys: Vec<String>,
    },

    /// Replace a principal's grants with both actions up to a level
    GrantAll {
        /// Username or id
        user: String,

        /// Highest level to grant; defaults to the principal's clearance
        #[arg(long)]
        clearance: Option<ClassificationLevel>,
    },
}

pub async fn handle_permission_command(
    command: PermissionCommand,
    session: &Session,
    acting_as: Option<&str>,
) -> Result<()> {
    let acting = session.acting(acting_as).await?;
    let admin = session.administrator();

    let (target, records) = match command {
        PermissionCommand::Set { user, keys } => {
            let target = session.resolve(&user).await?;
            let records = admin.set_permissions(&acting, target.id, &keys).await?;
            if records.len() < keys.len() {
                println!(
                    "Ignored {} duplicate or unknown key(s)",
                    keys.len() - records.len()
                );
            }
            (target, records)
        }
        PermissionCommand::GrantAll { user, clearance } => {
            let target = session.resolve(&user).await?;
            let ceiling = clearance.unwrap_or(target.clearance);
            let records = admin
                .grant_all_at_clearance(&acting, target.id, ceiling)
                .await?;
            (target, records)
        }
    };

    println!("Granted {} permission(s)", records.len());
    print_principal(&admin.principal(target.id).await?);
    Ok(())
}
