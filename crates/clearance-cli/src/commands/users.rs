// Principal management commands
//
// Create, edit, and inspect principals. Mutations go through the
// permission administrator, so they are admin-only and audited.

use anyhow::{bail, Result};
use clap::Subcommand;
use clearance_authorization::{GrantSelection, NewPrincipal, PrincipalUpdate};
use clearance_core::{ClassificationLevel, PrincipalStore, Role};
use tracing::info;

use super::common::{print_principal, Session};

#[derive(Subcommand)]
pub enum UserCommand {
    /// Create a principal
    Add {
        /// Unique username
        username: String,

        /// Role
        #[arg(long, default_value = "user")]
        role: Role,

        /// Clearance ceiling (ordinal or name)
        #[arg(long, default_value = "0")]
        clearance: ClassificationLevel,

        /// Grant read and write at every level up to the clearance
        #[arg(long, conflicts_with = "grant")]
        grant_all: bool,

        /// Explicit grants (comma-separated, e.g. read_0,read_1,write_0)
        #[arg(long, value_delimiter = ',')]
        grant: Vec<String>,
    },

    /// Change role, clearance, active flag, or grants in one commit
    Edit {
        /// Username or id
        user: String,

        /// New role
        #[arg(long)]
        role: Option<Role>,

        /// New clearance ceiling
        #[arg(long)]
        clearance: Option<ClassificationLevel>,

        /// Activate or deactivate
        #[arg(long)]
        active: Option<bool>,

        /// Replace grants with everything up to the resulting clearance
        #[arg(long, conflicts_with_all = ["grant", "clear_grants"])]
        grant_all: bool,

        /// Replace grants with this list, filtered at the resulting clearance
        #[arg(long, value_delimiter = ',')]
        grant: Vec<String>,

        /// Replace grants with the empty set
        #[arg(long, conflicts_with = "grant")]
        clear_grants: bool,
    },

    /// Show one principal
    Show {
        /// Username or id
        user: String,
    },

    /// List all principals
    List,
}

pub async fn handle_user_command(
    command: UserCommand,
    session: &Session,
    acting_as: Option<&str>,
) -> Result<()> {
    match command {
        UserCommand::Add {
            username,
            role,
            clearance,
            grant_all,
            grant,
        } => {
            let acting = session.acting(acting_as).await?;
            let grants = if grant_all {
                GrantSelection::AllAtClearance
            } else {
                GrantSelection::Explicit(grant)
            };
            let request = NewPrincipal {
                username,
                role,
                clearance,
                grants,
            };

            let created = session.administrator().provision(&acting, request).await?;
            println!("Created principal:");
            print_principal(&created);
        }

        UserCommand::Edit {
            user,
            role,
            clearance,
            active,
            grant_all,
            grant,
            clear_grants,
        } => {
            let acting = session.acting(acting_as).await?;
            let target = session.resolve(&user).await?;
            let grants = if grant_all {
                Some(GrantSelection::AllAtClearance)
            } else if clear_grants || !grant.is_empty() {
                Some(GrantSelection::Explicit(grant))
            } else {
                None
            };
            let update = PrincipalUpdate {
                role,
                clearance,
                active,
                grants,
            };
            if update == PrincipalUpdate::default() {
                bail!("Nothing to change; pass --role, --clearance, --active, or grants");
            }

            let updated = session
                .administrator()
                .update(&acting, target.id, update)
                .await?;
            info!(principal = %updated.id, "Principal edited");
            println!("Updated principal:");
            print_principal(&updated);
        }

        UserCommand::Show { user } => {
            let principal = session.resolve(&user).await?;
            print_principal(&principal);
            let records = session.store.grant_records(principal.id).await?;
            for record in records {
                let granted_by = match session.store.load(record.granted_by).await? {
                    Some(granter) => granter.username,
                    None => record.granted_by.to_string(),
                };
                println!("    {} granted by {}", record.key, granted_by);
            }
        }

        UserCommand::List => {
            let principals = session.store.list().await?;
            if principals.is_empty() {
                println!("No principals; run `clearance init`");
            }
            for principal in principals {
                println!(
                    "{:<20} {:<6} {:<13} {:<8} {}",
                    principal.username,
                    principal.role.as_str(),
                    principal.clearance.label(),
                    if principal.active { "active" } else { "inactive" },
                    principal.grants.len()
                );
            }
        }
    }

    Ok(())
}
