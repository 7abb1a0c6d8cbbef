// Access checks and level listings

use anyhow::Result;
use clearance_authorization::{audited_check, decide, AccessScope};
use clearance_core::{ClassificationLevel, PermissionAction, PermissionKey};

use super::common::{format_levels, Session};

/// Decide one action at one level, recording it when auditing is on
pub async fn check(
    session: &Session,
    user: &str,
    action: PermissionAction,
    level: ClassificationLevel,
) -> Result<bool> {
    let principal = session.resolve(user).await?;
    let decision = decide(&principal, action, level);
    if let Some(sink) = session.audit_sink() {
        audited_check(sink, &principal, action, &level);
    }

    println!(
        "{} {} {}: {}",
        principal.username,
        PermissionKey::new(action, level),
        if decision.is_allowed() { "allowed" } else { "denied" },
        decision.reason()
    );
    Ok(decision.is_allowed())
}

/// Effective readable and writable levels for a principal
pub async fn levels(session: &Session, user: &str) -> Result<()> {
    let principal = session.resolve(user).await?;
    let readable = AccessScope::readable(&principal);
    let writable = AccessScope::writable(&principal);

    println!("{} (clearance {})", principal.username, principal.clearance);
    println!("  Readable: {}", format_levels(readable.levels()));
    println!("  Writable: {}", format_levels(writable.levels()));
    match readable.highest() {
        Some(level) => println!("  Highest readable: {level}"),
        None => println!("  Highest readable: none"),
    }
    println!("  Read scope ordinals: {:?}", readable.ordinals());
    Ok(())
}

/// Every level and permission key with its display label
pub fn vocabulary(json: bool) -> Result<()> {
    if json {
        let keys: Vec<String> = PermissionKey::ALL.iter().map(ToString::to_string).collect();
        println!("{}", serde_json::to_string_pretty(&keys)?);
        return Ok(());
    }

    println!("Levels:");
    for level in ClassificationLevel::ALL {
        println!("  {} {:<13} [{}]", level.ordinal(), level.label(), level.tone());
    }
    println!("Permissions:");
    for key in PermissionKey::ALL {
        println!("  {:<8} {}", key.to_string(), key.label());
    }
    Ok(())
}
