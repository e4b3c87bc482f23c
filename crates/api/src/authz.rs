//! API-side authorization guard for commands.
//!
//! Enforced at the command boundary (before the service runs), keeping the
//! domain and infra layers auth-agnostic.

use stockroom_auth::{authorize, AuthzError, CommandAuthorization, Permission, Principal, Role};

use crate::context::PrincipalContext;

/// Check authorization for a command in the current request context.
pub fn authorize_command<C: CommandAuthorization>(
    principal: &PrincipalContext,
    command: &C,
) -> Result<(), AuthzError> {
    let principal = Principal {
        principal_id: principal.principal_id(),
        roles: principal.roles().to_vec(),
        permissions: permissions_from_roles(principal.roles()),
    };

    for perm in command.required_permissions() {
        authorize(&principal, perm)?;
    }

    Ok(())
}

/// Static role→permission policy.
///
/// `admin` gets everything, `editor` may write products, anyone else is
/// read-only.
pub fn permissions_from_roles(roles: &[Role]) -> Vec<Permission> {
    if roles.contains(&Role::ADMIN) {
        return vec![Permission::WILDCARD];
    }

    if roles.contains(&Role::EDITOR) {
        return vec![
            Permission::PRODUCTS_CREATE,
            Permission::PRODUCTS_UPDATE,
            Permission::PRODUCTS_DELETE,
        ];
    }

    Vec::new()
}
