//! Role catalog: role definitions, priority order, and qualifications.
//!
//! The catalog is built once per scheduling run and is immutable
//! afterwards. Roles are kept in insertion order, which doubles as the
//! assignment priority order: the most constrained role is listed first
//! so it gets first pick of the candidate pool.
//!
//! Qualifications are grouped into named pools so that two distinct
//! role identities (the two sub-vocal slots) can draw from the same
//! pool while tracking fairness independently.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::warn;

static EMPTY_POOL: BTreeSet<String> = BTreeSet::new();

/// A named service role with exactly one slot per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role identifier (e.g. "vocal_sub1").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Qualification pool this role draws from. Defaults to the role id.
    pub pool: String,
}

impl Role {
    /// Creates a role whose pool matches its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            pool: id.clone(),
            name: String::new(),
            id,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the qualification pool.
    pub fn with_pool(mut self, pool: impl Into<String>) -> Self {
        self.pool = pool.into();
        self
    }
}

/// Setup-time catalog misconfiguration.
///
/// Raised before any date is processed; per-date data gaps are not
/// errors and degrade to open slots instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two roles share the same id.
    #[error("duplicate role id '{0}'")]
    DuplicateRole(String),
    /// A role references a pool with no qualification entry at all.
    #[error("role '{role}' references unknown qualification pool '{pool}'")]
    UnknownPool {
        /// Offending role id.
        role: String,
        /// Missing pool key.
        pool: String,
    },
    /// The catalog defines no roles.
    #[error("catalog defines no roles")]
    NoRoles,
}

/// Builder for [`RoleCatalog`].
#[derive(Debug, Clone, Default)]
pub struct RoleCatalogBuilder {
    roles: Vec<Role>,
    pools: BTreeMap<String, BTreeSet<String>>,
}

impl RoleCatalogBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a role. Insertion order is priority order.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Registers a qualification pool with its member names.
    ///
    /// Names must match availability-table identities exactly
    /// (case-sensitive); mismatches silently exclude a member from the
    /// pool's roles. Registering an empty pool is allowed — its roles
    /// stay open on every date.
    pub fn with_pool<I, S>(mut self, pool: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.pools.entry(pool.into()).or_default();
        for member in members {
            entry.insert(member.into());
        }
        self
    }

    /// Validates the configuration and builds the catalog.
    ///
    /// Fails fast on structural misconfiguration: duplicate role ids,
    /// roles whose pool was never registered, or an empty role list.
    pub fn build(self) -> Result<RoleCatalog, CatalogError> {
        if self.roles.is_empty() {
            return Err(CatalogError::NoRoles);
        }

        let mut seen = BTreeSet::new();
        for role in &self.roles {
            if !seen.insert(role.id.as_str()) {
                return Err(CatalogError::DuplicateRole(role.id.clone()));
            }
            if !self.pools.contains_key(&role.pool) {
                return Err(CatalogError::UnknownPool {
                    role: role.id.clone(),
                    pool: role.pool.clone(),
                });
            }
            if self.pools[&role.pool].is_empty() {
                warn!(role = %role.id, pool = %role.pool, "qualification pool is empty");
            }
        }

        Ok(RoleCatalog {
            roles: self.roles,
            pools: self.pools,
        })
    }
}

/// Static per-run role definitions and qualification sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCatalog {
    roles: Vec<Role>,
    pools: BTreeMap<String, BTreeSet<String>>,
}

impl RoleCatalog {
    /// Starts an empty catalog builder.
    pub fn builder() -> RoleCatalogBuilder {
        RoleCatalogBuilder::new()
    }

    /// Starts a builder pre-seeded with the canonical worship-team
    /// roles in priority order.
    ///
    /// Main vocal first because it is the most constrained slot; the
    /// two sub-vocal slots next so they never compete with instrument
    /// roles for the same people. Both sub-vocal roles draw from the
    /// shared "vocal_sub" pool. Qualification pools still have to be
    /// registered with [`RoleCatalogBuilder::with_pool`].
    pub fn worship_team() -> RoleCatalogBuilder {
        RoleCatalogBuilder::new()
            .with_role(Role::new("vocal_main").with_name("Main Vocal"))
            .with_role(
                Role::new("vocal_sub1")
                    .with_name("Sub Vocal 1")
                    .with_pool("vocal_sub"),
            )
            .with_role(
                Role::new("vocal_sub2")
                    .with_name("Sub Vocal 2")
                    .with_pool("vocal_sub"),
            )
            .with_role(Role::new("piano").with_name("Piano"))
            .with_role(Role::new("drum").with_name("Drums"))
            .with_role(Role::new("bass").with_name("Bass"))
            .with_role(Role::new("pa").with_name("PA"))
            .with_role(Role::new("ppt").with_name("Presentation"))
    }

    /// Roles in priority order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Looks up a role by id.
    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    /// Members qualified for a role, in deterministic (sorted) order.
    ///
    /// Unknown pools read as empty rather than panicking so the
    /// validator can run against foreign rosters.
    pub fn qualified_members(&self, role: &Role) -> &BTreeSet<String> {
        self.pools.get(&role.pool).unwrap_or(&EMPTY_POOL)
    }

    /// Whether a member is qualified for a role.
    pub fn is_qualified(&self, member: &str, role: &Role) -> bool {
        self.qualified_members(role).contains(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worship_team_priority_order() {
        let catalog = RoleCatalog::worship_team()
            .with_pool("vocal_main", ["A"])
            .with_pool("vocal_sub", ["B"])
            .with_pool("piano", ["C"])
            .with_pool("drum", ["D"])
            .with_pool("bass", ["E"])
            .with_pool("pa", ["F"])
            .with_pool("ppt", ["G"])
            .build()
            .unwrap();

        let ids: Vec<&str> = catalog.roles().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            ["vocal_main", "vocal_sub1", "vocal_sub2", "piano", "drum", "bass", "pa", "ppt"]
        );
    }

    #[test]
    fn test_sub_vocals_share_pool() {
        let catalog = RoleCatalog::builder()
            .with_role(Role::new("vocal_sub1").with_pool("vocal_sub"))
            .with_role(Role::new("vocal_sub2").with_pool("vocal_sub"))
            .with_pool("vocal_sub", ["Alice", "Bob"])
            .build()
            .unwrap();

        let sub1 = catalog.role("vocal_sub1").unwrap();
        let sub2 = catalog.role("vocal_sub2").unwrap();
        assert_eq!(
            catalog.qualified_members(sub1),
            catalog.qualified_members(sub2)
        );
        assert!(catalog.is_qualified("Alice", sub1));
        assert!(!catalog.is_qualified("Carol", sub1));
    }

    #[test]
    fn test_unknown_pool_fails_fast() {
        let err = RoleCatalog::builder()
            .with_role(Role::new("piano"))
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            CatalogError::UnknownPool {
                role: "piano".into(),
                pool: "piano".into(),
            }
        );
    }

    #[test]
    fn test_duplicate_role_fails_fast() {
        let err = RoleCatalog::builder()
            .with_role(Role::new("piano"))
            .with_role(Role::new("piano"))
            .with_pool("piano", ["Alice"])
            .build()
            .unwrap_err();

        assert_eq!(err, CatalogError::DuplicateRole("piano".into()));
    }

    #[test]
    fn test_empty_catalog_fails_fast() {
        let err = RoleCatalog::builder().build().unwrap_err();
        assert_eq!(err, CatalogError::NoRoles);
    }

    #[test]
    fn test_empty_pool_is_not_an_error() {
        let catalog = RoleCatalog::builder()
            .with_role(Role::new("drum"))
            .with_pool("drum", Vec::<String>::new())
            .build()
            .unwrap();

        let drum = catalog.role("drum").unwrap();
        assert!(catalog.qualified_members(drum).is_empty());
    }

    #[test]
    fn test_qualified_members_sorted() {
        let catalog = RoleCatalog::builder()
            .with_role(Role::new("piano"))
            .with_pool("piano", ["Carol", "Alice", "Bob"])
            .build()
            .unwrap();

        let piano = catalog.role("piano").unwrap();
        let members: Vec<&str> = catalog
            .qualified_members(piano)
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(members, ["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_qualification_is_case_sensitive() {
        let catalog = RoleCatalog::builder()
            .with_role(Role::new("piano"))
            .with_pool("piano", ["Alice"])
            .build()
            .unwrap();

        let piano = catalog.role("piano").unwrap();
        assert!(catalog.is_qualified("Alice", piano));
        assert!(!catalog.is_qualified("alice", piano));
    }
}
