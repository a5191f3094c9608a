//! Typed entity adapter registry.
//!
//! Entity-type names from the wire resolve into a closed set of typed
//! adapters, built once at startup. Behavior is never dispatched on the
//! raw string: the name parses into [`EntityKind`] at the edge and an
//! unknown name fails with `UnknownEntity` before any engine work.

use crate::engine::push_batch;
use crate::error::{EngineError, EngineResult};
use crate::result::SyncResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use tillpoint_model::{
    Category, Customer, Employee, InventoryMovement, Product, Sale, SaleItem, Syncable, User,
};
use tillpoint_store::Table;

/// The closed set of syncable entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Backend user accounts.
    Users,
    /// Sellable products.
    Products,
    /// Product categories.
    Categories,
    /// Registered customers.
    Customers,
    /// Sales.
    Sales,
    /// Sale line items.
    SaleItems,
    /// Store employees.
    Employees,
    /// Stock movement audit entries.
    InventoryMovements,
}

impl EntityKind {
    /// Every entity kind, in registry order.
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Users,
        EntityKind::Products,
        EntityKind::Categories,
        EntityKind::Customers,
        EntityKind::Sales,
        EntityKind::SaleItems,
        EntityKind::Employees,
        EntityKind::InventoryMovements,
    ];

    /// The name used in sync URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Users => User::KIND,
            EntityKind::Products => Product::KIND,
            EntityKind::Categories => Category::KIND,
            EntityKind::Customers => Customer::KIND,
            EntityKind::Sales => Sale::KIND,
            EntityKind::SaleItems => SaleItem::KIND,
            EntityKind::Employees => Employee::KIND,
            EntityKind::InventoryMovements => InventoryMovement::KIND,
        }
    }

    /// Parses an entity-type name.
    pub fn parse(name: &str) -> EngineResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| EngineError::unknown_entity(name))
    }
}

impl FromStr for EntityKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object-safe seam between the registry and a typed table.
pub trait EntityAdapter: Send + Sync {
    /// The entity kind this adapter serves.
    fn kind(&self) -> EntityKind;

    /// Applies a push batch (see [`push_batch`]).
    fn push(&self, batch: &[Value], watermark: Option<DateTime<Utc>>) -> EngineResult<SyncResult>;

    /// Active records changed strictly after the watermark, as wire
    /// values.
    fn changed_since(&self, watermark: DateTime<Utc>) -> EngineResult<Vec<Value>>;
}

/// The adapter over one typed table.
pub struct TableAdapter<R: Syncable> {
    kind: EntityKind,
    table: Table<R>,
}

impl<R: Syncable> TableAdapter<R> {
    /// Creates an adapter with an empty table.
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            table: Table::new(),
        }
    }

    /// The underlying table (CRUD path, seeding, assertions).
    pub fn table(&self) -> &Table<R> {
        &self.table
    }
}

impl<R: Syncable> EntityAdapter for TableAdapter<R> {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn push(&self, batch: &[Value], watermark: Option<DateTime<Utc>>) -> EngineResult<SyncResult> {
        push_batch(&self.table, batch, watermark)
    }

    fn changed_since(&self, watermark: DateTime<Utc>) -> EngineResult<Vec<Value>> {
        self.table
            .list_changed_since(watermark)
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(EngineError::from)
    }
}

/// Counters accumulated across all sync calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncStats {
    /// Push calls handled.
    pub pushes: u64,
    /// Pull calls handled.
    pub pulls: u64,
    /// Records accepted into stores.
    pub records_synced: u64,
    /// Records routed to conflicts.
    pub conflicts: u64,
}

#[derive(Default)]
struct StatCounters {
    pushes: AtomicU64,
    pulls: AtomicU64,
    records_synced: AtomicU64,
    conflicts: AtomicU64,
}

/// One typed table per entity kind, resolved once at startup.
///
/// The registry owns all eight tables and is shared behind an `Arc` by
/// the server; it has no other mutable state beyond the tables and the
/// stats counters.
pub struct SyncRegistry {
    users: TableAdapter<User>,
    products: TableAdapter<Product>,
    categories: TableAdapter<Category>,
    customers: TableAdapter<Customer>,
    sales: TableAdapter<Sale>,
    sale_items: TableAdapter<SaleItem>,
    employees: TableAdapter<Employee>,
    inventory_movements: TableAdapter<InventoryMovement>,
    counters: StatCounters,
}

impl SyncRegistry {
    /// Creates a registry with empty tables for every entity kind.
    pub fn new() -> Self {
        Self {
            users: TableAdapter::new(EntityKind::Users),
            products: TableAdapter::new(EntityKind::Products),
            categories: TableAdapter::new(EntityKind::Categories),
            customers: TableAdapter::new(EntityKind::Customers),
            sales: TableAdapter::new(EntityKind::Sales),
            sale_items: TableAdapter::new(EntityKind::SaleItems),
            employees: TableAdapter::new(EntityKind::Employees),
            inventory_movements: TableAdapter::new(EntityKind::InventoryMovements),
            counters: StatCounters::default(),
        }
    }

    /// Resolves a kind to its adapter.
    pub fn adapter(&self, kind: EntityKind) -> &dyn EntityAdapter {
        match kind {
            EntityKind::Users => &self.users,
            EntityKind::Products => &self.products,
            EntityKind::Categories => &self.categories,
            EntityKind::Customers => &self.customers,
            EntityKind::Sales => &self.sales,
            EntityKind::SaleItems => &self.sale_items,
            EntityKind::Employees => &self.employees,
            EntityKind::InventoryMovements => &self.inventory_movements,
        }
    }

    /// Resolves an entity-type name, failing before any engine work.
    pub fn resolve(&self, name: &str) -> EngineResult<&dyn EntityAdapter> {
        Ok(self.adapter(EntityKind::parse(name)?))
    }

    /// Handles a push call for the named entity type.
    pub fn push(
        &self,
        name: &str,
        batch: &[Value],
        watermark: Option<DateTime<Utc>>,
    ) -> EngineResult<SyncResult> {
        let adapter = self.resolve(name)?;
        let result = adapter.push(batch, watermark)?;

        self.counters.pushes.fetch_add(1, Ordering::Relaxed);
        self.counters
            .records_synced
            .fetch_add(result.synced.len() as u64, Ordering::Relaxed);
        self.counters
            .conflicts
            .fetch_add(result.conflicts.len() as u64, Ordering::Relaxed);
        tracing::info!(
            entity = name,
            synced = result.synced.len(),
            conflicts = result.conflicts.len(),
            server_updated = result.server_updated.len(),
            "push handled"
        );
        Ok(result)
    }

    /// Handles a pull call for the named entity type.
    pub fn pull(&self, name: &str, watermark: DateTime<Utc>) -> EngineResult<Vec<Value>> {
        let adapter = self.resolve(name)?;
        let records = adapter.changed_since(watermark)?;
        self.counters.pulls.fetch_add(1, Ordering::Relaxed);
        tracing::info!(entity = name, records = records.len(), "pull handled");
        Ok(records)
    }

    /// Snapshot of the accumulated counters.
    pub fn stats(&self) -> SyncStats {
        SyncStats {
            pushes: self.counters.pushes.load(Ordering::Relaxed),
            pulls: self.counters.pulls.load(Ordering::Relaxed),
            records_synced: self.counters.records_synced.load(Ordering::Relaxed),
            conflicts: self.counters.conflicts.load(Ordering::Relaxed),
        }
    }

    /// The users table.
    pub fn users(&self) -> &Table<User> {
        self.users.table()
    }

    /// The products table.
    pub fn products(&self) -> &Table<Product> {
        self.products.table()
    }

    /// The categories table.
    pub fn categories(&self) -> &Table<Category> {
        self.categories.table()
    }

    /// The customers table.
    pub fn customers(&self) -> &Table<Customer> {
        self.customers.table()
    }

    /// The sales table.
    pub fn sales(&self) -> &Table<Sale> {
        self.sales.table()
    }

    /// The sale items table.
    pub fn sale_items(&self) -> &Table<SaleItem> {
        self.sale_items.table()
    }

    /// The employees table.
    pub fn employees(&self) -> &Table<Employee> {
        self.employees.table()
    }

    /// The inventory movements table.
    pub fn inventory_movements(&self) -> &Table<InventoryMovement> {
        self.inventory_movements.table()
    }
}

impl Default for SyncRegistry {
    fn default() -> Self {
        Self::new()
    }
}
