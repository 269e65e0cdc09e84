//! # Local Store
//!
//! A `TransactionDB` with one column family per logical table. All
//! mutation goes through [`LocalStore::update`], whose write transaction
//! gives the all-or-nothing commit the block application pipeline
//! depends on.

use std::path::Path;

use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, Options, SnapshotWithThreadMode, Transaction,
    TransactionDB, TransactionDBOptions,
};

use crate::errors::StoreError;

/// The five logical tables of the local store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Table {
    /// Node-local metadata.
    Node,
    /// State trie nodes, content-addressed by their SHA3-256 hash.
    State,
    /// Wallet material.
    Wallets,
    /// Blocks by hash plus the chain tip under its fixed key.
    Blockchain,
    /// Transactions by hash.
    Transactions,
}

impl Table {
    /// All tables, in creation order.
    pub const ALL: [Table; 5] = [
        Table::Transactions,
        Table::Blockchain,
        Table::Wallets,
        Table::State,
        Table::Node,
    ];

    /// Column family name of the table.
    pub fn name(self) -> &'static str {
        match self {
            Table::Node => "node",
            Table::State => "state",
            Table::Wallets => "wallets",
            Table::Blockchain => "blockchain",
            Table::Transactions => "transactions",
        }
    }
}

/// Local data storage of one node.
pub struct LocalStore {
    db: TransactionDB,
}

impl LocalStore {
    /// Open (or create) the local store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = Table::ALL
            .iter()
            .map(|table| {
                let mut cf_opts = Options::default();
                cf_opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
                ColumnFamilyDescriptor::new(table.name(), cf_opts)
            })
            .collect();

        let path = path.as_ref();
        let db = TransactionDB::open_cf_descriptors(
            &opts,
            &TransactionDBOptions::default(),
            path,
            cf_descriptors,
        )?;

        tracing::debug!("opened local store at {}", path.display());
        Ok(Self { db })
    }

    fn cf(&self, table: Table) -> Result<&ColumnFamily, StoreError> {
        self.db
            .cf_handle(table.name())
            .ok_or(StoreError::MissingTable(table.name()))
    }

    /// Run `f` against a read snapshot.
    pub fn view<T, E>(&self, f: impl FnOnce(&ReadTxn<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let txn = ReadTxn {
            snapshot: self.db.snapshot(),
            store: self,
        };
        f(&txn)
    }

    /// Run `f` inside a write transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back when
    /// it returns `Err`; the closure's error surfaces unchanged.
    pub fn update<T, E>(&self, f: impl FnOnce(&WriteTxn<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let txn = WriteTxn {
            inner: self.db.transaction(),
            store: self,
        };
        match f(&txn) {
            Ok(value) => {
                txn.inner
                    .commit()
                    .map_err(|err| E::from(StoreError::from(err)))?;
                Ok(value)
            }
            Err(err) => {
                let _ = txn.inner.rollback();
                Err(err)
            }
        }
    }
}

/// A read snapshot over the store.
pub struct ReadTxn<'a> {
    snapshot: SnapshotWithThreadMode<'a, TransactionDB>,
    store: &'a LocalStore,
}

impl ReadTxn<'_> {
    /// Read `key` from `table`; `Ok(None)` when absent.
    pub fn get(&self, table: Table, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let cf = self.store.cf(table)?;
        Ok(self.snapshot.get_cf(cf, key)?)
    }
}

/// A write transaction over the store.
pub struct WriteTxn<'a> {
    inner: Transaction<'a, TransactionDB>,
    store: &'a LocalStore,
}

impl WriteTxn<'_> {
    /// Read `key` from `table`, observing earlier writes of this
    /// transaction; `Ok(None)` when absent.
    pub fn get(&self, table: Table, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let cf = self.store.cf(table)?;
        Ok(self.inner.get_cf(cf, key)?)
    }

    /// Write `key` in `table`.
    pub fn put(&self, table: Table, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let cf = self.store.cf(table)?;
        Ok(self.inner.put_cf(cf, key, value)?)
    }
}
