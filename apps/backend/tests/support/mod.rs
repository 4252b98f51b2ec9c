//! Shared helpers for integration tests.
//!
//! Tests run against the Test DB profile and execute inside a single
//! transaction that is rolled back on success, so they leave no rows behind
//! and can run concurrently.

pub mod factory;

use backend::db::txn_policy::{set_txn_policy, TxnPolicy};

#[ctor::ctor]
fn init_test_policy() {
    set_txn_policy(TxnPolicy::RollbackOnOk);
}
