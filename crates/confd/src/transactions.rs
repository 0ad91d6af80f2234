//! Read and write transactions.
//!
//! A connection runs at most one transaction at a time, in either mode.
//! Handles must be committed or rolled back exactly once; both consume the
//! handle and release the gate.

use serde_json::Value;

use crate::conn::Conn;
use crate::error::Result;

#[derive(Debug, Clone, Copy)]
enum Mode {
    Read,
    Write,
}

/// A scoped transaction handle obtained from [`Conn::begin_read_transaction`]
/// or [`Conn::begin_write_transaction`].
pub struct Transaction<'a> {
    conn: &'a Conn,
    mode: Mode,
    _gate: std::sync::MutexGuard<'a, ()>,
}

impl Conn {
    /// Start a read transaction (`freeze` / `thaw`).
    pub fn begin_read_transaction(&self) -> Result<Transaction<'_>> {
        self.begin_transaction(Mode::Read, "freeze")
    }

    /// Start a write transaction (`lock`, ended by `commit` or `unlock`).
    pub fn begin_write_transaction(&self) -> Result<Transaction<'_>> {
        self.begin_transaction(Mode::Write, "lock")
    }

    fn begin_transaction(&self, mode: Mode, method: &str) -> Result<Transaction<'_>> {
        let gate = self.tx_gate.lock().expect("transaction gate poisoned");
        // a failed opening call drops the gate before surfacing
        self.simple_request(method, vec![Value::Null])?;
        Ok(Transaction {
            conn: self,
            mode,
            _gate: gate,
        })
    }
}

impl Transaction<'_> {
    /// Commit the transaction. For read transactions this thaws the freeze,
    /// identical to a rollback.
    pub fn commit(self) -> Result<()> {
        let method = match self.mode {
            Mode::Read => "thaw",
            Mode::Write => "commit",
        };
        self.conn.simple_request(method, vec![Value::Null])?;
        Ok(())
    }

    /// Roll the transaction back.
    pub fn rollback(self) -> Result<()> {
        let method = match self.mode {
            Mode::Read => "thaw",
            Mode::Write => "unlock",
        };
        self.conn.simple_request(method, vec![Value::Null])?;
        Ok(())
    }
}
