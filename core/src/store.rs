//! SQLite persistence for the risk register.
//!
//! RULE: Only store.rs talks to the database.
//! The analytics never touch the store; callers load a record set here
//! and pass it on.

use crate::{
    error::{BurndownError, BurndownResult},
    normalize::{NormalizedRegister, RejectedRow},
    record::{RawRiskRecord, RecordSet, RiskRecord},
    types::{format_register_date, parse_register_date},
};
use rusqlite::{params, Connection, OptionalExtension};

pub struct RegisterStore {
    conn: Connection,
}

fn insert_sql() -> &'static str {
    "INSERT INTO risk (
        risk_id, description, open_date, expected_end_date, closure_date,
        risk_type, probability, impact, difficulty, priority, action_plan, owner
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
}

fn insert_with(conn: &Connection, r: &RiskRecord) -> BurndownResult<()> {
    conn.execute(
        insert_sql(),
        params![
            &r.id,
            &r.description,
            format_register_date(r.open_date),
            format_register_date(r.expected_end_date),
            r.closure_date.map(format_register_date),
            &r.risk_type,
            &r.probability,
            &r.impact,
            &r.difficulty,
            &r.priority,
            &r.action_plan,
            &r.owner,
        ],
    )?;
    Ok(())
}

fn risk_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRiskRecord> {
    let date = |idx: usize| -> rusqlite::Result<_> {
        Ok(row
            .get::<_, Option<String>>(idx)?
            .and_then(|s| parse_register_date(&s)))
    };
    Ok(RawRiskRecord {
        id: Some(row.get(0)?),
        description: Some(row.get(1)?),
        open_date: date(2)?,
        expected_end_date: date(3)?,
        closure_date: date(4)?,
        risk_type: Some(row.get(5)?),
        probability: Some(row.get(6)?),
        impact: Some(row.get(7)?),
        difficulty: Some(row.get(8)?),
        priority: Some(row.get(9)?),
        action_plan: Some(row.get(10)?),
        owner: Some(row.get(11)?),
    })
}

impl RegisterStore {
    /// Open (or create) the register database at `path`.
    pub fn open(path: &str) -> BurndownResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> BurndownResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> BurndownResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_register.sql"))?;
        Ok(())
    }

    // ── Risk ───────────────────────────────────────────────────

    pub fn contains_risk(&self, risk_id: &str) -> BurndownResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM risk WHERE risk_id = ?1 LIMIT 1",
                params![risk_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Append one risk. Rejects an id already in the register.
    pub fn insert_risk(&self, r: &RiskRecord) -> BurndownResult<()> {
        if self.contains_risk(&r.id)? {
            return Err(BurndownError::DuplicateRiskId {
                risk_id: r.id.clone(),
            });
        }
        insert_with(&self.conn, r)?;
        log::info!("Added risk {} to register", r.id);
        Ok(())
    }

    /// Replace the whole register with `records` in one transaction.
    pub fn replace_all(&self, records: &RecordSet) -> BurndownResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM risk", [])?;
        for r in records {
            insert_with(&tx, r)?;
        }
        tx.commit()?;
        log::info!("Saved {} risks to register", records.len());
        Ok(())
    }

    pub fn risk_count(&self) -> BurndownResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM risk", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Load every stored risk in insertion order. Rows whose required
    /// dates no longer parse come back in `rejected`.
    pub fn load_register(&self) -> BurndownResult<NormalizedRegister> {
        let mut stmt = self.conn.prepare(
            "SELECT risk_id, description, open_date, expected_end_date, closure_date,
                    risk_type, probability, impact, difficulty, priority, action_plan, owner
             FROM risk ORDER BY row_id ASC",
        )?;
        let raws = stmt
            .query_map([], risk_row_mapper)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(raws.len());
        let mut rejected = Vec::new();
        for (i, raw) in raws.into_iter().enumerate() {
            let risk_id = raw.id.clone();
            match raw.validate() {
                Ok(r) => records.push(r),
                Err(e) => {
                    log::warn!("stored risk at row {i} excluded: {e}");
                    rejected.push(RejectedRow {
                        row: i,
                        risk_id,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(NormalizedRegister {
            records: RecordSet::new(records),
            rejected,
            missing_columns: Vec::new(),
        })
    }

    pub fn all_risks(&self) -> BurndownResult<RecordSet> {
        Ok(self.load_register()?.records)
    }
}
