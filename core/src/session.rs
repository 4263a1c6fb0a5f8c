//! JSON-lines command session: one `RegisterCommand` per input line, one
//! JSON reply per output line, until `quit` or end of input.
//!
//! A line that does not parse, or an add-risk the register refuses, gets an
//! `{"error": ...}` reply and the session keeps going. Store and I/O
//! failures end the session.

use crate::{
    command::{NewRisk, RegisterCommand},
    engine::{BurndownEngine, BurndownReport},
    error::BurndownResult,
    record::RecordSet,
    role::{partition_for_role, Role},
    store::RegisterStore,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{BufRead, Write};

/// Reply to `get_report`.
#[derive(Debug, Serialize)]
pub struct UiState<'a> {
    pub user: &'a str,
    pub role: Role,
    pub records: usize,
    pub report: Option<BurndownReport>,
}

pub struct RegisterSession<'a> {
    engine: &'a BurndownEngine,
    store: &'a RegisterStore,
    user: &'a str,
    role: Role,
}

impl<'a> RegisterSession<'a> {
    pub fn new(engine: &'a BurndownEngine, store: &'a RegisterStore, user: &'a str, role: Role) -> Self {
        Self { engine, store, user, role }
    }

    /// The register as this session's role may see it.
    pub fn visible_records(&self) -> BurndownResult<RecordSet> {
        let all = self.store.all_risks()?;
        Ok(partition_for_role(self.role, &all, &self.engine.config().technical_risk_type))
    }

    /// Execute one command. `None` means the session should end.
    pub fn handle(&self, cmd: RegisterCommand) -> BurndownResult<Option<Value>> {
        let reply = match cmd {
            RegisterCommand::Quit => return Ok(None),
            RegisterCommand::GetReport { date } => {
                let records = self.visible_records()?;
                let state = UiState {
                    user: self.user,
                    role: self.role,
                    records: records.len(),
                    report: self.engine.report(&records, date),
                };
                serde_json::to_value(&state)?
            }
            RegisterCommand::DrillDown { date } => {
                let records = self.visible_records()?;
                serde_json::to_value(self.engine.drill_down(&records, date))?
            }
            RegisterCommand::AddRisk { risk } => self.add_risk(risk),
        };
        Ok(Some(reply))
    }

    fn add_risk(&self, risk: NewRisk) -> Value {
        let added = risk.into_record_for(self.role).and_then(|r| {
            self.store.insert_risk(&r)?;
            Ok(r)
        });
        match added {
            Ok(r) => json!({ "added": r.id }),
            Err(e) => {
                log::warn!("add_risk rejected: {e}");
                json!({ "error": e.to_string() })
            }
        }
    }

    /// Serve commands from `input` until `quit` or EOF.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> BurndownResult<()> {
        let mut buffer = String::new();
        loop {
            buffer.clear();
            if input.read_line(&mut buffer)? == 0 {
                break; // EOF
            }
            if buffer.trim().is_empty() {
                continue;
            }

            let reply = match serde_json::from_str::<RegisterCommand>(&buffer) {
                Ok(cmd) => match self.handle(cmd)? {
                    Some(reply) => reply,
                    None => break,
                },
                Err(e) => {
                    log::debug!("unparsable command line: {e}");
                    json!({ "error": e.to_string() })
                }
            };
            writeln!(output, "{reply}")?;
            output.flush()?;
        }
        Ok(())
    }
}
