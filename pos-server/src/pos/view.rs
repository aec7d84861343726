//! Floor view projection

use super::check::current_course;
use super::money::{check_totals, CheckTotals};
use shared::models::{Check, ServiceStatus, Session, Table, TableBlock};

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Whole minutes elapsed since `ts`, never negative
fn minutes_since(now_millis: i64, ts: Option<i64>) -> Option<i64> {
    ts.map(|ts| {
        let minutes = ((now_millis - ts) as f64 / MILLIS_PER_MINUTE).round() as i64;
        minutes.max(0)
    })
}

/// Project tables, sessions and checks into one block per table
///
/// A table is covered by the first session (in `sessions` order) that lists
/// it and is seated, i.e. neither `open` nor `closed`. Output follows the
/// order of `tables`.
pub fn derive_table_blocks(
    tables: &[Table],
    sessions: &[Session],
    checks: &[Check],
    now_millis: i64,
) -> Vec<TableBlock> {
    tables
        .iter()
        .map(|table| {
            let covering = sessions
                .iter()
                .find(|s| s.status.is_seated() && s.covers(&table.id));
            match covering {
                Some(session) => {
                    let check = checks
                        .iter()
                        .find(|c| c.id == session.check_id || c.session_id == session.id);
                    seated_block(table, session, check, now_millis)
                }
                None => empty_block(table),
            }
        })
        .collect()
}

fn empty_block(table: &Table) -> TableBlock {
    TableBlock {
        table_id: table.id.clone(),
        label: table.label.clone(),
        zone: table.zone,
        seats: table.seats,
        status: ServiceStatus::Open,
        session_id: None,
        check_id: None,
        revision: None,
        course: None,
        minutes_since_fire: None,
        minutes_seated: None,
        guest_names: Vec::new(),
        party_size: None,
        line_count: 0,
        subtotal: 0.0,
        comp_total: 0.0,
        bill_total: 0.0,
    }
}

fn seated_block(
    table: &Table,
    session: &Session,
    check: Option<&Check>,
    now_millis: i64,
) -> TableBlock {
    let totals = check
        .map(|c| check_totals(&c.lines))
        .unwrap_or_else(CheckTotals::default);

    TableBlock {
        table_id: table.id.clone(),
        label: table.label.clone(),
        zone: table.zone,
        seats: table.seats,
        status: session.status,
        session_id: Some(session.id.clone()),
        check_id: check.map(|c| c.id.clone()),
        revision: check.map(|c| c.revision),
        course: check.and_then(current_course).map(str::to_string),
        minutes_since_fire: minutes_since(now_millis, check.and_then(|c| c.last_fire_at)),
        minutes_seated: minutes_since(now_millis, Some(session.opened_at)),
        guest_names: session.guest_names.clone(),
        party_size: Some(session.party_size),
        line_count: check.map(|c| c.lines.len()).unwrap_or(0),
        subtotal: totals.subtotal,
        comp_total: totals.comp_total,
        bill_total: totals.bill_total,
    }
}
