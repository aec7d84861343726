//! Check aggregate rules
//!
//! Pure functions over [`Check`] and [`Line`]. The store clones the current
//! check, runs these against the copy and publishes it only after persistence
//! succeeds, so a failed validation never leaves a partial edit behind.

use super::error::{PosError, PosResult};
use super::money;
use shared::models::{Check, Line, ServiceStatus};
use shared::request::{AddLineInput, LinePatch};
use shared::util::new_id;

/// Fresh check for a newly opened session
pub fn new_check(session_id: &str, actor: &str, now: i64) -> Check {
    Check {
        id: new_id(),
        session_id: session_id.to_string(),
        status: ServiceStatus::Open,
        lines: Vec::new(),
        revision: 0,
        note: None,
        created_at: now,
        updated_at: now,
        updated_by: actor.to_string(),
        last_fire_at: None,
    }
}

fn required_text(value: &str, field: &str) -> PosResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PosError::invalid(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Blank strings collapse to `None`
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_modifiers(modifiers: Vec<String>) -> Vec<String> {
    modifiers
        .into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect()
}

/// Validate an add-line payload and build the line it describes
pub fn build_line(input: AddLineInput, actor: &str, now: i64) -> PosResult<Line> {
    let name = required_text(&input.name, "name")?;
    let seat = required_text(&input.seat, "seat")?;
    let price = input
        .price
        .ok_or_else(|| PosError::invalid("price is required"))?;
    money::validate_price(price)?;
    let qty = input.qty.unwrap_or(1);
    money::validate_qty(qty)?;

    Ok(Line {
        id: new_id(),
        name,
        seat,
        price,
        qty,
        comp: input.comp.unwrap_or(false),
        modifiers: clean_modifiers(input.modifiers.unwrap_or_default()),
        course: optional_text(input.course),
        station: optional_text(input.station),
        created_at: now,
        created_by: actor.to_string(),
    })
}

/// Apply a partial update to the matching line
///
/// Every provided field is validated before any is written.
pub fn apply_line_patch(check: &mut Check, patch: LinePatch) -> PosResult<Line> {
    let name = patch
        .name
        .as_deref()
        .map(|n| required_text(n, "name"))
        .transpose()?;
    let seat = patch
        .seat
        .as_deref()
        .map(|s| required_text(s, "seat"))
        .transpose()?;
    if let Some(price) = patch.price {
        money::validate_price(price)?;
    }
    if let Some(qty) = patch.qty {
        money::validate_qty(qty)?;
    }

    let line = check
        .lines
        .iter_mut()
        .find(|l| l.id == patch.line_id)
        .ok_or_else(|| PosError::LineNotFound(patch.line_id.clone()))?;

    if let Some(name) = name {
        line.name = name;
    }
    if let Some(seat) = seat {
        line.seat = seat;
    }
    if let Some(price) = patch.price {
        line.price = price;
    }
    if let Some(qty) = patch.qty {
        line.qty = qty;
    }
    if let Some(comp) = patch.comp {
        line.comp = comp;
    }
    if let Some(modifiers) = patch.modifiers {
        line.modifiers = clean_modifiers(modifiers);
    }
    // An explicit empty string clears course/station
    if let Some(course) = patch.course {
        line.course = optional_text(Some(course));
    }
    if let Some(station) = patch.station {
        line.station = optional_text(Some(station));
    }

    Ok(line.clone())
}

/// Remove a line by id; `None` when absent
pub fn remove_line(check: &mut Check, line_id: &str) -> Option<Line> {
    let index = check.lines.iter().position(|l| l.id == line_id)?;
    Some(check.lines.remove(index))
}

/// Stale-write guard
pub fn verify_revision(check: &Check, expected: Option<u64>) -> PosResult<()> {
    match expected {
        Some(expected) if expected != check.revision => Err(PosError::RevisionMismatch {
            expected,
            actual: check.revision,
        }),
        _ => Ok(()),
    }
}

pub fn ensure_open(check: &Check) -> PosResult<()> {
    if check.is_closed() {
        return Err(PosError::CheckClosed(check.id.clone()));
    }
    Ok(())
}

/// Record a successful mutation: one revision step
pub fn touch(check: &mut Check, actor: &str, now: i64) {
    check.revision += 1;
    check.updated_at = now;
    check.updated_by = actor.to_string();
}

/// Course of the most recently added line that has one
pub fn current_course(check: &Check) -> Option<&str> {
    check
        .lines
        .iter()
        .filter(|l| l.course.is_some())
        .max_by_key(|l| l.created_at)
        .and_then(|l| l.course.as_deref())
}
