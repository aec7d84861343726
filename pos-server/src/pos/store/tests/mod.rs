use super::*;

mod test_check;
mod test_lines;

const ACTOR: &str = "staff-1";

fn create_test_store() -> PosStore {
    PosStore::in_memory(FloorPlan::builtin()).unwrap()
}

fn tables(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Open (or join) the check for one table
fn open_check(store: &PosStore, table_id: &str) -> Check {
    store
        .ensure_check_for_tables(&tables(&[table_id]), ACTOR)
        .unwrap()
}

fn add(store: &PosStore, check_id: &str, name: &str, price: f64) -> LineMutation {
    store
        .add_line(check_id, AddLineInput::new(name, "1", price), ACTOR)
        .unwrap()
}

fn bill_total(check: &Check) -> f64 {
    crate::pos::money::check_totals(&check.lines).bill_total
}
