use stockroom::{
    config::CatalogConfig,
    core::{
        catalog::{Catalog, CatalogError, UndoOutcome},
        oplog::{LogError, OperationLog, UndoLog},
    },
    op::{EntryKind, LogEntry},
    product::ProductRecord,
};

fn seeded() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.insert(1, "Pen", 1.5, 10).unwrap();
    catalog.insert(2, "Stapler", 12.75, 0).unwrap();
    catalog.insert(3, "Tape", 2.25, 4).unwrap();
    catalog
}

fn records(catalog: &Catalog) -> Vec<ProductRecord> {
    catalog.iter().cloned().collect()
}

#[test]
fn insert_then_undo_removes_record() {
    let mut catalog = seeded();
    let before = records(&catalog);

    catalog.insert(9, "Glue", 0.5, 3).unwrap();
    let outcome = catalog.undo_last().unwrap();

    assert_eq!(outcome, UndoOutcome::Removed(ProductRecord::new(9, "Glue", 0.5, 3)));
    assert!(!catalog.contains(9));
    assert_eq!(records(&catalog), before);
}

#[test]
fn update_then_undo_restores_price_and_quantity_exactly() {
    let mut catalog = seeded();
    let before = catalog.get(3).unwrap().clone();

    catalog.update(3, 40, 9.5).unwrap();
    let after = catalog.get(3).unwrap();
    assert_eq!((after.quantity_on_hand, after.unit_price), (40, 9.5));
    assert_eq!(after.name, "Tape");

    let outcome = catalog.undo_last().unwrap();
    assert_eq!(outcome, UndoOutcome::Restored(before.clone()));
    assert_eq!(catalog.get(3), Some(&before));
}

#[test]
fn delete_then_undo_reinserts_at_tail() {
    let mut catalog = seeded();
    let removed = catalog.delete(1).unwrap();
    assert_eq!(catalog.ordered_ids(), vec![2, 3]);

    let outcome = catalog.undo_last().unwrap();
    assert_eq!(outcome, UndoOutcome::Reinserted(removed.clone()));
    assert_eq!(catalog.get(1), Some(&removed));
    assert_eq!(catalog.ordered_ids(), vec![2, 3, 1]);
}

#[test]
fn undo_never_records_entries_of_its_own() {
    let mut catalog = seeded();
    catalog.delete(2).unwrap();
    assert_eq!(catalog.undo_depth(), 4);

    catalog.undo_last().unwrap();
    assert_eq!(catalog.undo_depth(), 3);

    while catalog.undo_last().is_ok() {}
    assert!(catalog.is_empty());
    assert_eq!(catalog.undo_depth(), 0);
}

#[test]
fn undo_on_empty_log_reports_nothing_to_undo() {
    let mut catalog = Catalog::new();
    assert_eq!(catalog.undo_last(), Err(CatalogError::NothingToUndo));
}

#[test]
fn decrement_is_not_undoable_and_undo_pops_the_insert() {
    let mut catalog = Catalog::new();
    catalog.insert(1, "Pen", 1.5, 10).unwrap();

    let listed: Vec<_> = catalog.list_in_stock().cloned().collect();
    assert_eq!(listed, vec![ProductRecord::new(1, "Pen", 1.5, 10)]);

    assert!(catalog.decrement_stock(1));
    assert_eq!(catalog.get(1).unwrap().quantity_on_hand, 9);

    let outcome = catalog.undo_last().unwrap();
    assert_eq!(outcome, UndoOutcome::Removed(ProductRecord::new(1, "Pen", 1.5, 9)));
    assert_eq!(catalog.list_in_stock().count(), 0);
}

#[test]
fn bounded_log_keeps_only_most_recent_entries() {
    let mut catalog = Catalog::with_config(CatalogConfig::new().max_undo_depth(2));
    catalog.insert(1, "Pen", 1.5, 1).unwrap();
    catalog.insert(2, "Ink", 4.0, 1).unwrap();
    catalog.insert(3, "Pad", 2.0, 1).unwrap();
    assert_eq!(catalog.undo_depth(), 2);

    catalog.undo_last().unwrap();
    catalog.undo_last().unwrap();
    assert_eq!(catalog.undo_last(), Err(CatalogError::NothingToUndo));
    assert_eq!(catalog.ordered_ids(), vec![1]);
}

/// Log whose contents are fed by the test rather than by the catalog.
#[derive(Default)]
struct ScriptedLog {
    entries: Vec<LogEntry>,
    recorded: usize,
}

impl UndoLog for ScriptedLog {
    fn record(&mut self, _entry: LogEntry) {
        self.recorded += 1;
    }

    fn take_last(&mut self) -> Result<LogEntry, LogError> {
        self.entries.pop().ok_or(LogError::Empty)
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[test]
fn undo_with_diverged_target_is_skipped() {
    let mut log = ScriptedLog::default();
    log.entries.push(LogEntry::delete(ProductRecord::new(7, "Clip", 0.25, 5)));
    log.entries.push(LogEntry::update(ProductRecord::new(8, "Ruler", 1.0, 2)));
    log.entries.push(LogEntry::insert(ProductRecord::new(9, "Eraser", 0.5, 1)));

    let mut catalog = Catalog::with_log(log, CatalogConfig::default());
    catalog.insert(7, "Clip", 0.25, 5).unwrap();
    assert_eq!(catalog.log().recorded, 1);

    assert_eq!(
        catalog.undo_last(),
        Ok(UndoOutcome::Skipped { kind: EntryKind::Insert, id: 9 })
    );
    assert_eq!(
        catalog.undo_last(),
        Ok(UndoOutcome::Skipped { kind: EntryKind::Update, id: 8 })
    );
    assert_eq!(
        catalog.undo_last(),
        Ok(UndoOutcome::Skipped { kind: EntryKind::Delete, id: 7 })
    );
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.undo_last(), Err(CatalogError::NothingToUndo));
}

#[test]
fn log_reads_top_to_bottom_in_reverse_chronological_order() {
    let mut log = OperationLog::new();
    log.record(LogEntry::insert(ProductRecord::new(1, "Pen", 1.5, 10)));
    log.record(LogEntry::update(ProductRecord::new(1, "Pen", 1.5, 10)));
    log.record(LogEntry::delete(ProductRecord::new(1, "Pen", 2.0, 4)));

    let kinds: Vec<_> = log.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![EntryKind::Delete, EntryKind::Update, EntryKind::Insert]);
    assert_eq!(log.max_depth(), None);

    let top = log.peek_last().cloned().unwrap();
    assert_eq!(log.take_last(), Ok(top));
    assert_eq!(log.peek_last().map(|e| e.kind), Some(EntryKind::Update));
    assert_eq!(log.len(), 2);

    log.clear();
    assert!(log.is_empty());
    assert_eq!(log.peek_last(), None);
    assert_eq!(log.take_last(), Err(LogError::Empty));
}

#[test]
fn zero_depth_log_discards_every_entry() {
    let mut log = OperationLog::with_max_depth(0);
    log.record(LogEntry::insert(ProductRecord::new(1, "Pen", 1.5, 10)));
    assert_eq!(log.max_depth(), Some(0));
    assert!(log.is_empty());

    let mut catalog = Catalog::with_config(CatalogConfig::new().max_undo_depth(0));
    catalog.insert(1, "Pen", 1.5, 10).unwrap();
    assert_eq!(catalog.log().max_depth(), Some(0));
    assert_eq!(catalog.undo_last(), Err(CatalogError::NothingToUndo));
    assert!(catalog.contains(1));
}
