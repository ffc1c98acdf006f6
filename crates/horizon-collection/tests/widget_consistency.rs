//! The widget's structure must follow the store's exactly, and the store
//! must already be mutated when the widget receives its commands.

use std::sync::Arc;

use horizon_collection::prelude::*;
use horizon_collection::UpdateCompletion;
use parking_lot::Mutex;

fn c(section: usize, item: usize) -> Coordinate {
    Coordinate::new(section, item)
}

fn join(coordinates: &[Coordinate]) -> String {
    coordinates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Count mirroring
// ============================================================================

/// Keeps per-section item counts up to date from structural commands alone,
/// the way a real widget maintains its layout between data source queries.
#[derive(Debug, Default)]
struct Mirror {
    counts: Vec<usize>,
    /// Sections the widget will query afresh: inserted or reloaded ones.
    fresh: Vec<usize>,
    reload_everything: bool,
}

impl CollectionWidget for Mirror {
    fn insert_sections(&mut self, sections: &[usize]) {
        for &section in sections {
            self.counts.insert(section, 0);
            self.fresh.push(section);
        }
    }

    fn delete_sections(&mut self, sections: &[usize]) {
        for &section in sections.iter().rev() {
            self.counts.remove(section);
        }
    }

    fn reload_sections(&mut self, sections: &[usize]) {
        self.fresh.extend_from_slice(sections);
    }

    fn insert_items(&mut self, coordinates: &[Coordinate]) {
        for coordinate in coordinates {
            self.counts[coordinate.section()] += 1;
        }
    }

    fn delete_items(&mut self, coordinates: &[Coordinate]) {
        for coordinate in coordinates {
            self.counts[coordinate.section()] -= 1;
        }
    }

    fn reload_items(&mut self, _: &[Coordinate]) {}

    fn reload_all(&mut self) {
        self.reload_everything = true;
    }

    fn register_cell(&mut self, _: &ReuseIdentifier) {}

    fn register_supplementary(&mut self, _: ElementKind, _: &ReuseIdentifier) {}
}

type MirrorSource = CollectionDataSource<&'static str, HeaderFooter<&'static str>, Mirror>;

fn mirrored(sections: Vec<Vec<&'static str>>) -> MirrorSource {
    let counts = sections.iter().map(Vec::len).collect();
    CollectionDataSource::new(
        Mirror {
            counts,
            ..Mirror::default()
        },
        sections,
        Vec::new(),
    )
}

/// Lets the widget query the sections it must refresh, then checks that its
/// counts match the store.
fn settle(source: &mut MirrorSource) {
    let store_counts: Vec<usize> = (0..source.number_of_sections())
        .map(|section| source.number_of_items(section))
        .collect();

    let Mirror {
        counts,
        fresh,
        reload_everything,
    } = source.widget_mut();
    if std::mem::take(reload_everything) {
        counts.clone_from(&store_counts);
    }
    for section in fresh.drain(..) {
        counts[section] = store_counts[section];
    }
    assert_eq!(*counts, store_counts, "widget structure diverged from the store");
}

#[test]
fn test_repeated_insert_coordinate_counts_every_item() {
    let mut source = mirrored(vec![vec!["a", "b"]]);
    source.insert_items(vec!["x", "y"], &[c(0, 0), c(0, 0)], UpdateStyle::Batched);

    assert_eq!(source.number_of_items(0), 4);
    assert_eq!(source.widget().counts, vec![4]);
    settle(&mut source);
}

#[test]
fn test_caller_order_insert_reports_final_slots() {
    let mut source = mirrored(vec![vec!["a", "b"]]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    source.on_select(move |coordinate, item| sink.lock().push((coordinate, *item)));

    source.insert_items(vec!["x", "y"], &[c(0, 1), c(0, 0)], UpdateStyle::Batched);
    settle(&mut source);

    source.did_select_item(c(0, 2));
    source.did_select_item(c(0, 0));
    assert_eq!(*seen.lock(), vec![(c(0, 2), "x"), (c(0, 0), "y")]);
}

#[test]
fn test_mixed_mutations_keep_widget_in_step() {
    let mut source = mirrored(vec![vec!["a", "b"], vec!["c"]]);

    source.insert_items(vec!["x", "y"], &[c(0, 0), c(0, 0)], UpdateStyle::Batched);
    settle(&mut source);

    source.insert_items(vec!["p", "q"], &[c(0, 1), c(0, 0)], UpdateStyle::Batched);
    settle(&mut source);

    source.insert_items(vec!["n", "m"], &[c(5, 0), c(2, 1)], UpdateStyle::Batched);
    settle(&mut source);
    assert_eq!(source.number_of_items(2), 2);

    source.delete_items(&[c(0, 0), c(0, 0), c(1, 0)], UpdateStyle::Batched);
    settle(&mut source);

    source.update_sections(
        &[1, 2],
        vec![vec!["r"], vec!["s", "t"]],
        &[],
        Vec::new(),
        UpdateStyle::Batched,
    );
    settle(&mut source);

    source.delete_sections(&[0], UpdateStyle::Batched);
    settle(&mut source);

    source.insert_new_section(vec!["u"], None, 0, UpdateStyle::Batched);
    settle(&mut source);

    source.replace_all(vec![vec!["only"]], Vec::new(), UpdateStyle::Batched);
    settle(&mut source);

    source.insert_items(vec!["v", "w"], &[c(0, 0), c(0, 0)], UpdateStyle::Immediate);
    settle(&mut source);
    assert_eq!(source.widget().counts, vec![3]);
}

// ============================================================================
// Store mutated before commands
// ============================================================================

type Journal = Arc<Mutex<Vec<String>>>;

/// An item that notes in the journal when the store drops it.
struct Tracked {
    name: &'static str,
    journal: Journal,
}

impl CellModel for Tracked {
    fn cell_kind(&self) -> ReuseIdentifier {
        ReuseIdentifier::new("TrackedCell")
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.journal.lock().push(format!("drop {}", self.name));
    }
}

/// Writes every command to the same journal the items write to.
struct JournalWidget {
    journal: Journal,
}

impl JournalWidget {
    fn note(&self, entry: String) {
        self.journal.lock().push(entry);
    }
}

impl CollectionWidget for JournalWidget {
    fn insert_sections(&mut self, sections: &[usize]) {
        self.note(format!("insert_sections {sections:?}"));
    }

    fn delete_sections(&mut self, sections: &[usize]) {
        self.note(format!("delete_sections {sections:?}"));
    }

    fn reload_sections(&mut self, sections: &[usize]) {
        self.note(format!("reload_sections {sections:?}"));
    }

    fn insert_items(&mut self, coordinates: &[Coordinate]) {
        self.note(format!("insert_items {}", join(coordinates)));
    }

    fn delete_items(&mut self, coordinates: &[Coordinate]) {
        self.note(format!("delete_items {}", join(coordinates)));
    }

    fn reload_items(&mut self, coordinates: &[Coordinate]) {
        self.note(format!("reload_items {}", join(coordinates)));
    }

    fn reload_all(&mut self) {
        self.note("reload_all".into());
    }

    fn register_cell(&mut self, _: &ReuseIdentifier) {}

    fn register_supplementary(&mut self, _: ElementKind, _: &ReuseIdentifier) {}

    fn perform_batch_updates<F>(&mut self, updates: F, completion: UpdateCompletion)
    where
        F: FnOnce(&mut Self),
    {
        self.note("begin".into());
        updates(self);
        self.note("end".into());
        completion.complete(true);
    }
}

type JournalSource = CollectionDataSource<Tracked, HeaderFooter<&'static str>, JournalWidget>;

fn journaled(journal: &Journal) -> JournalSource {
    let tracked = |name| Tracked {
        name,
        journal: journal.clone(),
    };
    let source = CollectionDataSource::new(
        JournalWidget {
            journal: journal.clone(),
        },
        vec![vec![tracked("a"), tracked("b")], vec![tracked("c")]],
        Vec::new(),
    );
    journal.lock().clear();
    source
}

#[test]
fn test_items_dropped_before_delete_commands() {
    let journal = Journal::default();
    let mut source = journaled(&journal);

    source.delete_items(&[c(1, 0), c(0, 0)], UpdateStyle::Batched);

    let entries = journal.lock().clone();
    assert_eq!(
        entries,
        vec![
            "begin",
            "drop c",
            "drop a",
            "delete_items (0, 0)",
            "delete_sections [1]",
            "end",
        ]
    );
}

#[test]
fn test_store_replaced_before_commands() {
    let journal = Journal::default();
    let mut source = journaled(&journal);

    source.replace_all(Vec::new(), Vec::new(), UpdateStyle::Batched);

    let entries = journal.lock().clone();
    assert_eq!(
        entries,
        vec![
            "begin",
            "drop a",
            "drop b",
            "drop c",
            "delete_sections [0, 1]",
            "end",
        ]
    );
}

#[test]
fn test_reconcile_mutates_before_commands() {
    let journal = Journal::default();
    let mut source = journaled(&journal);

    for style in [UpdateStyle::Batched, UpdateStyle::Immediate] {
        let item = Tracked {
            name: "z",
            journal: journal.clone(),
        };
        source.reconcile(style, |store| {
            let created = store.insert_items(vec![item], &[c(9, 0)]);
            journal
                .lock()
                .push(format!("store has {} sections", store.number_of_sections()));
            ChangeSet::new().with_inserted_sections(created)
        });
    }

    let entries = journal.lock().clone();
    assert_eq!(
        entries,
        vec![
            "begin",
            "store has 3 sections",
            "insert_sections [2]",
            "end",
            "store has 4 sections",
            "reload_all",
        ]
    );
}
