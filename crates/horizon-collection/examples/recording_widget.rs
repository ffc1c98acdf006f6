//! Recording Widget Example
//!
//! Drives a data source against a console widget that prints every command
//! it receives and plays its batch animations on demand:
//! - Kind registration ahead of each transaction
//! - Batched inserts, deletes and reloads, resolved when the animation ends
//! - An immediate update falling back to a full reload
//! - Selection and size handlers
//!
//! Run with: RUST_LOG=horizon_collection=debug cargo run -p horizon-collection --example recording_widget

use horizon_collection::prelude::*;
use horizon_collection::UpdateCompletion;
use tracing_subscriber::EnvFilter;

/// A photo album entry.
#[derive(Debug, Clone)]
enum Entry {
    Photo { name: &'static str, width: f32 },
    Caption(&'static str),
}

impl CellModel for Entry {
    fn cell_kind(&self) -> ReuseIdentifier {
        match self {
            Entry::Photo { .. } => ReuseIdentifier::new("PhotoCell"),
            Entry::Caption(_) => ReuseIdentifier::new("CaptionCell"),
        }
    }
}

/// Console widget state
#[derive(Default)]
struct ConsoleWidget {
    /// Batch completions waiting for their animation to end
    animations: Vec<UpdateCompletion>,
    /// Transactions performed so far
    transactions: usize,
}

impl ConsoleWidget {
    fn end_animations(&mut self) {
        for completion in self.animations.drain(..) {
            completion.complete(true);
        }
    }
}

impl CollectionWidget for ConsoleWidget {
    fn insert_sections(&mut self, sections: &[usize]) {
        println!("  insert sections {sections:?}");
    }

    fn delete_sections(&mut self, sections: &[usize]) {
        println!("  delete sections {sections:?}");
    }

    fn reload_sections(&mut self, sections: &[usize]) {
        println!("  reload sections {sections:?}");
    }

    fn insert_items(&mut self, coordinates: &[Coordinate]) {
        println!("  insert items {}", join(coordinates));
    }

    fn delete_items(&mut self, coordinates: &[Coordinate]) {
        println!("  delete items {}", join(coordinates));
    }

    fn reload_items(&mut self, coordinates: &[Coordinate]) {
        println!("  reload items {}", join(coordinates));
    }

    fn reload_all(&mut self) {
        println!("  reload all");
    }

    fn register_cell(&mut self, kind: &ReuseIdentifier) {
        println!("register cell {kind}");
    }

    fn register_supplementary(&mut self, element: ElementKind, kind: &ReuseIdentifier) {
        println!("register {element} {kind}");
    }

    fn perform_batch_updates<F>(&mut self, updates: F, completion: UpdateCompletion)
    where
        F: FnOnce(&mut Self),
    {
        self.transactions += 1;
        println!("begin transaction #{}", self.transactions);
        updates(self);
        println!("end transaction #{}", self.transactions);
        self.animations.push(completion);
    }
}

fn join(coordinates: &[Coordinate]) -> String {
    coordinates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut album: CollectionDataSource<Entry, HeaderFooter<String>, ConsoleWidget> =
        CollectionDataSource::new(
            ConsoleWidget::default(),
            vec![vec![
                Entry::Photo { name: "harbor", width: 120.0 },
                Entry::Caption("Summer"),
            ]],
            vec![HeaderFooter::header("2024".to_string())],
        );

    album
        .on_select(|coordinate, entry| println!("selected {entry:?} at {coordinate}"))
        .on_item_size(|_, entry| match entry {
            Entry::Photo { width, .. } => Size::new(*width, *width),
            Entry::Caption(_) => Size::new(320.0, 24.0),
        });

    let pending = album.insert_items(
        vec![
            Entry::Photo { name: "dunes", width: 90.0 },
            Entry::Caption("Autumn"),
        ],
        &[Coordinate::new(0, 1), Coordinate::new(1, 0)],
        UpdateStyle::Batched,
    );
    pending.on_complete(|finished| println!("insert animation finished: {finished}"));
    album.widget_mut().end_animations();

    album.insert_supplementary(
        vec![HeaderFooter::both("2025".to_string(), "end of album".to_string())],
        &[1],
        UpdateStyle::Batched,
    );
    album.widget_mut().end_animations();

    let pending = album.delete_items(&[Coordinate::new(1, 0)], UpdateStyle::Batched);
    album.widget_mut().end_animations();
    println!("delete finished: {}", pending.wait());

    album.update_items(
        &[Coordinate::new(0, 0)],
        vec![Entry::Photo { name: "harbor at dusk", width: 140.0 }],
        UpdateStyle::Immediate,
    );

    album.did_select_item(Coordinate::new(0, 0));
    for item in 0..album.number_of_items(0) {
        let coordinate = Coordinate::new(0, item);
        println!("size at {coordinate}: {:?}", album.size_for_item(coordinate));
    }
    println!("last item: {}", album.coordinate_of_last_item());
}
