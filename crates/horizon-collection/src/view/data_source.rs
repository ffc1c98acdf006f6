//! The reconciling data source.
//!
//! [`CollectionDataSource`] owns a [`SectionedStore`] and the widget showing
//! it. Every mutation goes through [`CollectionDataSource::reconcile`]: the
//! store is changed, the structural delta is described as a [`ChangeSet`],
//! and the delta reaches the widget either as one batched transaction or as
//! a full reload.
//!
//! # Update Styles
//!
//! | Style | Store mutation | Widget sees | Completion |
//! |-------|----------------|-------------|------------|
//! | `Batched` | inside the transaction | exact inserts, deletes and reloads | when the widget's animation ends |
//! | `Immediate` | before the reload | `reload_all` | immediately, with `true` |
//!
//! Within one call the store is fully mutated before any widget command is
//! issued. Overlapping calls are the caller's concern: issue the next
//! mutation after the previous [`PendingUpdate`] resolves if the two could
//! compute stale deltas.

use std::sync::Arc;

use horizon_collection_core::logging::{span_names, targets};
use horizon_collection_core::{
    completion_pair, DiagnosticLevel, DiagnosticSink, PendingUpdate, PerfSpan, Point, Size,
    TracingSink,
};

use crate::config::DataSourceConfig;
use crate::model::{
    CellModel, Coordinate, ElementKind, ReuseIdentifier, SectionedStore, SupplementaryContainer,
    SupplementaryModel,
};

use super::changes::ChangeSet;
use super::handlers::{EventHandlers, ScrollMetrics};
use super::registry::ViewRegistry;
use super::widget::CollectionWidget;

/// How a mutation reaches the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UpdateStyle {
    /// One atomic, animated transaction with exact structural commands.
    #[default]
    Batched,
    /// A coarse, non-animated `reload_all` after the mutation.
    Immediate,
}

/// Keeps a collection widget in sync with a sectioned store and routes the
/// widget's lifecycle events to user handlers.
///
/// The store is only reachable read-only from outside, so every mutation
/// passes through a reconciliation pass and the widget's structure always
/// mirrors the store's.
///
/// # Registration
///
/// Before a mutation's widget commands are issued, the cell kinds of the
/// incoming items and the view kinds of incoming headers and footers are
/// registered with the widget. Kinds already known are skipped.
pub struct CollectionDataSource<T, S, W>
where
    S: SupplementaryContainer,
{
    store: SectionedStore<T, S>,
    widget: W,
    handlers: EventHandlers<T, S::Item>,
    registry: ViewRegistry,
    config: DataSourceConfig,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl<T, S, W> CollectionDataSource<T, S, W>
where
    T: CellModel,
    S: SupplementaryContainer,
    W: CollectionWidget,
{
    /// Creates a data source with the default configuration and registers
    /// every kind found in the initial data.
    pub fn new(widget: W, sections: Vec<Vec<T>>, supplementary: Vec<S>) -> Self {
        Self::with_config(widget, sections, supplementary, DataSourceConfig::default())
    }

    /// Creates a data source with `config`.
    pub fn with_config(
        widget: W,
        sections: Vec<Vec<T>>,
        supplementary: Vec<S>,
        config: DataSourceConfig,
    ) -> Self {
        let diagnostics = Arc::new(TracingSink::with_min_level(config.diagnostic_level));
        let mut source = Self {
            store: SectionedStore::new(sections, supplementary),
            widget,
            handlers: EventHandlers::default(),
            registry: ViewRegistry::new(),
            config,
            diagnostics,
        };
        source.register_all();
        source
    }

    /// Replaces the diagnostic sink.
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Returns the store.
    pub fn store(&self) -> &SectionedStore<T, S> {
        &self.store
    }

    /// Returns the widget.
    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Returns the widget mutably, for widget-side state such as finishing
    /// an animation. Structural changes must go through the data source.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn config(&self) -> &DataSourceConfig {
        &self.config
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn handlers(&self) -> &EventHandlers<T, S::Item> {
        &self.handlers
    }

    /// Splits the data source into its store and widget.
    pub fn into_parts(self) -> (SectionedStore<T, S>, W) {
        (self.store, self.widget)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn number_of_sections(&self) -> usize {
        self.store.number_of_sections()
    }

    /// # Panics
    ///
    /// Panics if `section` does not exist.
    #[track_caller]
    pub fn number_of_items(&self, section: usize) -> usize {
        self.store.number_of_items(section)
    }

    pub fn item(&self, coordinate: Coordinate) -> Option<&T> {
        self.store.item(coordinate)
    }

    pub fn supplementary(&self, section: usize) -> Option<&S> {
        self.store.supplementary(section)
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// See [`SectionedStore::coordinate_of_last_item_in`].
    #[track_caller]
    pub fn coordinate_of_last_item_in(&self, section: usize) -> Coordinate {
        self.store.coordinate_of_last_item_in(section)
    }

    /// See [`SectionedStore::coordinate_of_last_item`].
    #[track_caller]
    pub fn coordinate_of_last_item(&self) -> Coordinate {
        self.store.coordinate_of_last_item()
    }

    /// Returns the cell kind the widget should dequeue at `coordinate`.
    pub fn cell_kind(&self, coordinate: Coordinate) -> Option<ReuseIdentifier> {
        self.store.item(coordinate).map(CellModel::cell_kind)
    }

    /// Returns the header or footer item of `section`.
    pub fn supplementary_item(&self, kind: ElementKind, section: usize) -> Option<&S::Item> {
        self.store
            .supplementary(section)
            .and_then(|container| container.item(kind))
    }

    /// Returns the view kind the widget should dequeue for the header or
    /// footer of `section`.
    pub fn supplementary_view_kind(
        &self,
        kind: ElementKind,
        section: usize,
    ) -> Option<ReuseIdentifier> {
        self.supplementary_item(kind, section)
            .map(SupplementaryModel::view_kind)
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers every cell and supplementary kind currently in the store.
    ///
    /// Returns the number of kinds the widget had not seen before.
    pub fn register_all(&mut self) -> usize {
        let _span = PerfSpan::new(span_names::REGISTER);
        let cells = register_cells(
            &mut self.registry,
            &mut self.widget,
            self.store.all_items().iter().flatten(),
        );
        let supplementary = register_containers(
            &mut self.registry,
            &mut self.widget,
            self.store.all_supplementary(),
        );
        cells + supplementary
    }

    fn register_items(&mut self, items: &[T]) {
        register_cells(&mut self.registry, &mut self.widget, items);
    }

    fn register_supplementary<'a>(&mut self, containers: impl IntoIterator<Item = &'a S>)
    where
        S: 'a,
    {
        register_containers(&mut self.registry, &mut self.widget, containers);
    }

    // =========================================================================
    // Reconciliation
    // =========================================================================

    /// Applies `mutate` to the store and brings the widget up to date.
    ///
    /// `mutate` returns the structural delta it caused. With
    /// [`UpdateStyle::Batched`] it runs inside the widget's transaction and
    /// its change set is issued there; with [`UpdateStyle::Immediate`] the
    /// widget reloads everything instead and the update resolves at once.
    pub fn reconcile<F>(&mut self, style: UpdateStyle, mutate: F) -> PendingUpdate
    where
        F: FnOnce(&mut SectionedStore<T, S>) -> ChangeSet,
    {
        let _span = PerfSpan::new(span_names::RECONCILE);
        match style {
            UpdateStyle::Batched => {
                let (completion, pending) = completion_pair();
                let store = &mut self.store;
                let diagnostics = self.diagnostics.as_ref();
                self.widget.perform_batch_updates(
                    |widget| {
                        let changes = mutate(store);
                        record(diagnostics, DiagnosticLevel::Debug, targets::VIEW, || {
                            format!("batched update: {changes}")
                        });
                        changes.apply_to(widget);
                    },
                    completion,
                );
                pending
            }
            UpdateStyle::Immediate => {
                let changes = mutate(&mut self.store);
                record(
                    self.diagnostics.as_ref(),
                    DiagnosticLevel::Debug,
                    targets::VIEW,
                    || format!("immediate update: {changes}, reloading all"),
                );
                self.widget.reload_all();
                PendingUpdate::resolved(true)
            }
        }
    }

    // =========================================================================
    // Insert
    // =========================================================================

    /// Inserts each item at its paired coordinate.
    ///
    /// Coordinates past the last section create new trailing sections (see
    /// [`SectionedStore::insert_items`]); the widget is told to insert those
    /// sections and the items placed in existing ones, at the positions they
    /// finally occupy.
    ///
    /// # Panics
    ///
    /// Panics if the lists differ in length or an item index is out of range.
    #[track_caller]
    pub fn insert_items(
        &mut self,
        items: Vec<T>,
        coordinates: &[Coordinate],
        style: UpdateStyle,
    ) -> PendingUpdate {
        self.register_items(&items);
        self.reconcile(style, |store| {
            let existing = store.number_of_sections();
            let placement = store.place_items(items, coordinates);
            ChangeSet::new()
                .with_inserted_items(
                    placement
                        .positions
                        .into_iter()
                        .filter(|coordinate| coordinate.section() < existing),
                )
                .with_inserted_sections(placement.new_sections)
        })
    }

    /// Inserts supplementary containers so each ends up at its paired index.
    ///
    /// Supplementary views are redrawn by reloading sections: every
    /// existing section from the lowest index onwards, since the containers
    /// after an insertion shift.
    ///
    /// # Panics
    ///
    /// Panics if the lists differ in length or an index would land past the
    /// end of the supplementary containers.
    #[track_caller]
    pub fn insert_supplementary(
        &mut self,
        containers: Vec<S>,
        sections: &[usize],
        style: UpdateStyle,
    ) -> PendingUpdate {
        self.register_supplementary(&containers);
        self.reconcile(style, |store| {
            store.insert_supplementary_at(containers, sections);
            ChangeSet::new().with_reloaded_sections(shifted_sections(store, sections))
        })
    }

    /// Inserts a new section at `section`, with an optional supplementary
    /// container at the same index.
    ///
    /// # Panics
    ///
    /// Panics if `section` is past the end of either axis it touches.
    #[track_caller]
    pub fn insert_new_section(
        &mut self,
        items: Vec<T>,
        supplementary: Option<S>,
        section: usize,
        style: UpdateStyle,
    ) -> PendingUpdate {
        self.register_items(&items);
        self.register_supplementary(supplementary.iter());
        self.reconcile(style, |store| {
            store.insert_new_section_with_supplementary(items, supplementary, section);
            ChangeSet::new().with_inserted_sections([section])
        })
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Replaces the items at `coordinates` and reloads them.
    ///
    /// # Panics
    ///
    /// Panics if the lists differ in length or a coordinate holds no item.
    #[track_caller]
    pub fn update_items(
        &mut self,
        coordinates: &[Coordinate],
        items: Vec<T>,
        style: UpdateStyle,
    ) -> PendingUpdate {
        self.register_items(&items);
        self.reconcile(style, |store| {
            store.update_items(coordinates, items);
            ChangeSet::new().with_reloaded_items(coordinates.iter().copied())
        })
    }

    /// Replaces supplementary containers and reloads their sections.
    ///
    /// # Panics
    ///
    /// Panics if the lists differ in length or an index is past the end of
    /// the supplementary containers.
    #[track_caller]
    pub fn update_supplementary(
        &mut self,
        sections: &[usize],
        containers: Vec<S>,
        style: UpdateStyle,
    ) -> PendingUpdate {
        self.register_supplementary(&containers);
        self.reconcile(style, |store| {
            store.replace_supplementary(sections, containers);
            let total = store.number_of_sections();
            ChangeSet::new()
                .with_reloaded_sections(sections.iter().copied().filter(|&s| s < total))
        })
    }

    /// Replaces item sections and supplementary containers in one update.
    ///
    /// Item sections appended past the previous end are inserted; every
    /// other touched section is reloaded.
    ///
    /// # Panics
    ///
    /// Panics unless each index list matches its value list in length, or if
    /// an index is past the end of its axis.
    #[track_caller]
    pub fn update_sections(
        &mut self,
        item_sections: &[usize],
        item_lists: Vec<Vec<T>>,
        supplementary_sections: &[usize],
        containers: Vec<S>,
        style: UpdateStyle,
    ) -> PendingUpdate {
        register_cells(
            &mut self.registry,
            &mut self.widget,
            item_lists.iter().flatten(),
        );
        self.register_supplementary(&containers);
        self.reconcile(style, |store| {
            let existing = store.number_of_sections();
            store.update_combined(item_sections, item_lists, supplementary_sections, containers);
            let total = store.number_of_sections();

            let inserted: Vec<usize> = item_sections
                .iter()
                .copied()
                .filter(|&s| s >= existing)
                .collect();
            let reloaded: Vec<usize> = item_sections
                .iter()
                .chain(supplementary_sections)
                .copied()
                .filter(|s| *s < total && !inserted.contains(s))
                .collect();

            ChangeSet::new()
                .with_inserted_sections(inserted)
                .with_reloaded_sections(reloaded)
        })
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Deletes items. Sections left with no items are deleted whole, along
    /// with their supplementary containers.
    ///
    /// # Panics
    ///
    /// Panics if a coordinate names a missing section or item.
    #[track_caller]
    pub fn delete_items(
        &mut self,
        coordinates: &[Coordinate],
        style: UpdateStyle,
    ) -> PendingUpdate {
        self.reconcile(style, |store| {
            let emptied = store.delete_items(coordinates);

            let containers = store.supplementary_count();
            let orphaned: Vec<usize> = emptied
                .iter()
                .copied()
                .filter(|&s| s < containers)
                .collect();
            if !orphaned.is_empty() {
                store.delete_supplementary(&orphaned);
            }

            ChangeSet::new()
                .with_deleted_items(
                    coordinates
                        .iter()
                        .copied()
                        .filter(|coordinate| !emptied.contains(&coordinate.section())),
                )
                .with_deleted_sections(emptied)
        })
    }

    /// Deletes supplementary containers and reloads the sections whose
    /// headers and footers changed.
    ///
    /// # Panics
    ///
    /// Panics if an index is past the last container.
    #[track_caller]
    pub fn delete_supplementary(
        &mut self,
        sections: &[usize],
        style: UpdateStyle,
    ) -> PendingUpdate {
        self.reconcile(style, |store| {
            store.delete_supplementary(sections);
            ChangeSet::new().with_reloaded_sections(shifted_sections(store, sections))
        })
    }

    /// Deletes whole item sections. Supplementary containers are untouched.
    ///
    /// # Panics
    ///
    /// Panics if any section does not exist.
    #[track_caller]
    pub fn delete_sections(&mut self, sections: &[usize], style: UpdateStyle) -> PendingUpdate {
        self.reconcile(style, |store| {
            store.delete_sections(sections);
            ChangeSet::new().with_deleted_sections(sections.iter().copied())
        })
    }

    // =========================================================================
    // Overwrite
    // =========================================================================

    /// Replaces the whole store.
    ///
    /// Sections present before and after are reloaded; the tail is inserted
    /// or deleted.
    pub fn replace_all(
        &mut self,
        sections: Vec<Vec<T>>,
        supplementary: Vec<S>,
        style: UpdateStyle,
    ) -> PendingUpdate {
        register_cells(&mut self.registry, &mut self.widget, sections.iter().flatten());
        self.register_supplementary(&supplementary);
        self.reconcile(style, |store| {
            let before = store.number_of_sections();
            store.replace_all(sections, supplementary);
            let after = store.number_of_sections();

            let common = before.min(after);
            ChangeSet::new()
                .with_reloaded_sections(0..common)
                .with_inserted_sections(common..after)
                .with_deleted_sections(common..before)
        })
    }

    /// Clears the store, keeping or dropping its section structure.
    ///
    /// Never batched: when the configuration asks for it, the widget
    /// reloads everything. The update resolves at once.
    pub fn reset(&mut self, keeping_structure: bool) -> PendingUpdate {
        self.store.reset(keeping_structure);
        record(
            self.diagnostics.as_ref(),
            DiagnosticLevel::Debug,
            targets::VIEW,
            || format!("reset, keeping structure: {keeping_structure}"),
        );
        if self.config.reload_on_reset {
            self.widget.reload_all();
        }
        PendingUpdate::resolved(true)
    }

    // =========================================================================
    // Handler registration
    // =========================================================================

    /// Sets the handler for item selection.
    pub fn on_select<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(Coordinate, &T) + Send + 'static,
    {
        self.handlers.selection = Some(Box::new(handler));
        self
    }

    /// Sets the handler for item deselection.
    pub fn on_deselect<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(Coordinate, &T) + Send + 'static,
    {
        self.handlers.deselection = Some(Box::new(handler));
        self
    }

    /// Sets the handler computing item sizes.
    pub fn on_item_size<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(Coordinate, &T) -> Size + Send + 'static,
    {
        self.handlers.item_size = Some(Box::new(handler));
        self
    }

    /// Sets the handler computing header sizes.
    pub fn on_header_size<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(usize, &S::Item) -> Size + Send + 'static,
    {
        self.handlers.header_size = Some(Box::new(handler));
        self
    }

    /// Sets the handler computing footer sizes.
    pub fn on_footer_size<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(usize, &S::Item) -> Size + Send + 'static,
    {
        self.handlers.footer_size = Some(Box::new(handler));
        self
    }

    pub fn on_begin_prefetch<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&[Coordinate], &[&T]) + Send + 'static,
    {
        self.handlers.begin_prefetch = Some(Box::new(handler));
        self
    }

    pub fn on_cancel_prefetch<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&[Coordinate], &[&T]) + Send + 'static,
    {
        self.handlers.cancel_prefetch = Some(Box::new(handler));
        self
    }

    pub fn on_content_offset<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(Point) + Send + 'static,
    {
        self.handlers.content_offset = Some(Box::new(handler));
        self
    }

    pub fn on_will_begin_dragging<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&ScrollMetrics) + Send + 'static,
    {
        self.handlers.will_begin_dragging = Some(Box::new(handler));
        self
    }

    pub fn on_will_end_dragging<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&ScrollMetrics, Point, &mut Point) + Send + 'static,
    {
        self.handlers.will_end_dragging = Some(Box::new(handler));
        self
    }

    pub fn on_did_end_dragging<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&ScrollMetrics, bool) + Send + 'static,
    {
        self.handlers.did_end_dragging = Some(Box::new(handler));
        self
    }

    pub fn on_did_end_decelerating<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&ScrollMetrics) + Send + 'static,
    {
        self.handlers.did_end_decelerating = Some(Box::new(handler));
        self
    }

    pub fn on_did_end_scroll_animation<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&ScrollMetrics) + Send + 'static,
    {
        self.handlers.did_end_scroll_animation = Some(Box::new(handler));
        self
    }

    /// Empties every handler slot.
    pub fn clear_handlers(&mut self) -> &mut Self {
        self.handlers.clear();
        self
    }

    // =========================================================================
    // Event dispatch (called by the widget)
    // =========================================================================

    /// Reports that the user selected the item at `coordinate`.
    ///
    /// Returns `true` if a handler ran. Missing items and an empty slot are
    /// silent no-ops.
    pub fn did_select_item(&mut self, coordinate: Coordinate) -> bool {
        match (self.store.item(coordinate), self.handlers.selection.as_mut()) {
            (Some(item), Some(handler)) => {
                tracing::trace!(target: targets::DISPATCH, %coordinate, "select");
                handler(coordinate, item);
                true
            }
            _ => false,
        }
    }

    /// Reports that the user deselected the item at `coordinate`.
    pub fn did_deselect_item(&mut self, coordinate: Coordinate) -> bool {
        match (self.store.item(coordinate), self.handlers.deselection.as_mut()) {
            (Some(item), Some(handler)) => {
                tracing::trace!(target: targets::DISPATCH, %coordinate, "deselect");
                handler(coordinate, item);
                true
            }
            _ => false,
        }
    }

    /// Runs the selection handler for `coordinate` as if the widget had
    /// reported a selection.
    pub fn trigger_selection(&mut self, coordinate: Coordinate) -> bool {
        record(
            self.diagnostics.as_ref(),
            DiagnosticLevel::Trace,
            targets::DISPATCH,
            || format!("programmatic selection at {coordinate}"),
        );
        self.did_select_item(coordinate)
    }

    /// Returns the size of the cell at `coordinate`.
    ///
    /// Zero when no item exists there; the configured default when no
    /// handler is set.
    pub fn size_for_item(&mut self, coordinate: Coordinate) -> Size {
        let Some(item) = self.store.item(coordinate) else {
            return Size::ZERO;
        };
        match self.handlers.item_size.as_mut() {
            Some(handler) => handler(coordinate, item),
            None => self.config.default_item_size,
        }
    }

    /// Returns the size of the header of `section`.
    ///
    /// Zero when the section has no header item; the configured default
    /// when no handler is set.
    pub fn size_for_header(&mut self, section: usize) -> Size {
        let Some(header) = self
            .store
            .supplementary(section)
            .and_then(SupplementaryContainer::header)
        else {
            return Size::ZERO;
        };
        match self.handlers.header_size.as_mut() {
            Some(handler) => handler(section, header),
            None => self.config.default_supplementary_size,
        }
    }

    /// Returns the size of the footer of `section`.
    pub fn size_for_footer(&mut self, section: usize) -> Size {
        let Some(footer) = self
            .store
            .supplementary(section)
            .and_then(SupplementaryContainer::footer)
        else {
            return Size::ZERO;
        };
        match self.handlers.footer_size.as_mut() {
            Some(handler) => handler(section, footer),
            None => self.config.default_supplementary_size,
        }
    }

    /// Reports that the widget is about to need the items at `coordinates`.
    ///
    /// The handler receives every item that resolved; nothing is dispatched
    /// when the store has no sections.
    pub fn prefetch_items(&mut self, coordinates: &[Coordinate]) -> bool {
        let _span = PerfSpan::new(span_names::DISPATCH);
        match (self.store.items(coordinates), self.handlers.begin_prefetch.as_mut()) {
            (Some(items), Some(handler)) => {
                tracing::trace!(target: targets::DISPATCH, count = items.len(), "prefetch");
                handler(coordinates, items.as_slice());
                true
            }
            _ => false,
        }
    }

    /// Reports that a previous prefetch is no longer needed.
    pub fn cancel_prefetching(&mut self, coordinates: &[Coordinate]) -> bool {
        match (self.store.items(coordinates), self.handlers.cancel_prefetch.as_mut()) {
            (Some(items), Some(handler)) => {
                tracing::trace!(target: targets::DISPATCH, count = items.len(), "cancel prefetch");
                handler(coordinates, items.as_slice());
                true
            }
            _ => false,
        }
    }

    /// Reports a scroll.
    pub fn did_scroll(&mut self, metrics: &ScrollMetrics) {
        if let Some(handler) = self.handlers.content_offset.as_mut() {
            handler(metrics.content_offset);
        }
    }

    pub fn will_begin_dragging(&mut self, metrics: &ScrollMetrics) {
        if let Some(handler) = self.handlers.will_begin_dragging.as_mut() {
            handler(metrics);
        }
    }

    /// Reports that a drag is about to end. The handler may change
    /// `target_offset`, where the scroll will come to rest.
    pub fn will_end_dragging(
        &mut self,
        metrics: &ScrollMetrics,
        velocity: Point,
        target_offset: &mut Point,
    ) {
        if let Some(handler) = self.handlers.will_end_dragging.as_mut() {
            handler(metrics, velocity, target_offset);
        }
    }

    pub fn did_end_dragging(&mut self, metrics: &ScrollMetrics, will_decelerate: bool) {
        if let Some(handler) = self.handlers.did_end_dragging.as_mut() {
            handler(metrics, will_decelerate);
        }
    }

    pub fn did_end_decelerating(&mut self, metrics: &ScrollMetrics) {
        if let Some(handler) = self.handlers.did_end_decelerating.as_mut() {
            handler(metrics);
        }
    }

    pub fn did_end_scroll_animation(&mut self, metrics: &ScrollMetrics) {
        if let Some(handler) = self.handlers.did_end_scroll_animation.as_mut() {
            handler(metrics);
        }
    }
}

impl<T, S, W> std::fmt::Debug for CollectionDataSource<T, S, W>
where
    T: std::fmt::Debug,
    S: SupplementaryContainer + std::fmt::Debug,
    W: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionDataSource")
            .field("store", &self.store)
            .field("widget", &self.widget)
            .field("handlers", &self.handlers)
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn record(
    sink: &dyn DiagnosticSink,
    level: DiagnosticLevel,
    target: &'static str,
    message: impl FnOnce() -> String,
) {
    if sink.enabled(level) {
        sink.record(level, target, &message());
    }
}

/// Existing sections from the lowest touched index to the end.
fn shifted_sections<T, S>(
    store: &SectionedStore<T, S>,
    sections: &[usize],
) -> std::ops::Range<usize> {
    let total = store.number_of_sections();
    match sections.iter().min() {
        Some(&lowest) if lowest < total => lowest..total,
        _ => 0..0,
    }
}

fn register_cells<'a, T, W>(
    registry: &mut ViewRegistry,
    widget: &mut W,
    items: impl IntoIterator<Item = &'a T>,
) -> usize
where
    T: CellModel + 'a,
    W: CollectionWidget,
{
    items
        .into_iter()
        .filter(|item| registry.register_cell(widget, item.cell_kind()))
        .count()
}

fn register_containers<'a, S, W>(
    registry: &mut ViewRegistry,
    widget: &mut W,
    containers: impl IntoIterator<Item = &'a S>,
) -> usize
where
    S: SupplementaryContainer + 'a,
    W: CollectionWidget,
{
    let mut registered = 0;
    for container in containers {
        for element in ElementKind::ALL {
            if let Some(item) = container.item(element) {
                if registry.register_supplementary(widget, element, item.view_kind()) {
                    registered += 1;
                }
            }
        }
    }
    registered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeaderFooter;
    use horizon_collection_core::RecordingSink;

    #[derive(Debug, Default)]
    struct Log {
        commands: Vec<String>,
    }

    impl CollectionWidget for Log {
        fn insert_sections(&mut self, s: &[usize]) {
            self.commands.push(format!("insert_sections {s:?}"));
        }
        fn delete_sections(&mut self, s: &[usize]) {
            self.commands.push(format!("delete_sections {s:?}"));
        }
        fn reload_sections(&mut self, s: &[usize]) {
            self.commands.push(format!("reload_sections {s:?}"));
        }
        fn insert_items(&mut self, c: &[Coordinate]) {
            self.commands.push(format!("insert_items {c:?}"));
        }
        fn delete_items(&mut self, c: &[Coordinate]) {
            self.commands.push(format!("delete_items {c:?}"));
        }
        fn reload_items(&mut self, c: &[Coordinate]) {
            self.commands.push(format!("reload_items {c:?}"));
        }
        fn reload_all(&mut self) {
            self.commands.push("reload_all".into());
        }
        fn register_cell(&mut self, kind: &ReuseIdentifier) {
            self.commands.push(format!("register_cell {kind}"));
        }
        fn register_supplementary(&mut self, element: ElementKind, kind: &ReuseIdentifier) {
            self.commands.push(format!("register_{element} {kind}"));
        }
    }

    type Source = CollectionDataSource<&'static str, HeaderFooter<&'static str>, Log>;

    fn source(sections: Vec<Vec<&'static str>>) -> Source {
        let mut source = CollectionDataSource::new(Log::default(), sections, Vec::new());
        source.widget_mut().commands.clear();
        source
    }

    fn c(section: usize, item: usize) -> Coordinate {
        Coordinate::new(section, item)
    }

    #[test]
    fn test_initial_registration() {
        let source: Source = CollectionDataSource::new(
            Log::default(),
            vec![vec!["a", "b"]],
            vec![HeaderFooter::both("h", "f")],
        );
        assert_eq!(
            source.widget().commands,
            vec![
                "register_cell TextCell",
                "register_header TextSupplementaryView",
                "register_footer TextSupplementaryView",
            ]
        );
    }

    #[test]
    fn test_default_widget_batch_completes() {
        let mut source = source(vec![vec!["a"]]);
        let pending = source.insert_items(vec!["b"], &[c(0, 1)], UpdateStyle::Batched);
        assert_eq!(pending.result(), Some(true));
        assert_eq!(
            source.widget().commands,
            vec!["insert_items [Coordinate { section: 0, item: 1 }]"]
        );
    }

    #[test]
    fn test_immediate_reloads_all() {
        let mut source = source(vec![vec!["a"]]);
        let pending = source.delete_items(&[c(0, 0)], UpdateStyle::Immediate);
        assert_eq!(pending.result(), Some(true));
        assert_eq!(source.widget().commands, vec!["reload_all"]);
        assert_eq!(source.number_of_sections(), 0);
    }

    #[test]
    fn test_replace_all_shrinking() {
        let mut source = source(vec![vec!["a"], vec!["b"], vec!["c"]]);
        source.replace_all(vec![vec!["x"]], Vec::new(), UpdateStyle::Batched);
        assert_eq!(
            source.widget().commands,
            vec!["delete_sections [1, 2]", "reload_sections [0]"]
        );
    }

    #[test]
    fn test_shifted_sections() {
        let store: SectionedStore<&str, HeaderFooter<&str>> =
            SectionedStore::new(vec![vec![], vec![], vec![]], Vec::new());
        assert_eq!(shifted_sections(&store, &[2, 1]), 1..3);
        assert_eq!(shifted_sections(&store, &[5]), 0..0);
        assert_eq!(shifted_sections(&store, &[]), 0..0);
    }

    #[test]
    fn test_diagnostics_are_recorded() {
        let sink = Arc::new(RecordingSink::new());
        let mut source = source(vec![vec!["a"]]).with_diagnostics(sink.clone());
        source.update_items(&[c(0, 0)], vec!["b"], UpdateStyle::Batched);
        assert!(sink.contains("batched update"));
        sink.assert_no_suspicious_messages();
    }

    #[test]
    fn test_reset_respects_config() {
        let mut source: Source = CollectionDataSource::with_config(
            Log::default(),
            vec![vec!["a"]],
            Vec::new(),
            DataSourceConfig::default().with_reload_on_reset(false),
        );
        source.widget_mut().commands.clear();
        assert_eq!(source.reset(true).result(), Some(true));
        assert!(source.widget().commands.is_empty());
        assert_eq!(source.number_of_sections(), 1);
        assert!(source.is_empty());
    }
}
