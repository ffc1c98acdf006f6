//! The sectioned store.
//!
//! [`SectionedStore`] owns two positional sequences:
//!
//! - one item list per section
//! - one supplementary container per section index
//!
//! The two axes are indexed independently. A caller may insert or delete
//! supplementary containers without touching items and the other way round,
//! so their lengths can differ. Reads past the end of either axis report
//! absence; writes with out-of-range indices are contract violations.

use std::collections::BTreeMap;

use horizon_collection_core::logging::targets;
use horizon_collection_core::{contract_violation, ContractViolation};

use super::coordinate::Coordinate;
use super::indices::{insert_at_indices, remove_at_indices};
use super::traits::SupplementaryContainer;

/// Items grouped into sections, with a header/footer container per section.
///
/// The store knows nothing about widgets. Every mutation happens in place
/// and synchronously; [`CollectionDataSource`](crate::view::CollectionDataSource)
/// wraps it to keep a widget in sync.
///
/// # Example
///
/// ```
/// use horizon_collection::model::{Coordinate, HeaderFooter, SectionedStore};
///
/// let mut store: SectionedStore<&str, HeaderFooter<&str>> =
///     SectionedStore::new(vec![vec!["a", "b"], vec!["c"]], Vec::new());
///
/// let created = store.insert_items(vec!["z"], &[Coordinate::new(2, 0)]);
/// assert_eq!(created, vec![2]);
/// assert_eq!(store.item(Coordinate::new(2, 0)), Some(&"z"));
///
/// let emptied = store.delete_items(&[Coordinate::new(1, 0)]);
/// assert_eq!(emptied, vec![1]);
/// assert_eq!(store.number_of_sections(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SectionedStore<T, S> {
    sections: Vec<Vec<T>>,
    supplementary: Vec<S>,
}

/// Where the items of one [`SectionedStore::place_items`] call landed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPlacement {
    /// Final coordinate of each item, in the order the items were given.
    pub positions: Vec<Coordinate>,
    /// Sections created by the call, in creation order.
    pub new_sections: Vec<usize>,
}

impl<T, S> Default for SectionedStore<T, S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, S> SectionedStore<T, S> {
    /// Creates a store from initial item sections and supplementary containers.
    pub fn new(sections: Vec<Vec<T>>, supplementary: Vec<S>) -> Self {
        Self {
            sections,
            supplementary,
        }
    }

    /// Creates a store with no sections and no supplementary containers.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the number of sections.
    #[inline]
    pub fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    /// Returns the number of items in `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section` does not exist.
    #[track_caller]
    pub fn number_of_items(&self, section: usize) -> usize {
        self.check_section(section);
        self.sections[section].len()
    }

    /// Returns `true` if there are no sections or every section is empty.
    ///
    /// Supplementary containers do not count.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Vec::is_empty)
    }

    /// Returns the item at `coordinate`, or `None` if either index is out of
    /// range.
    pub fn item(&self, coordinate: Coordinate) -> Option<&T> {
        self.sections
            .get(coordinate.section())
            .and_then(|items| items.get(coordinate.item()))
    }

    /// Returns the items at every resolvable coordinate, in input order.
    ///
    /// Returns `None` when the store has no sections. Unresolvable
    /// coordinates are skipped, so the result may be shorter than the input.
    pub fn items(&self, coordinates: &[Coordinate]) -> Option<Vec<&T>> {
        if self.sections.is_empty() {
            return None;
        }
        Some(
            coordinates
                .iter()
                .filter_map(|&coordinate| self.item(coordinate))
                .collect(),
        )
    }

    /// Returns the supplementary container at `section`, if one exists.
    pub fn supplementary(&self, section: usize) -> Option<&S> {
        self.supplementary.get(section)
    }

    /// Returns every section's items.
    pub fn all_items(&self) -> &[Vec<T>] {
        &self.sections
    }

    /// Returns every supplementary container.
    pub fn all_supplementary(&self) -> &[S] {
        &self.supplementary
    }

    /// Returns the items of `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section` does not exist.
    #[track_caller]
    pub fn items_in_section(&self, section: usize) -> &[T] {
        self.check_section(section);
        &self.sections[section]
    }

    /// Returns the number of supplementary containers.
    #[inline]
    pub fn supplementary_count(&self) -> usize {
        self.supplementary.len()
    }

    /// Returns the coordinate of the first item matching `predicate`,
    /// searching sections in order.
    pub fn position<P>(&self, mut predicate: P) -> Option<Coordinate>
    where
        P: FnMut(&T) -> bool,
    {
        self.sections
            .iter()
            .enumerate()
            .find_map(|(section, items)| {
                items
                    .iter()
                    .position(&mut predicate)
                    .map(|item| Coordinate::new(section, item))
            })
    }

    /// Returns `true` if any item matches `predicate`.
    pub fn contains<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.position(predicate).is_some()
    }

    /// Returns the coordinate of the last item in `section`.
    ///
    /// An empty section and a single-item section both report item 0.
    ///
    /// # Panics
    ///
    /// Panics if `section` does not exist.
    #[track_caller]
    pub fn coordinate_of_last_item_in(&self, section: usize) -> Coordinate {
        let count = self.number_of_items(section);
        Coordinate::new(section, count.saturating_sub(1))
    }

    /// Returns the coordinate of the last item in the last section.
    ///
    /// # Panics
    ///
    /// Panics if the store has no sections.
    #[track_caller]
    pub fn coordinate_of_last_item(&self) -> Coordinate {
        match self.sections.len() {
            0 => contract_violation(ContractViolation::EmptyStore {
                operation: "coordinate_of_last_item",
            }),
            sections => self.coordinate_of_last_item_in(sections - 1),
        }
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Appends `items` to the end of an existing section.
    ///
    /// # Panics
    ///
    /// Panics if `section` does not exist. Use
    /// [`append_new_section`](Self::append_new_section) to create one.
    #[track_caller]
    pub fn append_items(&mut self, items: Vec<T>, section: usize) {
        self.check_section(section);
        tracing::trace!(target: targets::MODEL, section, count = items.len(), "append items");
        self.sections[section].extend(items);
    }

    /// Appends a new trailing section and returns its index.
    pub fn append_new_section(&mut self, items: Vec<T>) -> usize {
        self.sections.push(items);
        let section = self.sections.len() - 1;
        tracing::trace!(target: targets::MODEL, section, "append section");
        section
    }

    /// Inserts each item at its paired coordinate and returns the indices of
    /// the sections this created.
    ///
    /// Pairs are applied in the order given. When a coordinate names a
    /// section past the last one, a new section holding just that item is
    /// appended (its index is the current section count, whatever the
    /// coordinate said). Otherwise the item is inserted at the coordinate's
    /// item index, shifting later items. Callers inserting several items into
    /// one section must order them so earlier insertions do not displace
    /// later targets.
    ///
    /// See [`place_items`](Self::place_items) for where each item ended up.
    ///
    /// # Panics
    ///
    /// Panics if `items` and `coordinates` differ in length, or if an item
    /// index is past the end of its section when its pair is applied. The
    /// store is left untouched in both cases.
    #[track_caller]
    pub fn insert_items(&mut self, items: Vec<T>, coordinates: &[Coordinate]) -> Vec<usize> {
        self.place_items(items, coordinates).new_sections
    }

    /// Inserts items exactly like [`insert_items`](Self::insert_items) and
    /// reports the final coordinate of every inserted item.
    ///
    /// Positions account for later insertions in the same call: an item
    /// placed at `(0, 1)` and followed by one placed at `(0, 0)` ends up at
    /// `(0, 2)`.
    ///
    /// # Panics
    ///
    /// Same as [`insert_items`](Self::insert_items).
    #[track_caller]
    pub fn place_items(&mut self, items: Vec<T>, coordinates: &[Coordinate]) -> ItemPlacement {
        if items.len() != coordinates.len() {
            contract_violation(ContractViolation::length_mismatch(
                "insert_items",
                coordinates.len(),
                items.len(),
            ));
        }

        let mut lengths: Vec<usize> = self.sections.iter().map(Vec::len).collect();
        for coordinate in coordinates {
            match lengths.get_mut(coordinate.section()) {
                Some(len) if coordinate.item() <= *len => *len += 1,
                Some(len) => contract_violation(ContractViolation::ItemOutOfBounds {
                    section: coordinate.section(),
                    item: coordinate.item(),
                    len: *len,
                }),
                None => lengths.push(1),
            }
        }

        let mut placement = ItemPlacement::default();
        for (item, coordinate) in items.into_iter().zip(coordinates) {
            if coordinate.section() >= self.sections.len() {
                let section = self.append_new_section(vec![item]);
                placement.new_sections.push(section);
                placement.positions.push(Coordinate::new(section, 0));
            } else {
                let (section, at) = (coordinate.section(), coordinate.item());
                self.sections[section].insert(at, item);
                for earlier in &mut placement.positions {
                    if earlier.section() == section && earlier.item() >= at {
                        *earlier = earlier.with_item(earlier.item() + 1);
                    }
                }
                placement.positions.push(*coordinate);
            }
        }

        tracing::trace!(
            target: targets::MODEL,
            count = coordinates.len(),
            new_sections = placement.new_sections.len(),
            "insert items"
        );
        placement
    }

    /// Inserts a run of items into an existing section, starting at `at`
    /// (item 0 when `None`).
    ///
    /// # Panics
    ///
    /// Panics if `section` does not exist or `at` is past its end.
    #[track_caller]
    pub fn insert_items_in_section(&mut self, items: Vec<T>, section: usize, at: Option<usize>) {
        self.check_section(section);
        let at = at.unwrap_or(0);
        let len = self.sections[section].len();
        if at > len {
            contract_violation(ContractViolation::ItemOutOfBounds {
                section,
                item: at,
                len,
            });
        }
        tracing::trace!(target: targets::MODEL, section, at, count = items.len(), "insert run");
        self.sections[section].splice(at..at, items);
    }

    /// Inserts a section at `section`, shifting that section and every later
    /// one back by one.
    ///
    /// # Panics
    ///
    /// Panics if `section` is greater than the number of sections.
    #[track_caller]
    pub fn insert_new_section(&mut self, items: Vec<T>, section: usize) {
        if section > self.sections.len() {
            contract_violation(ContractViolation::section_out_of_bounds(
                section,
                self.sections.len(),
            ));
        }
        tracing::trace!(target: targets::MODEL, section, "insert section");
        self.sections.insert(section, items);
    }

    /// Inserts a section and, when given, a supplementary container at the
    /// same index.
    ///
    /// # Panics
    ///
    /// Panics if `section` is greater than the number of sections, or a
    /// container is given and `section` is greater than the number of
    /// supplementary containers.
    #[track_caller]
    pub fn insert_new_section_with_supplementary(
        &mut self,
        items: Vec<T>,
        supplementary: Option<S>,
        section: usize,
    ) {
        if supplementary.is_some() && section > self.supplementary.len() {
            contract_violation(ContractViolation::IndexOutOfBounds {
                index: section,
                len: self.supplementary.len(),
            });
        }
        self.insert_new_section(items, section);
        if let Some(container) = supplementary {
            self.supplementary.insert(section, container);
        }
    }

    /// Appends a supplementary container.
    pub fn append_supplementary(&mut self, container: S) {
        self.supplementary.push(container);
    }

    /// Inserts a supplementary container at `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section` is greater than the number of supplementary
    /// containers.
    #[track_caller]
    pub fn insert_supplementary(&mut self, container: S, section: usize) {
        if section > self.supplementary.len() {
            contract_violation(ContractViolation::IndexOutOfBounds {
                index: section,
                len: self.supplementary.len(),
            });
        }
        self.supplementary.insert(section, container);
    }

    /// Inserts each container so that it ends up at its paired section index.
    ///
    /// Indices are final positions: inserting `[h1, h2]` at `[0, 2]` into a
    /// single container `e` yields `[h1, e, h2]`. A repeated index keeps only
    /// the first container supplied for it; the others are dropped.
    ///
    /// # Panics
    ///
    /// Panics if `containers` and `sections` differ in length, or an index
    /// would land past the end.
    #[track_caller]
    pub fn insert_supplementary_at(&mut self, containers: Vec<S>, sections: &[usize]) {
        let skipped = insert_at_indices(
            &mut self.supplementary,
            containers,
            sections,
            "insert_supplementary",
        );
        if !skipped.is_empty() {
            tracing::debug!(
                target: targets::MODEL,
                skipped = skipped.len(),
                "repeated supplementary indices ignored"
            );
        }
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Replaces the item at `coordinate`.
    ///
    /// # Panics
    ///
    /// Panics if no item exists at `coordinate`.
    #[track_caller]
    pub fn update_item(&mut self, coordinate: Coordinate, item: T) {
        match self
            .sections
            .get_mut(coordinate.section())
            .and_then(|items| items.get_mut(coordinate.item()))
        {
            Some(slot) => *slot = item,
            None => contract_violation(ContractViolation::missing_item(
                coordinate.section(),
                coordinate.item(),
            )),
        }
    }

    /// Replaces the item at each coordinate with its paired item.
    ///
    /// # Panics
    ///
    /// Panics if the lists differ in length or any coordinate holds no item.
    /// The store is left untouched in both cases.
    #[track_caller]
    pub fn update_items(&mut self, coordinates: &[Coordinate], items: Vec<T>) {
        if coordinates.len() != items.len() {
            contract_violation(ContractViolation::length_mismatch(
                "update_items",
                coordinates.len(),
                items.len(),
            ));
        }
        if let Some(missing) = coordinates.iter().find(|&&c| self.item(c).is_none()) {
            contract_violation(ContractViolation::missing_item(missing.section(), missing.item()));
        }
        for (&coordinate, item) in coordinates.iter().zip(items) {
            self.update_item(coordinate, item);
        }
    }

    /// Replaces whole sections.
    ///
    /// For each pair, an index equal to the current section count appends
    /// the list as a new section; a smaller index replaces that section.
    ///
    /// # Panics
    ///
    /// Panics if the lists differ in length or an index is past the current
    /// section count when its pair is applied.
    #[track_caller]
    pub fn replace_sections(&mut self, sections: &[usize], item_lists: Vec<Vec<T>>) {
        replace_positional(
            &mut self.sections,
            sections,
            item_lists,
            "replace_sections",
            ContractViolation::section_out_of_bounds,
        );
    }

    /// Replaces supplementary containers, appending when an index equals the
    /// current container count.
    ///
    /// # Panics
    ///
    /// Panics if the lists differ in length or an index is past the current
    /// container count when its pair is applied.
    #[track_caller]
    pub fn replace_supplementary(&mut self, sections: &[usize], containers: Vec<S>) {
        replace_positional(
            &mut self.supplementary,
            sections,
            containers,
            "replace_supplementary",
            |index, len| ContractViolation::IndexOutOfBounds { index, len },
        );
    }

    /// Replaces item sections, then supplementary containers.
    ///
    /// The two index lists are independent of each other.
    ///
    /// # Panics
    ///
    /// Panics unless each index list matches its value list in length, before
    /// anything is modified.
    #[track_caller]
    pub fn update_combined(
        &mut self,
        item_sections: &[usize],
        item_lists: Vec<Vec<T>>,
        supplementary_sections: &[usize],
        containers: Vec<S>,
    ) {
        if item_sections.len() != item_lists.len() {
            contract_violation(ContractViolation::length_mismatch(
                "update_combined",
                item_sections.len(),
                item_lists.len(),
            ));
        }
        if supplementary_sections.len() != containers.len() {
            contract_violation(ContractViolation::length_mismatch(
                "update_combined",
                supplementary_sections.len(),
                containers.len(),
            ));
        }
        self.replace_sections(item_sections, item_lists);
        self.replace_supplementary(supplementary_sections, containers);
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Deletes the items at `coordinates` and returns the sections that were
    /// removed because every one of their items was targeted.
    ///
    /// Coordinates are grouped by section and sections are processed from
    /// the highest index down, so the returned indices are descending and
    /// each refers to the store as it was before the call. Repeated
    /// coordinates count once.
    ///
    /// # Panics
    ///
    /// Panics if a coordinate names a missing section or item. The store is
    /// left untouched in that case.
    #[track_caller]
    pub fn delete_items(&mut self, coordinates: &[Coordinate]) -> Vec<usize> {
        let mut grouped: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for coordinate in coordinates {
            grouped
                .entry(coordinate.section())
                .or_default()
                .push(coordinate.item());
        }

        for (&section, doomed) in grouped.iter_mut() {
            self.check_section(section);
            doomed.sort_unstable();
            doomed.dedup();
            let len = self.sections[section].len();
            if let Some(&item) = doomed.last().filter(|&&item| item >= len) {
                contract_violation(ContractViolation::ItemOutOfBounds { section, item, len });
            }
        }

        let mut emptied = Vec::new();
        for (section, doomed) in grouped.into_iter().rev() {
            if doomed.len() == self.sections[section].len() {
                self.sections.remove(section);
                emptied.push(section);
            } else {
                remove_at_indices(&mut self.sections[section], &doomed);
            }
        }

        tracing::trace!(
            target: targets::MODEL,
            count = coordinates.len(),
            emptied = emptied.len(),
            "delete items"
        );
        emptied
    }

    /// Deletes the supplementary containers at `sections`. Repeated indices
    /// remove one container.
    ///
    /// # Panics
    ///
    /// Panics if an index is past the last container.
    #[track_caller]
    pub fn delete_supplementary(&mut self, sections: &[usize]) {
        remove_at_indices(&mut self.supplementary, sections);
    }

    /// Deletes whole item sections. Supplementary containers are untouched.
    ///
    /// # Panics
    ///
    /// Panics if any section does not exist.
    #[track_caller]
    pub fn delete_sections(&mut self, sections: &[usize]) {
        for &section in sections {
            self.check_section(section);
        }
        tracing::trace!(target: targets::MODEL, count = sections.len(), "delete sections");
        remove_at_indices(&mut self.sections, sections);
    }

    // =========================================================================
    // Overwrite
    // =========================================================================

    /// Replaces both axes wholesale.
    pub fn replace_all(&mut self, sections: Vec<Vec<T>>, supplementary: Vec<S>) {
        tracing::trace!(
            target: targets::MODEL,
            sections = sections.len(),
            supplementary = supplementary.len(),
            "replace all"
        );
        self.sections = sections;
        self.supplementary = supplementary;
    }

    #[track_caller]
    fn check_section(&self, section: usize) {
        if section >= self.sections.len() {
            contract_violation(ContractViolation::section_out_of_bounds(
                section,
                self.sections.len(),
            ));
        }
    }
}

impl<T, S: SupplementaryContainer> SectionedStore<T, S> {
    /// Clears the store.
    ///
    /// With `keeping_structure`, every section is emptied in place and every
    /// supplementary container becomes [`SupplementaryContainer::empty`], so
    /// both counts are unchanged. Without it, both axes drop to zero length.
    pub fn reset(&mut self, keeping_structure: bool) {
        if keeping_structure {
            self.sections.iter_mut().for_each(Vec::clear);
            self.supplementary.iter_mut().for_each(|c| *c = S::empty());
        } else {
            self.sections.clear();
            self.supplementary.clear();
        }
        tracing::trace!(target: targets::MODEL, keeping_structure, "reset");
    }
}

/// Replace-or-append over one positional axis.
#[track_caller]
fn replace_positional<V>(
    axis: &mut Vec<V>,
    indices: &[usize],
    values: Vec<V>,
    operation: &'static str,
    out_of_bounds: impl Fn(usize, usize) -> ContractViolation,
) {
    if indices.len() != values.len() {
        contract_violation(ContractViolation::length_mismatch(
            operation,
            indices.len(),
            values.len(),
        ));
    }

    let mut len = axis.len();
    for &index in indices {
        match index.cmp(&len) {
            std::cmp::Ordering::Less => {}
            std::cmp::Ordering::Equal => len += 1,
            std::cmp::Ordering::Greater => {
                contract_violation(out_of_bounds(index, len))
            }
        }
    }

    for (&index, value) in indices.iter().zip(values) {
        if index == axis.len() {
            axis.push(value);
        } else {
            axis[index] = value;
        }
    }
}
