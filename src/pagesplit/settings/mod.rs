//! # Page Split Settings
//!
//! [`Settings`] holds the per-page overrides of the page-split stage: an optional
//! layout type and optional computed [`Params`](crate::model::Params) for every
//! image, layered over one default layout type shared by the whole project.
//!
//! ## Update Protocol
//!
//! Changes are described by an [`UpdateAction`], which says for each of the two
//! fields whether to set it, clear it, or leave it alone. Applying an action
//! produces a prospective [`Record`], which is then checked against the conflict
//! rule before it is committed:
//!
//! - [`Settings::update_page`] resolves a conflict by dropping the page's params
//!   (the layout type wins).
//! - [`Settings::conditional_update`] rejects a conflicting update and leaves the
//!   page as it was.
//! - [`Settings::set_layout_type_for_all_pages`] drops every record whose params
//!   cannot live with the new default.
//!
//! A record that ends up with neither field set is removed from the map, so the
//! map only ever contains pages that carry data.
//!
//! ## Concurrency
//!
//! One mutex guards the map and the default together. Every public method holds
//! it for its whole duration, including the find-then-modify sequences, and hands
//! out copies rather than references. `Settings` is meant to be shared as
//! `Arc<Settings>` between the UI thread and pipeline workers.

use crate::model::{ImageId, LayoutType, PageId};
use crate::relink::{RelinkablePath, Relinker};
use log::{debug, info, warn};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod action;
pub mod record;

pub use action::{FieldAction, UpdateAction};
pub use record::{BaseRecord, Record};

/// Outcome of [`Settings::conditional_update`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalUpdate {
    /// The page's record after the call. Unchanged if `conflict` is set.
    pub record: Record,
    /// The update would have contradicted the page's params and was not applied.
    pub conflict: bool,
}

/// What [`Settings::perform_relinking`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelinkSummary {
    /// Records now stored under a different identity.
    pub moved: usize,
    /// Records dropped because another page took their new identity.
    pub dropped: usize,
}

/// Outcome of [`Settings::update_page`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUpdate {
    /// The page's record as committed.
    pub record: Record,
    /// The page's params contradicted the resulting layout type and were dropped.
    pub params_dropped: bool,
}

#[derive(Debug)]
struct Inner {
    per_page_records: BTreeMap<ImageId, BaseRecord>,
    default_layout_type: LayoutType,
}

impl Inner {
    fn new() -> Self {
        Self {
            per_page_records: BTreeMap::new(),
            default_layout_type: LayoutType::Auto,
        }
    }

    fn page_record(&self, image_id: &ImageId) -> Record {
        match self.per_page_records.get(image_id) {
            Some(base) => Record::from_base(base.clone(), self.default_layout_type),
            None => Record::new(self.default_layout_type),
        }
    }

    fn prospective_record(&self, image_id: &ImageId, action: &UpdateAction) -> Record {
        let mut record = self.page_record(image_id);
        record.update(action);
        record
    }

    /// Stores `record`, or removes the page if it is null. Returns what the page
    /// now reads as.
    fn commit(&mut self, image_id: &ImageId, record: Record) -> Record {
        if record.is_null() {
            self.per_page_records.remove(image_id);
            Record::new(self.default_layout_type)
        } else {
            self.per_page_records.insert(image_id.clone(), record.base().clone());
            record
        }
    }

    fn update_page(&mut self, image_id: &ImageId, action: &UpdateAction) -> ResolvedUpdate {
        let mut record = self.prospective_record(image_id, action);
        let params_dropped = record.has_layout_type_conflict();
        if params_dropped {
            debug!(
                "dropping params of {}: they do not fit layout type {}",
                image_id,
                record.combined_layout_type()
            );
            record.clear_params();
        }
        ResolvedUpdate {
            record: self.commit(image_id, record),
            params_dropped,
        }
    }
}

/// Thread-safe store of per-page page-split overrides.
#[derive(Debug)]
pub struct Settings {
    inner: Mutex<Inner>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// An empty store with the `Auto` default.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::new()),
        }
    }

    // Critical sections never leave the map half-updated, so the data behind a
    // poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forgets every page and resets the default to `Auto`.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.per_page_records.clear();
        inner.default_layout_type = LayoutType::Auto;
    }

    pub fn default_layout_type(&self) -> LayoutType {
        self.lock().default_layout_type
    }

    /// The page's record resolved against the current default. Pages without
    /// stored data get an empty record.
    pub fn get_page_record(&self, image_id: &ImageId) -> Record {
        self.lock().page_record(image_id)
    }

    /// Number of pages carrying data.
    pub fn len(&self) -> usize {
        self.lock().per_page_records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().per_page_records.is_empty()
    }

    pub fn contains_page(&self, image_id: &ImageId) -> bool {
        self.lock().per_page_records.contains_key(image_id)
    }

    /// A snapshot of every stored record, ordered by page.
    pub fn records(&self) -> Vec<(ImageId, BaseRecord)> {
        self.snapshot().1
    }

    /// The default layout type and every stored record, read under one lock.
    pub fn snapshot(&self) -> (LayoutType, Vec<(ImageId, BaseRecord)>) {
        let inner = self.lock();
        let records = inner
            .per_page_records
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect();
        (inner.default_layout_type, records)
    }

    /// Replaces the whole state at once.
    ///
    /// Incoming records go through the same conflict rule as updates: params
    /// that contradict the page's effective layout type are dropped, and records
    /// left null are skipped.
    pub fn restore<I>(&self, default_layout_type: LayoutType, records: I)
    where
        I: IntoIterator<Item = (ImageId, BaseRecord)>,
    {
        let mut per_page_records = BTreeMap::new();
        for (image_id, base) in records {
            let mut record = Record::from_base(base, default_layout_type);
            if record.has_layout_type_conflict() {
                warn!(
                    "{}: stored params do not fit layout type {}, dropping them",
                    image_id,
                    record.combined_layout_type()
                );
                record.clear_params();
            }
            if !record.is_null() {
                per_page_records.insert(image_id, record.base().clone());
            }
        }

        let mut inner = self.lock();
        inner.per_page_records = per_page_records;
        inner.default_layout_type = default_layout_type;
    }

    /// Makes `layout_type` the default for every page.
    ///
    /// Explicit overrides are cleared so pages inherit the new default. Records
    /// whose params contradict it are removed entirely. Returns the number of
    /// records removed for that reason.
    pub fn set_layout_type_for_all_pages(&self, layout_type: LayoutType) -> usize {
        let mut inner = self.lock();
        let mut conflicting = 0;

        inner.per_page_records.retain(|image_id, record| {
            if record.has_layout_type_conflict(layout_type) {
                debug!("removing {}: params do not fit {}", image_id, layout_type);
                conflicting += 1;
                return false;
            }
            record.clear_layout_type();
            !record.is_null()
        });
        inner.default_layout_type = layout_type;

        info!(
            "default layout type set to {} ({} conflicting records removed)",
            layout_type, conflicting
        );
        conflicting
    }

    /// Overrides the layout type of the images behind `pages`, dropping params
    /// that no longer fit.
    pub fn set_layout_type_for(&self, layout_type: LayoutType, pages: &BTreeSet<PageId>) {
        let action = UpdateAction::new().set_layout_type(layout_type);
        let mut inner = self.lock();
        for page in pages {
            inner.update_page(page.image_id(), &action);
        }
    }

    /// Applies `action` to one page. A conflict is resolved by dropping the
    /// page's params, which the returned outcome reports.
    pub fn update_page(&self, image_id: &ImageId, action: &UpdateAction) -> ResolvedUpdate {
        self.lock().update_page(image_id, action)
    }

    /// Applies `action` to several pages under one lock, returning one outcome
    /// per page in input order.
    pub fn update_pages<'a, I>(&self, image_ids: I, action: &UpdateAction) -> Vec<ResolvedUpdate>
    where
        I: IntoIterator<Item = &'a ImageId>,
    {
        let mut inner = self.lock();
        image_ids
            .into_iter()
            .map(|image_id| inner.update_page(image_id, action))
            .collect()
    }

    /// Applies `action` to one page unless the result would conflict.
    ///
    /// On conflict nothing changes and the previous record is returned.
    pub fn conditional_update(
        &self,
        image_id: &ImageId,
        action: &UpdateAction,
    ) -> ConditionalUpdate {
        let mut inner = self.lock();
        let record = inner.prospective_record(image_id, action);

        if record.has_layout_type_conflict() {
            debug!(
                "rejecting update of {}: layout type {} conflicts with its params",
                image_id,
                record.combined_layout_type()
            );
            return ConditionalUpdate {
                record: inner.page_record(image_id),
                conflict: true,
            };
        }

        ConditionalUpdate {
            record: inner.commit(image_id, record),
            conflict: false,
        }
    }

    /// Rewrites the file path of every stored page through `relinker`.
    ///
    /// Records are carried over untouched. If two pages end up with the same
    /// identity, the one that sorted first is kept.
    pub fn perform_relinking(&self, relinker: &dyn Relinker) -> RelinkSummary {
        let mut inner = self.lock();
        let mut relinked = BTreeMap::new();
        let mut summary = RelinkSummary::default();

        for (image_id, record) in &inner.per_page_records {
            let old_path = RelinkablePath::file(image_id.file_path());
            let mut new_id = image_id.clone();
            new_id.set_file_path(relinker.substitution_path_for(&old_path));
            let changed = new_id != *image_id;

            match relinked.entry(new_id) {
                Entry::Vacant(slot) => {
                    slot.insert(record.clone());
                    if changed {
                        summary.moved += 1;
                    }
                }
                Entry::Occupied(slot) => {
                    summary.dropped += 1;
                    warn!(
                        "relinking {} collides with {}, dropping its record",
                        image_id,
                        slot.key()
                    );
                }
            }
        }

        inner.per_page_records = relinked;
        summary
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{
        AutoManualMode, Dependencies, PageLayout, PageLayoutShape, Params, Point, Rect, Rotation,
        Segment, Size,
    };

    /// Params of the given shape over a 2000x1400 scan.
    pub fn params_for(shape: PageLayoutShape) -> Params {
        let outline = Rect {
            x: 0.0,
            y: 0.0,
            width: 2000.0,
            height: 1400.0,
        };
        let vertical = |x: f64| Segment {
            from: Point { x, y: 0.0 },
            to: Point { x, y: 1400.0 },
        };
        let layout = match shape {
            PageLayoutShape::SinglePageUncut => PageLayout::single_page_uncut(outline),
            PageLayoutShape::SinglePageCut => {
                PageLayout::single_page_cut(outline, vertical(80.0), vertical(1900.0))
            }
            PageLayoutShape::TwoPages => PageLayout::two_pages(outline, vertical(1000.0)),
        };
        let dependencies = Dependencies::new(
            Size {
                width: 2000,
                height: 1400,
            },
            Rotation::None,
            LayoutType::Auto,
        );
        Params::new(layout, dependencies, AutoManualMode::Auto)
    }

    pub fn page(name: &str) -> ImageId {
        ImageId::new(format!("/scans/{}.tif", name), 0)
    }

    pub struct SettingsFixture {
        pub settings: Settings,
    }

    impl Default for SettingsFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SettingsFixture {
        pub fn new() -> Self {
            Self {
                settings: Settings::new(),
            }
        }

        pub fn with_params(self, name: &str, shape: PageLayoutShape) -> Self {
            self.settings.update_page(
                &page(name),
                &UpdateAction::new().set_params(params_for(shape)),
            );
            self
        }

        pub fn with_layout_type(self, name: &str, layout_type: LayoutType) -> Self {
            self.settings.update_page(
                &page(name),
                &UpdateAction::new().set_layout_type(layout_type),
            );
            self
        }

        pub fn with_default(self, layout_type: LayoutType) -> Self {
            self.settings.set_layout_type_for_all_pages(layout_type);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{page, params_for, SettingsFixture};
    use super::*;
    use crate::model::{PageLayoutShape, SubPage};
    use crate::relink::PathMapRelinker;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn new_store_is_empty_with_auto_default() {
        let settings = Settings::new();
        assert!(settings.is_empty());
        assert_eq!(settings.default_layout_type(), LayoutType::Auto);
    }

    #[test]
    fn missing_page_yields_empty_record() {
        let settings = SettingsFixture::new()
            .with_default(LayoutType::TwoPages)
            .settings;
        let record = settings.get_page_record(&page("missing"));
        assert!(record.is_null());
        assert_eq!(record.combined_layout_type(), LayoutType::TwoPages);
        // Reading does not create entries.
        assert!(!settings.contains_page(&page("missing")));
    }

    #[test]
    fn clear_resets_everything() {
        let settings = SettingsFixture::new()
            .with_params("a", PageLayoutShape::TwoPages)
            .with_default(LayoutType::TwoPages)
            .settings;
        settings.clear();
        assert!(settings.is_empty());
        assert_eq!(settings.default_layout_type(), LayoutType::Auto);
    }

    #[test]
    fn set_params_then_conflicting_layout_type_drops_params() {
        let settings = Settings::new();
        let p1 = page("p1");

        let outcome = settings.update_page(
            &p1,
            &UpdateAction::new().set_params(params_for(PageLayoutShape::TwoPages)),
        );
        assert!(!outcome.params_dropped);
        let record = settings.get_page_record(&p1);
        assert_eq!(record, outcome.record);
        assert_eq!(record.combined_layout_type(), LayoutType::Auto);
        assert!(record.params().is_some());

        let outcome = settings.update_page(
            &p1,
            &UpdateAction::new().set_layout_type(LayoutType::SinglePageUncut),
        );
        assert!(outcome.params_dropped);
        let record = settings.get_page_record(&p1);
        assert_eq!(record, outcome.record);
        assert!(record.params().is_none());
        assert_eq!(record.combined_layout_type(), LayoutType::SinglePageUncut);
    }

    #[test]
    fn update_page_that_empties_record_reports_default() {
        let settings = SettingsFixture::new()
            .with_default(LayoutType::TwoPages)
            .with_layout_type("a", LayoutType::PagePlusOffcut)
            .settings;

        let outcome = settings.update_page(&page("a"), &UpdateAction::new().clear_layout_type());
        assert!(!outcome.params_dropped);
        assert!(outcome.record.is_null());
        assert_eq!(outcome.record.combined_layout_type(), LayoutType::TwoPages);
        assert!(settings.is_empty());
    }

    #[test]
    fn compatible_layout_type_keeps_params() {
        let settings = SettingsFixture::new()
            .with_params("a", PageLayoutShape::SinglePageCut)
            .with_layout_type("a", LayoutType::PagePlusOffcut)
            .settings;
        let record = settings.get_page_record(&page("a"));
        assert!(record.params().is_some());
        assert_eq!(record.layout_type(), Some(LayoutType::PagePlusOffcut));
    }

    #[test]
    fn clearing_both_fields_removes_the_record() {
        let settings = SettingsFixture::new()
            .with_params("a", PageLayoutShape::TwoPages)
            .with_layout_type("a", LayoutType::TwoPages)
            .settings;
        assert_eq!(settings.len(), 1);

        settings.update_page(&page("a"), &UpdateAction::new().clear_params());
        assert!(settings.contains_page(&page("a")));

        settings.update_page(&page("a"), &UpdateAction::new().clear_layout_type());
        assert!(!settings.contains_page(&page("a")));
        assert!(settings.is_empty());
    }

    #[test]
    fn conflict_resolution_that_empties_record_removes_it() {
        // Params dropped in favor of an override, then the override cleared.
        let settings = SettingsFixture::new()
            .with_params("a", PageLayoutShape::TwoPages)
            .settings;
        settings.update_page(
            &page("a"),
            &UpdateAction::new()
                .set_layout_type(LayoutType::SinglePageUncut)
                .clear_params(),
        );
        settings.update_page(&page("a"), &UpdateAction::new().clear_layout_type());
        assert!(settings.is_empty());
    }

    #[test]
    fn clearing_absent_page_creates_nothing() {
        let settings = Settings::new();
        settings.update_page(
            &page("a"),
            &UpdateAction::new().clear_params().clear_layout_type(),
        );
        assert!(settings.is_empty());
    }

    #[test]
    fn dont_touch_changes_nothing() {
        let settings = SettingsFixture::new()
            .with_params("a", PageLayoutShape::TwoPages)
            .with_layout_type("b", LayoutType::PagePlusOffcut)
            .settings;
        let before = settings.records();

        for name in ["a", "b", "c"] {
            settings.update_page(&page(name), &UpdateAction::new());
            let outcome = settings.conditional_update(&page(name), &UpdateAction::new());
            assert!(!outcome.conflict);
        }

        assert_eq!(settings.records(), before);
        assert!(!settings.contains_page(&page("c")));
    }

    #[test]
    fn conditional_update_rejects_conflict() {
        let settings = SettingsFixture::new()
            .with_params("a", PageLayoutShape::TwoPages)
            .settings;
        let before = settings.get_page_record(&page("a"));

        let outcome = settings.conditional_update(
            &page("a"),
            &UpdateAction::new().set_layout_type(LayoutType::PagePlusOffcut),
        );
        assert!(outcome.conflict);
        assert_eq!(outcome.record, before);
        assert_eq!(settings.get_page_record(&page("a")), before);
    }

    #[test]
    fn conditional_update_rejects_conflict_on_new_page() {
        let settings = SettingsFixture::new()
            .with_default(LayoutType::SinglePageUncut)
            .settings;

        let outcome = settings.conditional_update(
            &page("a"),
            &UpdateAction::new().set_params(params_for(PageLayoutShape::TwoPages)),
        );
        assert!(outcome.conflict);
        assert!(outcome.record.is_null());
        assert!(settings.is_empty());
    }

    #[test]
    fn conditional_update_applies_compatible_change() {
        let settings = SettingsFixture::new()
            .with_params("a", PageLayoutShape::TwoPages)
            .settings;

        let outcome = settings.conditional_update(
            &page("a"),
            &UpdateAction::new().set_layout_type(LayoutType::TwoPages),
        );
        assert!(!outcome.conflict);
        assert_eq!(outcome.record.layout_type(), Some(LayoutType::TwoPages));
        assert!(outcome.record.params().is_some());
        assert_eq!(settings.get_page_record(&page("a")), outcome.record);
    }

    #[test]
    fn conditional_update_to_null_removes_record() {
        let settings = SettingsFixture::new()
            .with_default(LayoutType::TwoPages)
            .with_layout_type("a", LayoutType::PagePlusOffcut)
            .settings;

        let outcome =
            settings.conditional_update(&page("a"), &UpdateAction::new().clear_layout_type());
        assert!(!outcome.conflict);
        assert!(outcome.record.is_null());
        assert_eq!(outcome.record.combined_layout_type(), LayoutType::TwoPages);
        assert!(settings.is_empty());
    }

    #[test]
    fn set_layout_type_for_all_pages_removes_conflicting_records() {
        let settings = SettingsFixture::new()
            .with_params("two", PageLayoutShape::TwoPages)
            .with_params("single", PageLayoutShape::SinglePageUncut)
            .with_layout_type("override", LayoutType::PagePlusOffcut)
            .settings;

        let removed = settings.set_layout_type_for_all_pages(LayoutType::SinglePageUncut);
        assert_eq!(removed, 1);
        assert_eq!(settings.default_layout_type(), LayoutType::SinglePageUncut);

        // Params for two pages can never fit the new default.
        assert!(!settings.contains_page(&page("two")));

        // Compatible params survive.
        let single = settings.get_page_record(&page("single"));
        assert!(single.params().is_some());
        assert_eq!(single.combined_layout_type(), LayoutType::SinglePageUncut);

        // A bare override is cleared, which leaves nothing to store.
        assert!(!settings.contains_page(&page("override")));
        let record = settings.get_page_record(&page("override"));
        assert_eq!(record.layout_type(), None);
        assert_eq!(record.combined_layout_type(), LayoutType::SinglePageUncut);
    }

    #[test]
    fn set_layout_type_for_all_pages_auto_keeps_all_params() {
        let settings = SettingsFixture::new()
            .with_params("a", PageLayoutShape::TwoPages)
            .with_params("b", PageLayoutShape::SinglePageCut)
            .with_layout_type("b", LayoutType::PagePlusOffcut)
            .settings;

        assert_eq!(settings.set_layout_type_for_all_pages(LayoutType::Auto), 0);
        assert_eq!(settings.len(), 2);
        assert_eq!(settings.get_page_record(&page("b")).layout_type(), None);
    }

    #[test]
    fn set_layout_type_for_selected_pages() {
        let settings = SettingsFixture::new()
            .with_params("a", PageLayoutShape::TwoPages)
            .with_params("b", PageLayoutShape::TwoPages)
            .settings;

        let pages: BTreeSet<PageId> = [
            PageId::new(page("a"), SubPage::LeftPage),
            PageId::new(page("a"), SubPage::RightPage),
            PageId::new(page("c"), SubPage::SinglePage),
        ]
        .into_iter()
        .collect();
        settings.set_layout_type_for(LayoutType::SinglePageUncut, &pages);

        let a = settings.get_page_record(&page("a"));
        assert_eq!(a.layout_type(), Some(LayoutType::SinglePageUncut));
        assert!(a.params().is_none());

        let c = settings.get_page_record(&page("c"));
        assert_eq!(c.layout_type(), Some(LayoutType::SinglePageUncut));

        // Pages not listed are untouched.
        let b = settings.get_page_record(&page("b"));
        assert_eq!(b.layout_type(), None);
        assert!(b.params().is_some());
    }

    #[test]
    fn update_pages_applies_to_each() {
        let settings = Settings::new();
        let ids = [page("a"), page("b")];
        let outcomes = settings.update_pages(
            &ids,
            &UpdateAction::new().set_layout_type(LayoutType::TwoPages),
        );
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes
            .iter()
            .all(|o| o.record.layout_type() == Some(LayoutType::TwoPages)));
        assert_eq!(settings.len(), 2);

        let outcomes = settings.update_pages(&ids, &UpdateAction::new().clear_layout_type());
        assert!(outcomes.iter().all(|o| o.record.is_null()));
        assert!(settings.is_empty());
    }

    #[test]
    fn identity_relinking_preserves_records() {
        let settings = SettingsFixture::new()
            .with_params("a", PageLayoutShape::TwoPages)
            .with_layout_type("b", LayoutType::PagePlusOffcut)
            .settings;
        let before = settings.records();

        let identity = |p: &RelinkablePath| p.path().to_path_buf();
        let summary = settings.perform_relinking(&identity);

        assert_eq!(summary, RelinkSummary::default());
        assert_eq!(settings.records(), before);
    }

    #[test]
    fn relinking_moves_record_to_new_key() {
        let settings = SettingsFixture::new()
            .with_params("a", PageLayoutShape::TwoPages)
            .with_layout_type("b", LayoutType::PagePlusOffcut)
            .settings;
        let record_a = settings.get_page_record(&page("a"));

        let relinker = PathMapRelinker::new().with_mapping("/scans/a.tif", "/moved/a.tif");
        let summary = settings.perform_relinking(&relinker);
        assert_eq!(summary.moved, 1);
        assert_eq!(summary.dropped, 0);

        let moved = ImageId::new(PathBuf::from("/moved/a.tif"), 0);
        assert!(!settings.contains_page(&page("a")));
        assert_eq!(settings.get_page_record(&moved), record_a);
        assert!(settings.contains_page(&page("b")));
        assert_eq!(settings.len(), 2);
    }

    #[test]
    fn relinking_keeps_page_number() {
        let settings = Settings::new();
        let id = ImageId::new("/scans/book.tif", 4);
        settings.update_page(&id, &UpdateAction::new().set_layout_type(LayoutType::TwoPages));

        let relinker = PathMapRelinker::new().with_mapping("/scans", "/archive");
        settings.perform_relinking(&relinker);

        let moved = ImageId::new("/archive/book.tif", 4);
        assert_eq!(
            settings.get_page_record(&moved).layout_type(),
            Some(LayoutType::TwoPages)
        );
    }

    #[test]
    fn relinking_collision_keeps_one_record() {
        let settings = SettingsFixture::new()
            .with_layout_type("a", LayoutType::TwoPages)
            .with_layout_type("b", LayoutType::PagePlusOffcut)
            .settings;

        let collapse = |_: &RelinkablePath| PathBuf::from("/scans/same.tif");
        let summary = settings.perform_relinking(&collapse);

        assert_eq!(summary, RelinkSummary { moved: 1, dropped: 1 });
        assert_eq!(settings.len(), 1);
        // "/scans/a.tif" sorts first and wins.
        assert_eq!(
            settings.get_page_record(&page("same")).layout_type(),
            Some(LayoutType::TwoPages)
        );
    }

    #[test]
    fn restore_skips_null_records() {
        let settings = Settings::new();
        settings.restore(
            LayoutType::TwoPages,
            vec![
                (page("a"), BaseRecord::new(None, Some(LayoutType::TwoPages))),
                (page("b"), BaseRecord::default()),
            ],
        );
        assert_eq!(settings.default_layout_type(), LayoutType::TwoPages);
        assert_eq!(settings.len(), 1);
        assert!(!settings.contains_page(&page("b")));
    }

    #[test]
    fn restore_drops_params_that_conflict_with_override() {
        let settings = Settings::new();
        settings.restore(
            LayoutType::Auto,
            vec![(
                page("a"),
                BaseRecord::new(
                    Some(params_for(PageLayoutShape::TwoPages)),
                    Some(LayoutType::SinglePageUncut),
                ),
            )],
        );

        let stored = settings.get_page_record(&page("a"));
        assert!(stored.params().is_none());
        assert_eq!(stored.layout_type(), Some(LayoutType::SinglePageUncut));
        assert!(!stored.has_layout_type_conflict());

        // An empty action is a no-op on restored state.
        let outcome = settings.conditional_update(&page("a"), &UpdateAction::new());
        assert!(!outcome.conflict);
        settings.update_page(&page("a"), &UpdateAction::new());
        assert_eq!(settings.get_page_record(&page("a")), stored);
    }

    #[test]
    fn restore_drops_records_that_conflict_with_default() {
        let settings = Settings::new();
        settings.restore(
            LayoutType::SinglePageUncut,
            vec![
                (page("a"), BaseRecord::new(Some(params_for(PageLayoutShape::TwoPages)), None)),
                (
                    page("b"),
                    BaseRecord::new(Some(params_for(PageLayoutShape::SinglePageUncut)), None),
                ),
            ],
        );

        // "a" held nothing but conflicting params, so nothing is left of it.
        assert!(!settings.contains_page(&page("a")));
        assert!(settings.get_page_record(&page("b")).params().is_some());
        assert_eq!(settings.len(), 1);
    }

    #[test]
    fn concurrent_updates_are_serialized() {
        let settings = Arc::new(Settings::new());
        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let settings = Arc::clone(&settings);
                thread::spawn(move || {
                    for i in 0..100 {
                        let id = page(&format!("w{}-{}", worker, i));
                        settings.update_page(
                            &id,
                            &UpdateAction::new().set_params(params_for(PageLayoutShape::TwoPages)),
                        );
                        settings.update_page(
                            &id,
                            &UpdateAction::new().set_layout_type(LayoutType::TwoPages),
                        );
                        let record = settings.get_page_record(&id);
                        assert!(record.params().is_some());
                        if i % 2 == 0 {
                            settings.update_page(
                                &id,
                                &UpdateAction::new().clear_params().clear_layout_type(),
                            );
                        }
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(settings.len(), 8 * 50);
        for (_, record) in settings.records() {
            assert!(!record.is_null());
        }
    }

    #[test]
    fn settings_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Settings>();
    }
}
