//! List view state: filter + search + one-shot message over the latest
//! aggregated snapshots.
//!
//! The rendered state is always re-derived from the current value of each
//! input by the pure [`compose`] function — there is no mutable cached list
//! to go stale when inputs change out of order. [`ListSession`] just holds
//! the latest inputs and re-runs the combine on every read.

use crate::model::{WarrantyFilter, WarrantyStatus};
use crate::observe::WarrantySnapshot;
use serde::Serialize;

/// Everything the presentation layer needs to render the list.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ListState {
    pub items: Vec<WarrantySnapshot>,
    pub filter: WarrantyFilter,
    pub query: String,
    /// One-shot status line ("Warranty removed", "Imported 3 warranties").
    /// Shown once, then cleared by an explicit consume — never by a timer.
    pub message: Option<String>,
}

/// Derive the view state from the latest value of each input.
///
/// Filter and search apply as a logical AND, filter first. A blank
/// (all-whitespace) query passes everything; otherwise the trimmed query
/// matches case-insensitively as a substring of `name`, `category`, or
/// `store`, with absent fields skipped.
#[must_use]
pub fn compose(
    snapshots: &[WarrantySnapshot],
    filter: WarrantyFilter,
    query: &str,
    message: Option<&str>,
) -> ListState {
    let normalized = query.trim().to_lowercase();

    let items = snapshots
        .iter()
        .filter(|snapshot| matches_filter(snapshot, filter))
        .filter(|snapshot| matches_query(snapshot, &normalized))
        .cloned()
        .collect();

    ListState {
        items,
        filter,
        query: query.to_string(),
        message: message.map(str::to_string),
    }
}

fn matches_filter(snapshot: &WarrantySnapshot, filter: WarrantyFilter) -> bool {
    match filter {
        WarrantyFilter::All => true,
        WarrantyFilter::Active => snapshot.status == WarrantyStatus::Active,
        WarrantyFilter::ExpiringSoon => snapshot.status == WarrantyStatus::ExpiringSoon,
        WarrantyFilter::Expired => snapshot.status == WarrantyStatus::Expired,
    }
}

fn matches_query(snapshot: &WarrantySnapshot, normalized: &str) -> bool {
    if normalized.is_empty() {
        return true;
    }

    let item = &snapshot.item;
    [Some(item.name.as_str()), item.category.as_deref(), item.store.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(normalized))
}

/// Owner of the four list inputs. Single-writer: the caller updates inputs
/// through the setters and reads the derived state back with [`state`].
///
/// [`state`]: ListSession::state
#[derive(Debug, Default)]
pub struct ListSession {
    snapshots: Vec<WarrantySnapshot>,
    filter: WarrantyFilter,
    query: String,
    message: Option<String>,
}

impl ListSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot input with a fresh aggregation pass.
    pub fn on_snapshots(&mut self, snapshots: Vec<WarrantySnapshot>) {
        self.snapshots = snapshots;
    }

    pub fn set_filter(&mut self, filter: WarrantyFilter) {
        self.filter = filter;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Queue a one-shot message for the next render.
    pub fn push_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Read-and-clear the one-shot message after it has been shown.
    pub fn consume_message(&mut self) -> Option<String> {
        self.message.take()
    }

    /// Re-derive the full view state from the current inputs.
    #[must_use]
    pub fn state(&self) -> ListState {
        compose(
            &self.snapshots,
            self.filter,
            &self.query,
            self.message.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{ListSession, compose};
    use crate::model::{WarrantyFilter, WarrantyItem};
    use crate::observe::aggregate;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshots() -> Vec<crate::observe::WarrantySnapshot> {
        let today = date(2024, 8, 1);
        let mut laptop = WarrantyItem::new("Laptop", date(2024, 1, 1));
        laptop.expiration_date = Some(date(2025, 1, 1));
        laptop.category = Some("Electronics".into());

        let mut camera = WarrantyItem::new("Camera", date(2024, 7, 1));
        camera.expiration_date = Some(date(2024, 8, 15));
        camera.store = Some("FotoMart".into());

        let mut headphones = WarrantyItem::new("Headphones", date(2023, 1, 1));
        headphones.expiration_date = Some(date(2024, 7, 1));

        aggregate(&[laptop, camera, headphones], today)
    }

    #[test]
    fn all_filter_blank_query_is_identity() {
        let input = snapshots();
        let state = compose(&input, WarrantyFilter::All, "", None);
        assert_eq!(state.items, input);
    }

    #[test]
    fn status_filters_pass_only_matching_snapshots() {
        let input = snapshots();

        let expired = compose(&input, WarrantyFilter::Expired, "", None);
        assert_eq!(expired.items.len(), 1);
        assert_eq!(expired.items[0].item.name, "Headphones");

        let soon = compose(&input, WarrantyFilter::ExpiringSoon, "", None);
        assert_eq!(soon.items.len(), 1);
        assert_eq!(soon.items[0].item.name, "Camera");
    }

    #[test]
    fn search_matches_name_category_and_store_case_insensitively() {
        let input = snapshots();

        let by_name = compose(&input, WarrantyFilter::All, "LAPTOP", None);
        assert_eq!(by_name.items.len(), 1);

        let by_category = compose(&input, WarrantyFilter::All, "electron", None);
        assert_eq!(by_category.items.len(), 1);
        assert_eq!(by_category.items[0].item.name, "Laptop");

        let by_store = compose(&input, WarrantyFilter::All, "fotomart", None);
        assert_eq!(by_store.items.len(), 1);
        assert_eq!(by_store.items[0].item.name, "Camera");
    }

    #[test]
    fn whitespace_query_passes_everything() {
        let input = snapshots();
        let state = compose(&input, WarrantyFilter::All, "   ", None);
        assert_eq!(state.items.len(), input.len());
    }

    #[test]
    fn filter_and_search_compose_as_and() {
        let input = snapshots();
        // Camera is expiring soon; searching for it under the Expired filter
        // must find nothing.
        let state = compose(&input, WarrantyFilter::Expired, "camera", None);
        assert!(state.items.is_empty());
    }

    #[test]
    fn absent_fields_are_skipped_not_matched() {
        let input = snapshots();
        // Headphones has no category/store; a query hitting only those
        // fields of other items must not pull it in.
        let state = compose(&input, WarrantyFilter::All, "fotomart", None);
        assert!(state.items.iter().all(|s| s.item.name != "Headphones"));
    }

    #[test]
    fn session_rederives_on_every_input_change() {
        let mut session = ListSession::new();
        session.on_snapshots(snapshots());
        assert_eq!(session.state().items.len(), 3);

        session.set_filter(WarrantyFilter::ExpiringSoon);
        assert_eq!(session.state().items.len(), 1);

        session.set_query("laptop");
        assert!(session.state().items.is_empty());

        session.set_filter(WarrantyFilter::All);
        assert_eq!(session.state().items.len(), 1);
    }

    #[test]
    fn message_is_one_shot() {
        let mut session = ListSession::new();
        session.push_message("Warranty removed");
        assert_eq!(session.state().message.as_deref(), Some("Warranty removed"));

        assert_eq!(session.consume_message().as_deref(), Some("Warranty removed"));
        assert_eq!(session.state().message, None);
        assert_eq!(session.consume_message(), None);
    }
}
