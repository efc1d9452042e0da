//! Table presentation engine
//!
//! Owns the records of one fetch cycle plus the view state (search term,
//! sort, page). Every read recomputes sort → filter → paginate from that
//! state, so the output is a pure function of it.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use duedash_domain::constants::PAGE_SIZE;
use duedash_domain::{AssignmentPriority, AssignmentRecord, AssignmentStatus, SortDirection, SortKey};
use serde::Serialize;

/// Records plus view state for one dashboard session
#[derive(Debug, Clone, Default)]
pub struct AssignmentTable {
    records: Vec<AssignmentRecord>,
    search_term: String,
    sort_key: SortKey,
    sort_direction: SortDirection,
    current_page: usize,
}

/// One rendered page and its pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage<'a> {
    pub rows: Vec<&'a AssignmentRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based index of the first row shown, 0 when nothing matches.
    pub first_item: usize,
    pub last_item: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub search_term: &'a str,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

impl AssignmentTable {
    pub fn new(records: Vec<AssignmentRecord>) -> Self {
        Self { records, current_page: 1, ..Self::default() }
    }

    pub fn records(&self) -> &[AssignmentRecord] {
        &self.records
    }

    /// Swap in the records of a new fetch cycle. View state is kept, the
    /// page is clamped to the new result set.
    pub fn replace_records(&mut self, records: Vec<AssignmentRecord>) {
        self.records = records;
        self.clamp_page();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub const fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub const fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn current_page(&self) -> usize {
        self.current_page.max(1)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.clamp_page();
    }

    /// Header click: same key flips direction, a new key starts ascending.
    ///
    /// `SortKey::None` is not a header and leaves the state untouched.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if key == SortKey::None {
            return;
        }

        self.sort_direction = if self.sort_key == key {
            self.sort_direction.toggled()
        } else {
            SortDirection::Asc
        };
        self.sort_key = key;
    }

    /// Advance one page; returns false at the last page.
    pub fn next_page(&mut self) -> bool {
        if self.current_page() >= self.total_pages() {
            return false;
        }
        self.current_page = self.current_page() + 1;
        true
    }

    /// Go back one page; returns false at the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.current_page() <= 1 {
            return false;
        }
        self.current_page = self.current_page() - 1;
        true
    }

    /// Sorted then filtered records, across all pages.
    pub fn visible(&self) -> Vec<&AssignmentRecord> {
        let mut rows: Vec<&AssignmentRecord> = self.records.iter().collect();

        if self.sort_key != SortKey::None {
            // `sort_by` is stable: equal keys keep their prior order.
            rows.sort_by(|a, b| compare_records(a, b, self.sort_key, self.sort_direction));
        }

        let needle = self.search_term.to_lowercase();
        rows.retain(|record| matches_search(record, &needle));
        rows
    }

    /// `ceil(matching / PAGE_SIZE)`, never below 1.
    pub fn total_pages(&self) -> usize {
        page_count(self.visible().len())
    }

    pub fn page(&self) -> TablePage<'_> {
        let visible = self.visible();
        let total_items = visible.len();
        let total_pages = page_count(total_items);
        let page = self.current_page().min(total_pages);

        let start = (page - 1) * PAGE_SIZE;
        let rows: Vec<&AssignmentRecord> = visible.into_iter().skip(start).take(PAGE_SIZE).collect();
        let first_item = if rows.is_empty() { 0 } else { start + 1 };
        let last_item = start + rows.len();

        TablePage {
            rows,
            page,
            total_pages,
            total_items,
            first_item,
            last_item,
            has_previous: page > 1,
            has_next: page < total_pages,
            search_term: &self.search_term,
            sort_key: self.sort_key,
            sort_direction: self.sort_direction,
        }
    }

    fn clamp_page(&mut self) {
        self.current_page = self.current_page().min(self.total_pages());
    }
}

fn page_count(items: usize) -> usize {
    items.div_ceil(PAGE_SIZE).max(1)
}

/// Case-insensitive substring match on title, description or subject.
/// `needle` must already be lowercase.
fn matches_search(record: &AssignmentRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let hit = |text: &str| text.to_lowercase().contains(needle);

    record.title.as_deref().is_some_and(hit)
        || record.description.as_deref().is_some_and(hit)
        || hit(&record.subject)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Text(&'a str),
    Instant(DateTime<Utc>),
    Status(AssignmentStatus),
    Priority(AssignmentPriority),
}

fn sort_value(record: &AssignmentRecord, key: SortKey) -> Option<SortValue<'_>> {
    match key {
        SortKey::None => None,
        SortKey::Title => record.title.as_deref().map(SortValue::Text),
        SortKey::Subject => Some(SortValue::Text(&record.subject)),
        SortKey::DueDate => Some(SortValue::Instant(record.due_date.instant)),
        SortKey::Status => Some(SortValue::Status(record.status)),
        SortKey::Priority => Some(SortValue::Priority(record.priority)),
    }
}

/// Missing values sort last in both directions.
fn compare_records(
    a: &AssignmentRecord,
    b: &AssignmentRecord,
    key: SortKey,
    direction: SortDirection,
) -> Ordering {
    match (sort_value(a, key), sort_value(b, key)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => match direction {
            SortDirection::Asc => left.cmp(&right),
            SortDirection::Desc => right.cmp(&left),
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use duedash_domain::DueDate;

    use super::*;

    fn record(id: &str, title: Option<&str>, subject: &str, due_in_days: i64) -> AssignmentRecord {
        let base = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        let instant = base + Duration::days(due_in_days);
        AssignmentRecord {
            id: id.to_string(),
            title: title.map(str::to_string),
            description: None,
            due_date: DueDate {
                date_time: instant.to_rfc3339(),
                time_zone: "UTC".to_string(),
                instant,
            },
            status: AssignmentStatus::Pending,
            priority: AssignmentPriority::Low,
            subject: subject.to_string(),
        }
    }

    fn ids(rows: &[&AssignmentRecord]) -> Vec<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn new_table_starts_unsorted_on_page_one() {
        let table = AssignmentTable::new(vec![record("b", Some("B"), "S", 1), record("a", Some("A"), "S", 2)]);
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.sort_key(), SortKey::None);
        assert_eq!(ids(&table.visible()), vec!["b", "a"]);
    }

    #[test]
    fn toggle_rule() {
        let mut table = AssignmentTable::new(Vec::new());
        table.toggle_sort(SortKey::Title);
        assert_eq!((table.sort_key(), table.sort_direction()), (SortKey::Title, SortDirection::Asc));
        table.toggle_sort(SortKey::Title);
        assert_eq!(table.sort_direction(), SortDirection::Desc);
        table.toggle_sort(SortKey::Title);
        assert_eq!(table.sort_direction(), SortDirection::Asc);

        table.toggle_sort(SortKey::Title);
        table.toggle_sort(SortKey::Subject);
        assert_eq!((table.sort_key(), table.sort_direction()), (SortKey::Subject, SortDirection::Asc));

        table.toggle_sort(SortKey::None);
        assert_eq!(table.sort_key(), SortKey::Subject);
    }

    #[test]
    fn missing_titles_sort_last_both_ways() {
        let mut table = AssignmentTable::new(vec![
            record("untitled", None, "S", 1),
            record("b", Some("Beta"), "S", 1),
            record("a", Some("Alpha"), "S", 1),
        ]);

        table.toggle_sort(SortKey::Title);
        assert_eq!(ids(&table.visible()), vec!["a", "b", "untitled"]);
        table.toggle_sort(SortKey::Title);
        assert_eq!(ids(&table.visible()), vec!["b", "a", "untitled"]);
    }

    #[test]
    fn due_date_sorts_by_instant_not_text() {
        let mut early = record("early", Some("x"), "S", 0);
        early.due_date.date_time = "2026-10-19".to_string();
        let mut late = record("late", Some("x"), "S", 3);
        late.due_date.date_time = "2026-10-22T00:00:00+00:00".to_string();
        let mut offset = record("offset", Some("x"), "S", 1);
        // Text sorts first, instant sits in the middle.
        offset.due_date.date_time = "2026-10-19T20:00:00-04:00".to_string();

        let mut table = AssignmentTable::new(vec![late, offset, early]);
        table.toggle_sort(SortKey::DueDate);
        assert_eq!(ids(&table.visible()), vec!["early", "offset", "late"]);
    }

    #[test]
    fn unmatched_search_gives_one_empty_page() {
        let mut table = AssignmentTable::new(vec![record("a", Some("Essay"), "English", 1)]);
        table.set_search_term("zzz");
        let page = table.page();
        assert!(page.rows.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert_eq!((page.first_item, page.last_item), (0, 0));
        assert!(!page.has_next && !page.has_previous);
    }

    #[test]
    fn search_clamps_current_page() {
        let records = (0..25)
            .map(|i| record(&format!("r{i}"), Some(format!("Task {i}").as_str()), "S", i))
            .collect();
        let mut table = AssignmentTable::new(records);
        assert!(table.next_page());
        assert!(table.next_page());
        assert_eq!(table.current_page(), 3);

        table.set_search_term("Task 1");
        // "Task 1" and "Task 10".."Task 19": 11 rows, 2 pages.
        assert_eq!(table.total_pages(), 2);
        assert_eq!(table.current_page(), 2);
        assert_eq!(table.page().rows.len(), 1);
    }

    #[test]
    fn previous_is_noop_on_first_page() {
        let mut table = AssignmentTable::new(vec![record("a", Some("A"), "S", 1)]);
        assert!(!table.previous_page());
        assert!(!table.next_page());
        assert_eq!(table.current_page(), 1);
    }
}
