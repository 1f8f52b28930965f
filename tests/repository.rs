use chrono::{DateTime, TimeZone, Utc};
use pushkind_orders::domain::order::{NewOrder, fields};
use pushkind_orders::filter::FilterBuilder;
use pushkind_orders::pagination::{PageSpec, SortDirection};
use pushkind_orders::repository::{DieselRepository, OrderReader, OrderWriter, QueryExecutor};

mod common;

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap()
}

fn new_order(id: &str, name: &str, created: DateTime<Utc>) -> NewOrder {
    NewOrder {
        id: id.to_string(),
        name: name.to_string(),
        version: 1,
        created,
    }
}

fn seeded_repo(name: &str) -> (common::TestDb, DieselRepository) {
    let test_db = common::TestDb::new(name);
    let repo = DieselRepository::new(test_db.pool());
    for (i, (id, name)) in [
        ("o-1", "Blue widget"),
        ("o-2", "Red widget"),
        ("o-3", "Gadget"),
        ("x-4", "50% off"),
        ("x-5", "Gizmo_v2"),
    ]
    .into_iter()
    .enumerate()
    {
        repo.save_order(&new_order(id, name, day(i as u32 + 1)))
            .unwrap();
    }
    (test_db, repo)
}

fn ids(items: &[pushkind_orders::domain::order::Order]) -> Vec<&str> {
    items.iter().map(|o| o.id.as_str()).collect()
}

#[test]
fn test_save_and_get_order() {
    let test_db = common::TestDb::new("test_save_and_get_order.db");
    let repo = DieselRepository::new(test_db.pool());

    let saved = repo.save_order(&new_order("o-1", "Widget", day(1))).unwrap();
    assert_eq!(saved.id, "o-1");
    assert_eq!(saved.version, 1);
    assert_eq!(saved.created, day(1));

    let found = repo.get_order_by_id("o-1").unwrap().unwrap();
    assert_eq!(found, saved);

    assert!(repo.get_order_by_id("missing").unwrap().is_none());
}

#[test]
fn test_save_existing_order_bumps_version() {
    let test_db = common::TestDb::new("test_save_existing_order.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.save_order(&new_order("o-1", "Widget", day(1))).unwrap();
    let updated = repo
        .save_order(&new_order("o-1", "Renamed", day(9)))
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.version, 2);
    assert_eq!(updated.created, day(1));

    let (total, _) = repo.execute(&FilterBuilder::new().build(PageSpec::default())).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_execute_without_predicates_lists_everything_by_id() {
    let (_db, repo) = seeded_repo("test_execute_all.db");

    let (total, items) = repo
        .execute(&FilterBuilder::new().build(PageSpec::default()))
        .unwrap();

    assert_eq!(total, 5);
    assert_eq!(ids(&items), vec!["o-1", "o-2", "o-3", "x-4", "x-5"]);
}

#[test]
fn test_execute_contains_filters() {
    let (_db, repo) = seeded_repo("test_execute_contains.db");

    let query = FilterBuilder::new()
        .contains(fields::NAME, "widget")
        .build(PageSpec::default());
    let (total, items) = repo.execute(&query).unwrap();
    assert_eq!(total, 2);
    assert_eq!(ids(&items), vec!["o-1", "o-2"]);

    let query = FilterBuilder::new()
        .contains(fields::ID, "x-")
        .contains(fields::NAME, "Giz")
        .build(PageSpec::default());
    let (total, items) = repo.execute(&query).unwrap();
    assert_eq!(total, 1);
    assert_eq!(ids(&items), vec!["x-5"]);
}

#[test]
fn test_execute_contains_treats_wildcards_literally() {
    let (_db, repo) = seeded_repo("test_execute_wildcards.db");

    let query = FilterBuilder::new()
        .contains(fields::NAME, "%")
        .build(PageSpec::default());
    let (total, items) = repo.execute(&query).unwrap();
    assert_eq!(total, 1);
    assert_eq!(ids(&items), vec!["x-4"]);

    let query = FilterBuilder::new()
        .contains(fields::NAME, "_")
        .build(PageSpec::default());
    let (_, items) = repo.execute(&query).unwrap();
    assert_eq!(ids(&items), vec!["x-5"]);
}

#[test]
fn test_execute_contains_is_case_sensitive() {
    let (_db, repo) = seeded_repo("test_execute_case.db");

    let query = FilterBuilder::new()
        .contains(fields::NAME, "WIDGET")
        .build(PageSpec::default());
    let (total, items) = repo.execute(&query).unwrap();
    assert_eq!(total, 0);
    assert!(items.is_empty());

    let query = FilterBuilder::new()
        .contains(fields::NAME, "Blue")
        .build(PageSpec::default());
    let (_, items) = repo.execute(&query).unwrap();
    assert_eq!(ids(&items), vec!["o-1"]);

    let query = FilterBuilder::new()
        .contains(fields::ID, "O-")
        .build(PageSpec::default());
    let (total, _) = repo.execute(&query).unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_execute_equals_filter() {
    let (_db, repo) = seeded_repo("test_execute_equals.db");

    let query = FilterBuilder::new()
        .equals(fields::ID, "o-2")
        .build(PageSpec::default());
    let (total, items) = repo.execute(&query).unwrap();

    assert_eq!(total, 1);
    assert_eq!(items[0].name, "Red widget");
}

#[test]
fn test_execute_created_range() {
    let (_db, repo) = seeded_repo("test_execute_range.db");
    let from = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 1, 4, 12, 0, 0).unwrap();

    let query = FilterBuilder::new()
        .range(fields::CREATED, Some(from), Some(to))
        .build(PageSpec::default());
    let (total, items) = repo.execute(&query).unwrap();
    assert_eq!(total, 3);
    assert_eq!(ids(&items), vec!["o-2", "o-3", "x-4"]);

    let query = FilterBuilder::new()
        .range(fields::CREATED, Some(to), None)
        .build(PageSpec::default());
    let (total, _) = repo.execute(&query).unwrap();
    assert_eq!(total, 2);

    let query = FilterBuilder::new()
        .range(fields::CREATED, None, Some(from))
        .build(PageSpec::default());
    let (total, items) = repo.execute(&query).unwrap();
    assert_eq!(total, 1);
    assert_eq!(ids(&items), vec!["o-1"]);
}

#[test]
fn test_execute_pages_report_full_total() {
    let (_db, repo) = seeded_repo("test_execute_paging.db");

    let page = PageSpec::new(2, 2, fields::ID, SortDirection::Asc);
    let (total, items) = repo.execute(&FilterBuilder::new().build(page)).unwrap();
    assert_eq!(total, 5);
    assert_eq!(ids(&items), vec!["o-3", "x-4"]);

    let page = PageSpec::new(2, 3, fields::ID, SortDirection::Asc);
    let (_, items) = repo.execute(&FilterBuilder::new().build(page)).unwrap();
    assert_eq!(ids(&items), vec!["x-5"]);

    let page = PageSpec::new(2, 4, fields::ID, SortDirection::Asc);
    let (total, items) = repo.execute(&FilterBuilder::new().build(page)).unwrap();
    assert_eq!(total, 5);
    assert!(items.is_empty());
}

#[test]
fn test_execute_sorting() {
    let (_db, repo) = seeded_repo("test_execute_sorting.db");

    let page = PageSpec::new(10, 1, fields::NAME, SortDirection::Asc);
    let (_, items) = repo.execute(&FilterBuilder::new().build(page)).unwrap();
    assert_eq!(ids(&items), vec!["x-4", "o-1", "o-3", "x-5", "o-2"]);

    let page = PageSpec::new(10, 1, fields::CREATED, SortDirection::Desc);
    let (_, items) = repo.execute(&FilterBuilder::new().build(page)).unwrap();
    assert_eq!(ids(&items), vec!["x-5", "x-4", "o-3", "o-2", "o-1"]);

    let page = PageSpec::new(10, 1, "unknown", SortDirection::Desc);
    let (_, items) = repo.execute(&FilterBuilder::new().build(page)).unwrap();
    assert_eq!(ids(&items), vec!["x-5", "x-4", "o-3", "o-2", "o-1"]);
}
