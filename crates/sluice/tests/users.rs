//! End-to-end sorting, filtering and pagination over a small users table.

use serde_json::{json, Value as Json};
use sluice::{Filter, MemoryTable, Operations, Page, PageMeta, RawParameters};

fn user(id: u32, name: &str, last_name: &str, age: u32, active: bool, height: f64) -> Json {
    json!({
        "id": id,
        "name": name,
        "lastName": last_name,
        "age": age,
        "isActive": active,
        "height": height,
    })
}

fn users() -> MemoryTable<Json> {
    MemoryTable::new(vec![
        user(1, "John", "Doe", 25, true, 179.5),
        user(2, "Alice", "Johnson", 30, false, 165.3),
        user(3, "Michael", "Smith", 28, true, 182.0),
        user(4, "Emily", "Brown", 35, true, 170.8),
        user(5, "Daniel", "Williams", 22, false, 176.5),
        user(6, "Olivia", "Jones", 27, true, 168.9),
        user(7, "James", "Taylor", 32, true, 175.2),
        user(8, "Sophia", "Anderson", 29, false, 160.0),
        user(9, "Benjamin", "Martinez", 31, true, 180.6),
        user(10, "Mia", "Hernandez", 26, false, 172.4),
    ])
}

fn run(raw: RawParameters) -> Page<Json> {
    let ops = Operations::standard();
    Filter::new(users().query(), &ops, &raw).paginate().unwrap()
}

fn ids(page: &Page<Json>) -> Vec<i64> {
    page.data.iter().filter_map(|u| u["id"].as_i64()).collect()
}

fn meta(
    current_page: u64,
    per_page: u64,
    last_page: u64,
    total: u64,
    from: u64,
    to: u64,
) -> PageMeta {
    PageMeta {
        current_page,
        per_page,
        last_page,
        total,
        from,
        to,
    }
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn first_page() {
    let page = run(RawParameters::new().with("page", 1i64).with("perPage", 5i64));
    assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);
    assert_eq!(page.meta, meta(1, 5, 2, 10, 1, 5));
    assert_eq!(page.data[0], users().rows()[0]);
}

#[test]
fn second_page() {
    let page = run(RawParameters::new().with("page", 2i64).with("perPage", 3i64));
    assert_eq!(ids(&page), vec![4, 5, 6]);
    assert_eq!(page.meta, meta(2, 3, 4, 10, 4, 6));
}

#[test]
fn last_partial_page() {
    let page = run(RawParameters::new().with("page", 4i64).with("perPage", 3i64));
    assert_eq!(ids(&page), vec![10]);
    assert_eq!((page.meta.from, page.meta.to), (10, 10));
}

#[test]
fn page_past_the_end_is_empty_but_counted() {
    let page = run(RawParameters::new().with("page", 12i64).with("perPage", 5i64));
    assert!(page.is_empty());
    assert_eq!(page.meta.total, 10);
    assert_eq!(page.meta.last_page, 2);
    assert_eq!(page.meta.current_page, 12);
}

#[test]
fn defaults_without_pagination_params() {
    let page = run(RawParameters::new());
    assert_eq!(page.len(), 10);
    assert_eq!(page.meta, meta(1, 20, 1, 10, 1, 10));
}

#[test]
fn out_of_range_page_size_falls_back_to_default() {
    let page = run(RawParameters::new().with("perPage", 500i64));
    assert_eq!(page.meta.per_page, 20);

    let page = run(RawParameters::new().with("perPage", "0").with("page", "-3"));
    assert_eq!((page.meta.current_page, page.meta.per_page), (1, 20));
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn sort_descending() {
    let page = run(
        RawParameters::new()
            .with("sort", "[id,-1]")
            .with("perPage", 2i64),
    );
    assert_eq!(ids(&page), vec![10, 9]);
}

#[test]
fn sort_ascending() {
    let page = run(
        RawParameters::new()
            .with("sort", "[id,1]")
            .with("perPage", 2i64),
    );
    assert_eq!(ids(&page), vec![1, 2]);
}

#[test]
fn sort_by_float_column() {
    let page = run(
        RawParameters::new()
            .with("sort", "[height,-1]")
            .with("perPage", 3i64),
    );
    assert_eq!(ids(&page), vec![3, 9, 1]);
}

// =============================================================================
// Where
// =============================================================================

#[test]
fn where_equal() {
    let page = run(RawParameters::new().with("where", "[name,=,Emily]"));
    assert_eq!(ids(&page), vec![4]);
}

#[test]
fn where_not_equal() {
    let page = run(
        RawParameters::new()
            .with("where", "[name,!=,Emily]")
            .with("sort", "[id,-1]")
            .with("perPage", 5i64),
    );
    assert_eq!(ids(&page), vec![10, 9, 8, 7, 6]);
    assert_eq!(page.meta.total, 9);
}

#[test]
fn where_greater_than() {
    let page = run(
        RawParameters::new()
            .with("where", "[age,>,30]")
            .with("sort", "[age,-1]")
            .with("perPage", 3i64),
    );
    assert_eq!(ids(&page), vec![4, 7, 9]);
}

#[test]
fn where_at_least() {
    let page = run(
        RawParameters::new()
            .with("where", "[age,>=,30]")
            .with("perPage", 20i64),
    );
    assert_eq!(ids(&page), vec![2, 4, 7, 9]);
}

#[test]
fn where_at_most() {
    let page = run(
        RawParameters::new()
            .with("where", "[age,<=,27]")
            .with("sort", "[age,1]"),
    );
    assert_eq!(ids(&page), vec![5, 1, 10, 6]);
}

#[test]
fn where_less_than() {
    let page = run(RawParameters::new().with("where", "[age,<,25]"));
    assert_eq!(ids(&page), vec![5]);
}

#[test]
fn where_like() {
    let page = run(
        RawParameters::new()
            .with("where", "[name,LIKE,i]")
            .with("sort", "[id,1]"),
    );
    assert_eq!(ids(&page), vec![2, 3, 4, 5, 6, 8, 9, 10]);
}

#[test]
fn where_on_boolean_column() {
    let page = run(RawParameters::new().with("where", "[isActive,=,false]"));
    assert_eq!(ids(&page), vec![2, 5, 8, 10]);
}

#[test]
fn numbered_where_keys_combine() {
    let page = run(
        RawParameters::new()
            .with("where", "[name,LIKE,i]")
            .with("where_2", "[age,>,'28']")
            .with("sort", "[id,1]"),
    );
    assert_eq!(ids(&page), vec![2, 4, 8, 9]);
}

#[test]
fn or_where_widens_the_result() {
    let page = run(
        RawParameters::new()
            .with("where", "[age,<,'25']")
            .with("orWhere", "[name,=,Alice]")
            .with("sort", "[id,1]"),
    );
    assert_eq!(ids(&page), vec![2, 5]);
}

#[test]
fn quoted_values_keep_commas() {
    let table = MemoryTable::new(vec![
        json!({"id": 1, "name": "Doe, John"}),
        json!({"id": 2, "name": "Doe"}),
    ]);
    let ops = Operations::standard();
    let raw = RawParameters::new().with("where", "[name,=,'Doe, John']");
    let page = Filter::new(table.query(), &ops, &raw).paginate().unwrap();
    assert_eq!(ids(&page), vec![1]);
}

// =============================================================================
// Query strings
// =============================================================================

#[test]
fn query_string_end_to_end() {
    let raw = RawParameters::from_query(
        "where=%5Bage%2C%3E%2C26%5D&sort=[age,-1]&page=2&perPage=2&bogus=[x]",
    );
    let ops = Operations::standard();
    let mut filter = Filter::new(users().query(), &ops, &raw);
    let page = filter.paginate().unwrap();

    // ages > 26 descending: 35, 32, 31, 30, 29, 28, 27
    assert_eq!(ids(&page), vec![9, 2]);
    assert_eq!(page.meta, meta(2, 2, 4, 7, 3, 4));

    let skipped: Vec<&str> = filter
        .report()
        .iter()
        .filter(|o| !o.is_applied())
        .map(|o| o.key.as_str())
        .collect();
    assert_eq!(skipped, ["bogus"]);
}

#[test]
fn page_map_and_json_envelope() {
    let page = run(
        RawParameters::new()
            .with("sort", "[age,1]")
            .with("perPage", 2i64),
    )
    .map(|u| u["name"].as_str().unwrap_or_default().to_string());

    assert_eq!(page.data, vec!["Daniel", "John"]);
    assert_eq!(
        serde_json::to_value(&page).unwrap(),
        json!({
            "data": ["Daniel", "John"],
            "meta": {
                "current_page": 1,
                "per_page": 2,
                "last_page": 5,
                "total": 10,
                "from": 1,
                "to": 2
            }
        })
    );
}
