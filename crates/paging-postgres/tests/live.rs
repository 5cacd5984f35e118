//! Runs against a real database when `POSTGRES_URL` is set; skipped otherwise.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use paging_core::{CursorPagination, CursorValue, OffsetPagination, Store};
use paging_postgres::{PageQuery, PgConnection, PgStore};

diesel::table! {
    paging_items (id) {
        id -> BigInt,
        name -> Text,
    }
}

#[derive(Debug, Clone, PartialEq, Queryable)]
struct PagingItem {
    id: i64,
    name: String,
}

type ItemsQuery = paging_items::BoxedQuery<'static, Pg>;

async fn connect() -> Option<PgConnection> {
    paging_test::init_tracing();
    let _ = dotenvy::dotenv();

    let Ok(url) = std::env::var("POSTGRES_URL") else {
        eprintln!("POSTGRES_URL is not set, skipping");
        return None;
    };

    let mut conn = PgConnection::establish(&url)
        .await
        .expect("should connect to POSTGRES_URL");

    diesel::sql_query(
        "CREATE TEMPORARY TABLE paging_items (id BIGINT PRIMARY KEY, name TEXT NOT NULL)",
    )
    .execute(&mut conn)
    .await
    .expect("should create temporary table");

    let rows = (1..=25_i64)
        .map(|id| {
            (
                paging_items::id.eq(id),
                paging_items::name.eq(format!("item-{id:02}")),
            )
        })
        .collect::<Vec<_>>();

    diesel::insert_into(paging_items::table)
        .values(rows)
        .execute(&mut conn)
        .await
        .expect("should seed rows");

    Some(conn)
}

fn ordered() -> PageQuery<ItemsQuery> {
    PageQuery::new(|| paging_items::table.into_boxed())
        .ordered_by(|query| query.order(paging_items::id.asc()))
}

#[tokio::test]
async fn offset_pages_report_total() {
    let Some(mut conn) = connect().await else {
        return;
    };

    let mut store = PgStore::<_, PagingItem>::new(&mut conn, ordered());

    let total = store.paginate_offset(10, 0).await.expect("first page");
    assert_eq!(total, 25);
    assert_eq!(store.items().len(), 10);
    assert_eq!(store.items()[0].id, 1);

    let total = store.paginate_offset(10, 20).await.expect("last page");
    assert_eq!(total, 25);
    let ids = store.items().iter().map(|item| item.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![21, 22, 23, 24, 25]);

    let total = store.paginate_offset(10, 40).await.expect("past the end");
    assert_eq!(total, 25);
    assert!(store.items().is_empty());
}

#[tokio::test]
async fn cursor_pages_follow_the_field() {
    let Some(mut conn) = connect().await else {
        return;
    };

    let mut store = PgStore::<_, PagingItem>::new(&mut conn, ordered());

    store
        .paginate_cursor(3, CursorValue::Int(20), "id", false)
        .await
        .expect("forward page");
    let ids = store.items().iter().map(|item| item.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![21, 22, 23]);

    store
        .paginate_cursor(100, CursorValue::from("item-23"), "name", false)
        .await
        .expect("text cursor");
    let names = store.take_items().into_iter().map(|item| item.name).collect::<Vec<_>>();
    assert_eq!(names, vec!["item-24", "item-25"]);
}

#[tokio::test]
async fn reverse_cursor_with_descending_order() {
    let Some(mut conn) = connect().await else {
        return;
    };

    let query = PageQuery::new(|| paging_items::table.into_boxed())
        .ordered_by(|query| query.order(paging_items::id.desc()));
    let mut store = PgStore::<_, PagingItem>::new(&mut conn, query);

    store
        .paginate_cursor(2, CursorValue::Int(5), "id", true)
        .await
        .expect("reverse page");
    let ids = store.items().iter().map(|item| item.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![4, 3]);
}

#[tokio::test]
async fn unknown_field_is_a_database_error() {
    let Some(mut conn) = connect().await else {
        return;
    };

    let mut store = PgStore::<_, PagingItem>::new(&mut conn, ordered());
    let err = store
        .paginate_cursor(5, CursorValue::Int(1), "missing", false)
        .await
        .expect_err("missing column");

    assert!(
        matches!(err, diesel::result::Error::DatabaseError(..)),
        "{err:?}"
    );
}

#[tokio::test]
async fn cursor_requests_walk_every_row() {
    let Some(mut conn) = connect().await else {
        return;
    };

    let mut store = PgStore::<_, PagingItem>::new(&mut conn, ordered());
    let mut request = CursorPagination::new(10, "id");
    let mut seen = Vec::new();

    loop {
        let page = request
            .fetch(&mut store, |item| CursorValue::Int(item.id))
            .await
            .expect("page");
        seen.extend(page.items.iter().map(|item| item.id));

        let Some(token) = page.next_cursor else {
            break;
        };
        let cursor = CursorValue::decode(&token).expect("token round-trips");
        request = CursorPagination::after(10, "id", cursor);
    }

    assert_eq!(seen, (1..=25).collect::<Vec<_>>());

    let offset = OffsetPagination::new(10, 20)
        .fetch(&mut store)
        .await
        .expect("offset page");
    assert_eq!(offset.items.len(), 5);
    assert_eq!(offset.total, 25);
}

#[tokio::test]
async fn reverse_walk_over_descending_order() {
    let Some(mut conn) = connect().await else {
        return;
    };

    let query = PageQuery::new(|| paging_items::table.into_boxed())
        .ordered_by(|query| query.order(paging_items::id.desc()));
    let mut store = PgStore::<_, PagingItem>::new(&mut conn, query);
    let mut request = CursorPagination::new(10, "id").reversed();
    let mut seen = Vec::new();

    loop {
        let page = request
            .fetch(&mut store, |item| CursorValue::Int(item.id))
            .await
            .expect("page");
        seen.extend(page.items.iter().map(|item| item.id));

        let Some(token) = page.next_cursor else {
            break;
        };
        let cursor = CursorValue::decode(&token).expect("token round-trips");
        request = CursorPagination::before(10, "id", cursor);
    }

    assert_eq!(seen, (1..=25).rev().collect::<Vec<_>>());
}
