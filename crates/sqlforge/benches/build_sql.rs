use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sqlforge::{Cond, Dialect, QueryBuilder};

fn bench_select_by_condition_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_conditions");
    for n in [1usize, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let qb = QueryBuilder::new(Dialect::Postgres);
            let mut query = qb.select(["id", "name"]).from("people");
            for i in 0..n {
                query = query.and_where(Cond::eq(format!("col_{i}"), i as i64));
            }
            b.iter(|| black_box(query.to_sql().unwrap()));
        });
    }
    group.finish();
}

fn bench_dialects(c: &mut Criterion) {
    let mut group = c.benchmark_group("dialects");
    for (name, dialect) in [
        ("mysql", Dialect::MySql),
        ("postgres", Dialect::Postgres),
        ("sqlite", Dialect::Sqlite),
        ("sqlserver", Dialect::SqlServer),
        ("oracle", Dialect::Oracle),
    ] {
        group.bench_function(name, |b| {
            let query = QueryBuilder::new(dialect)
                .select(["id", "name", "email"])
                .from("users")
                .and_where(Cond::eq("active", true))
                .and_where(Cond::in_list("role", ["admin", "staff"]))
                .order_by("name", "ASC")
                .limit(50);
            b.iter(|| black_box(query.to_sql().unwrap()));
        });
    }
    group.finish();
}

fn bench_insert_batch(c: &mut Criterion) {
    c.bench_function("insert_batch_100", |b| {
        let qb = QueryBuilder::new(Dialect::Postgres);
        let mut insert = qb.insert("events").columns(["kind", "payload"]);
        for i in 0..100i64 {
            insert = insert.values([
                sqlforge::Value::from("click"),
                sqlforge::Value::from(format!("payload-{i}")),
            ]);
        }
        b.iter(|| black_box(insert.to_sql().unwrap()));
    });
}

criterion_group!(
    benches,
    bench_select_by_condition_count,
    bench_dialects,
    bench_insert_batch
);
criterion_main!(benches);
