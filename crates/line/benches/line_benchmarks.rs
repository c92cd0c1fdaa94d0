use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use fulfill_inventory::Stock;
use fulfill_line::AssemblyLine;
use fulfill_orders::{FillEntry, Order};
use fulfill_station::Station;

const ITEMS: [&str; 6] = ["Leg", "Top", "Drawer", "Hinge", "Screw", "Handle"];

fn build_line(order_count: usize) -> AssemblyLine {
    let stations = ITEMS
        .iter()
        .enumerate()
        .map(|(i, name)| Station::new(Stock::new(*name, (i as u64 + 1) * 10_000, 5_000, *name)))
        .collect();
    let mut line = AssemblyLine::new(stations).expect("unique station names");

    let orders = (0..order_count).map(|n| {
        // Deterministic mix: every order asks for a rotating subset, some twice.
        let items: Vec<&str> = (0..4).map(|k| ITEMS[(n + k * k) % ITEMS.len()]).collect();
        Order::new(format!("customer-{n}"), "Desk", items).expect("non-empty order")
    });
    line.load(orders);
    line
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly_line_run");

    for order_count in [10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(order_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(order_count),
            &order_count,
            |b, &order_count| {
                b.iter_batched(
                    || build_line(order_count),
                    |mut line| {
                        let mut log: Vec<FillEntry> = Vec::with_capacity(order_count * 4);
                        black_box(line.run(&mut log))
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_single_fill(c: &mut Criterion) {
    c.bench_function("order_fill_item_duplicate_requests", |b| {
        b.iter_batched(
            || {
                let order = Order::new("Ann", "Desk", ["Leg"; 16]).expect("non-empty order");
                (order, Stock::new("Leg", 1, 8, "Table leg"))
            },
            |(mut order, mut stock)| {
                let mut log: Vec<FillEntry> = Vec::with_capacity(16);
                order.fill_item(&mut stock, &mut log);
                black_box((order.is_filled(), log.len()))
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_full_run, bench_single_fill);
criterion_main!(benches);
