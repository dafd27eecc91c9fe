use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use models::rating::compute_rating;
use models::ship::{self, ShipType};
use service::ship::ShipFilter;

fn fleet(n: i64) -> Vec<ship::Model> {
    (1..=n)
        .map(|id| {
            let speed = ((id % 99) + 1) as f64 / 100.0;
            ship::Model {
                id,
                name: format!("ship-{id}"),
                planet: if id % 2 == 0 { "Mars".into() } else { "Venus".into() },
                ship_type: if id % 3 == 0 { ShipType::Military } else { ShipType::Transport },
                prod_date: Utc.with_ymd_and_hms(2801 + (id % 200) as i32, 1, 1, 0, 0, 0).unwrap(),
                is_used: id % 5 == 0,
                speed,
                crew_size: (id % 9999) as i32 + 1,
                rating: speed,
            }
        })
        .collect()
}

fn bench_predicate(c: &mut Criterion) {
    let ships = fleet(10_000);
    // build the predicate outside of the measured loop
    let predicate = ShipFilter {
        planet: Some("ar".into()),
        ship_type: Some(ShipType::Military),
        min_speed: Some(0.2),
        max_crew_size: Some(5000),
        ..ShipFilter::default()
    }
    .to_predicate();

    c.bench_function("predicate_matches_10k", |b| {
        b.iter(|| ships.iter().filter(|s| predicate.matches(black_box(s))).count());
    });
}

fn bench_rating(c: &mut Criterion) {
    c.bench_function("compute_rating", |b| {
        b.iter(|| compute_rating(black_box(0.37), black_box(true), black_box(2950)).unwrap());
    });
}

criterion_group!(benches, bench_predicate, bench_rating);
criterion_main!(benches);
