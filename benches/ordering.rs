use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use wardrobe::{
    Catalog, KindFilter, Outfit, OwnershipFilter, Piece, Shelf, ShelfEntry, SlotType, SortOrder, ViewBuilder,
};

fn make_catalog(size: usize) -> (Catalog, Shelf) {
    let pieces: Vec<Piece> = (0..size)
        .map(|i| {
            let slot = SlotType::ALL[i % SlotType::ALL.len()];
            Piece::new(format!("p{i}"), format!("Piece {}", (i * 7919) % size), slot)
                .with_owned(i % 3 == 0)
                .with_image(format!("p{i}.png"))
                .with_created_at(format!("2024-01-{:02}T{:02}:00:00Z", 1 + i % 28, i % 24))
        })
        .collect();

    let outfits: Vec<Outfit> = (0..size / 4)
        .map(|i| {
            (0..5).fold(Outfit::new(format!("o{i}"), format!("Outfit {i}")), |outfit, k| {
                outfit.with_piece(format!("p{}", (i * 5 + k) % size).as_str())
            })
        })
        .collect();

    let mut shelf = Shelf::new("bench", "Bench");
    for i in 0..size {
        let entry = if i % 2 == 0 {
            ShelfEntry::piece(format!("p{i}").as_str())
        } else {
            ShelfEntry::outfit(format!("o{}", i % (size / 4).max(1)).as_str())
        };
        shelf = shelf.with_entry(if i % 5 == 0 {
            entry
        } else {
            entry.with_added_at(format!("2024-03-{:02}", 1 + i % 28))
        });
    }

    (Catalog::new(pieces, outfits), shelf)
}

fn bench_sort_pieces(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering/pieces");
    for size in [100usize, 1_000, 10_000] {
        let (catalog, _) = make_catalog(size);
        let pieces: Vec<&Piece> = catalog.pieces().values().collect();
        group.throughput(Throughput::Elements(size as u64));
        for order in [SortOrder::Newest, SortOrder::Az] {
            let query = ViewBuilder::new().order(order).ownership(OwnershipFilter::Want).build();
            group.bench_with_input(BenchmarkId::new(order.as_str(), size), &pieces, |b, pieces| {
                b.iter(|| black_box(query.apply_pieces(pieces)));
            });
        }
    }
    group.finish();
}

fn bench_shelf_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering/shelf");
    for size in [100usize, 1_000] {
        let (catalog, shelf) = make_catalog(size);
        let query = ViewBuilder::new().kind(KindFilter::All).order(SortOrder::Newest).build();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| black_box(query.apply_shelf(&shelf, &catalog)));
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let (catalog, _) = make_catalog(1_000);
    let outfits: Vec<&Outfit> = catalog.outfits().values().collect();
    c.bench_function("ordering/classify_outfits", |b| {
        b.iter(|| {
            for outfit in &outfits {
                black_box(catalog.classify(outfit, Default::default()));
            }
        });
    });
}

criterion_group!(benches, bench_sort_pieces, bench_shelf_view, bench_classify);
criterion_main!(benches);
