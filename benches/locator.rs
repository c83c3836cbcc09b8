use criterion::{black_box, criterion_group, criterion_main, Criterion};

use txannot::config::DeriveConfig;
use txannot::models::{Catalog, Strand};
use txannot::splice;
use txannot::tests::catalogs::{gene, transcript};

/// 2000 overlapping genes with three transcripts each
fn dense_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    let mut tx_id = 0;
    for i in 0..2_000u32 {
        let start = 10_000 + i * 1_500;
        let id = format!("G{}", i);
        catalog
            .push_gene(gene(&id, Strand::Plus, start, start + 4_000))
            .unwrap();
        for offset in [0, 500, 1_000] {
            tx_id += 1;
            let s = start + offset;
            catalog
                .push_transcript(transcript(
                    tx_id,
                    &id,
                    Strand::Plus,
                    &[(s, s + 100), (s + 600, s + 800), (s + 2_000, s + 3_000)],
                ))
                .unwrap();
        }
    }
    catalog
}

fn locate_bench(c: &mut Criterion) {
    let catalog = dense_catalog();
    let config = DeriveConfig::default();

    c.bench_function("locate splice acceptors", |b| {
        b.iter(|| splice::locate(black_box(&catalog), black_box(&config)))
    });
}

criterion_group!(locator, locate_bench);
criterion_main!(locator);
