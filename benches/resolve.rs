// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trellis::integrity::collect_violations;

mod fixtures;
mod profiler;

// Group names (`resolve.view`, `resolve.integrity`) and case ids stay stable so results remain
// comparable across refactors.
fn benches_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve.view");
    for case in fixtures::Case::ALL {
        let atlas = fixtures::atlas(case);
        let view_ids = atlas
            .views()
            .views()
            .iter()
            .map(|view| view.id().to_string())
            .collect::<Vec<_>>();
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let mut nodes = 0;
                for view_id in &view_ids {
                    let resolved = atlas.resolve(black_box(view_id)).expect("resolve");
                    nodes += resolved.nodes().len();
                }
                black_box(nodes)
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("resolve.integrity");
    for case in fixtures::Case::ALL {
        let atlas = fixtures::atlas(case);
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let violations = collect_violations(black_box(atlas.catalog()), black_box(atlas.views()));
                black_box(violations.len())
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_resolve
}
criterion_main!(benches);
