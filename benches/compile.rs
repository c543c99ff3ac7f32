// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use galatea::format::mermaid;
use galatea::geometry::resolve_containment;
use galatea::model::{DiagramModel, IdAllocator, Point, ShapeKind, Size};
use galatea::ops::{apply, EditOp};

// Benchmark identity (keep stable):
// - Group names in this file: `mermaid.compile`, `geometry.resolve`
// - Case IDs (`small`, `medium`, `large_nested`) must remain stable across
//   refactors so results stay comparable over time.

/// Build a diagram with `columns` boxed node columns: each column has one top
/// level box, a nested box, `nodes_per_column` nodes inside, and a chain of
/// connections between neighbouring nodes.
fn grid_diagram(columns: usize, nodes_per_column: usize) -> DiagramModel {
    let mut ids = IdAllocator::new();
    let mut model = DiagramModel::new();

    for col in 0..columns {
        let origin = col as f64 * 500.0;
        model = apply(
            &model,
            &mut ids,
            &EditOp::CreateGroupBox {
                position: Point::new(origin, 0.0),
                size: Size::new(400.0, 200.0 + nodes_per_column as f64 * 80.0),
            },
        );
        model = apply(
            &model,
            &mut ids,
            &EditOp::CreateGroupBox {
                position: Point::new(origin + 20.0, 20.0),
                size: Size::new(360.0, 120.0 + nodes_per_column as f64 * 80.0),
            },
        );
        for row in 0..nodes_per_column {
            model = apply(
                &model,
                &mut ids,
                &EditOp::CreateNode {
                    shape: if row % 2 == 0 {
                        ShapeKind::Rect
                    } else {
                        ShapeKind::Diamond
                    },
                    position: Point::new(origin + 60.0, 60.0 + row as f64 * 80.0),
                },
            );
        }
    }

    let node_ids: Vec<_> = model.nodes().iter().map(|node| node.id().clone()).collect();
    for pair in node_ids.windows(2) {
        model = apply(
            &model,
            &mut ids,
            &EditOp::CreateConnection {
                from: pair[0].clone(),
                to: pair[1].clone(),
            },
        );
    }

    model
}

fn benches_compile(c: &mut Criterion) {
    let cases = [
        ("small", grid_diagram(2, 4)),
        ("medium", grid_diagram(8, 12)),
        ("large_nested", grid_diagram(25, 40)),
    ];

    {
        let mut group = c.benchmark_group("mermaid.compile");
        for (case_id, model) in &cases {
            group.throughput(Throughput::Elements(model.nodes().len() as u64));
            group.bench_function(*case_id, |b| {
                b.iter(|| black_box(mermaid::compile_diagram(black_box(model))).len())
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("geometry.resolve");
        for (case_id, model) in &cases {
            group.throughput(Throughput::Elements(model.nodes().len() as u64));
            group.bench_function(*case_id, |b| {
                b.iter(|| black_box(resolve_containment(black_box(model))).len())
            });
        }
        group.finish();
    }
}

criterion_group!(benches, benches_compile);
criterion_main!(benches);
