// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use epladder::geometry::{Point, Viewport};
use epladder::movement::{move_mark, Movement};
use epladder::ops::{apply_ops, ApplyResult, LadderOp, OpContext};

mod fixtures;
mod profiler;

use fixtures::Case;

// Benchmark identity (keep stable):
// - Group names in this file: `movement.move_mark`, `movement.apply_ops`
// - Case IDs are `Case::id()` plus the batch suffix; do not rename them.
fn checksum_apply_result(result: &ApplyResult) -> u64 {
    let mut acc = 0u64;
    acc = acc.wrapping_mul(131).wrapping_add(result.new_rev);
    acc = acc.wrapping_mul(131).wrapping_add(result.applied as u64);
    acc = acc.wrapping_mul(131).wrapping_add(result.delta.updated.len() as u64);
    acc
}

fn benches_move_mark(c: &mut Criterion) {
    let mut group = c.benchmark_group("movement.move_mark");
    let viewport = Viewport::default();

    for case in [Case::Small, Case::Large] {
        let (template, av_marks) = fixtures::conducted_strip(case);
        let dragged = av_marks[av_marks.len() / 2];
        group.bench_function(case.id(), |b| {
            b.iter_batched(
                || template.clone(),
                |mut ladder| {
                    let moved = move_mark(
                        &mut ladder,
                        dragged,
                        Movement::Horizontal,
                        black_box(Point::new(400.0, 0.5)),
                        &viewport,
                    )
                    .expect("move_mark");
                    black_box(moved.len())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn benches_apply_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("movement.apply_ops");
    let context = OpContext::default();

    for case in [Case::Small, Case::Large] {
        let (template, av_marks) = fixtures::conducted_strip(case);
        let ops = av_marks
            .iter()
            .enumerate()
            .map(|(idx, av)| LadderOp::MoveMark {
                mark_id: *av,
                movement: Movement::Horizontal,
                target: Point::new(60.0 + idx as f64 * fixtures::BEAT_SPACING, 0.5),
            })
            .collect::<Vec<_>>();

        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function(format!("{}_batch", case.id()), |b| {
            b.iter_batched(
                || template.clone(),
                |mut ladder| {
                    let base_rev = ladder.rev();
                    let result = apply_ops(&mut ladder, base_rev, black_box(&ops), &context)
                        .expect("apply_ops");
                    black_box(checksum_apply_result(&result))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_move_mark, benches_apply_ops
}
criterion_main!(benches);
