use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use positional::{
    BinaryTree, LinkedBinaryTree, PositionalList, PriorityQueue, SortedPriorityQueue, Tree,
};

fn make_list(size: usize) -> PositionalList<usize> {
    let mut list = PositionalList::with_capacity(size);
    let mut prev = list.add_first(0);

    for i in 1..size {
        prev = list.add_after(prev, i).unwrap();
    }

    list
}

fn make_complete_tree(size: usize) -> LinkedBinaryTree<usize> {
    LinkedBinaryTree::from_level_order((0..size).map(Some))
}

fn bench_make_list(c: &mut Criterion) {
    let mut g = c.benchmark_group("list creation");

    for size in [1, 100, 10_000, 1_000_000] {
        g.bench_with_input(BenchmarkId::new("make_list", size), &size, |b, size| {
            b.iter(|| black_box(make_list(*size)))
        });
    }
}

fn bench_traversals(c: &mut Criterion) {
    let mut g = c.benchmark_group("tree traversal");

    for size in [100, 10_000, 1_000_000] {
        let tree = make_complete_tree(size);

        g.bench_with_input(BenchmarkId::new("inorder", size), &tree, |b, tree| {
            b.iter(|| black_box(tree.inorder().count()))
        });
        g.bench_with_input(BenchmarkId::new("postorder", size), &tree, |b, tree| {
            b.iter(|| black_box(tree.postorder().count()))
        });
        g.bench_with_input(BenchmarkId::new("breadth_first", size), &tree, |b, tree| {
            b.iter(|| black_box(tree.breadth_first().count()))
        });
        g.bench_with_input(BenchmarkId::new("inorder_next", size), &tree, |b, tree| {
            b.iter(|| {
                let mut walk = tree.inorder().next();
                let mut count = 0;
                while let Some(p) = walk {
                    count += 1;
                    walk = tree.inorder_next(p).unwrap();
                }
                black_box(count)
            })
        });
    }
}

fn bench_sorted_priority_queue(c: &mut Criterion) {
    let mut g = c.benchmark_group("sorted priority queue");

    for size in [100, 1_000, 10_000] {
        g.bench_with_input(BenchmarkId::new("add_then_drain", size), &size, |b, size| {
            b.iter(|| {
                let mut queue = SortedPriorityQueue::new();
                for i in 0..*size {
                    queue.add(i.wrapping_mul(7919) % 1013, i);
                }
                while queue.remove_min().is_ok() {}
                black_box(queue.len())
            })
        });
    }
}

criterion_group!(
    benches,
    bench_make_list,
    bench_traversals,
    bench_sorted_priority_queue
);
criterion_main!(benches);
