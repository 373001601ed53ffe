use criterion::{
    criterion_group,
    criterion_main,
    Criterion,
};


// Group Benchmarks
criterion_group!(
    name = benches;
    config = Criterion::default();
    targets =
    crate::skiplist::iter,
    crate::skiplist::add_ascending,
    crate::skiplist::add_random,
    crate::skiplist::contains,
    crate::skiplist::rand_access,
    crate::skiplist::remove_value,
);

// Benchmarks
criterion_main!(benches);
