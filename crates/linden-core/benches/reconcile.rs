use std::cell::RefCell;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linden_core::{
    children, h, props, render, text, use_state, App, Component, Document, Props, SetState, VNode,
};

const ROWS_SAMPLES: &[usize] = &[16, 64, 256];

thread_local! {
    static ROWS_SETTER: RefCell<Option<SetState<usize>>> = RefCell::new(None);
}

fn table(_props: Props) -> VNode {
    let (rows, set_rows) = use_state(|| 0usize);
    ROWS_SETTER.with(|slot| *slot.borrow_mut() = Some(set_rows));
    let items: Vec<VNode> = (0..rows)
        .map(|row| {
            h(
                "li",
                props!(class: "row"),
                children![text(format!("item {row}"))],
            )
        })
        .collect();
    h("ul", props!(class: "table"), children![items])
}

struct ReconcileFixture {
    document: Document,
    _app: App,
    setter: SetState<usize>,
}

impl ReconcileFixture {
    fn new(rows: usize) -> Self {
        let document = Document::new();
        let container = document.create_element("root");
        let app = render(Component::new(table), &document, container);
        let setter = ROWS_SETTER.with(|slot| slot.borrow().clone()).unwrap();
        setter.set(rows);
        Self {
            document,
            _app: app,
            setter,
        }
    }
}

fn bench_unchanged_rerender(c: &mut Criterion) {
    let mut group = c.benchmark_group("rerender_unchanged");
    for &rows in ROWS_SAMPLES {
        let fixture = ReconcileFixture::new(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter(|| {
                // Same row count: a full rebuild and diff that must write
                // nothing back to the document.
                fixture.setter.set(black_box(rows));
            });
        });
        assert_eq!(fixture.document.children_of(fixture.document.child_at(0, 0).unwrap()).len(), rows);
    }
    group.finish();
}

fn bench_grow_and_shrink(c: &mut Criterion) {
    let mut group = c.benchmark_group("rerender_grow_shrink");
    for &rows in ROWS_SAMPLES {
        let fixture = ReconcileFixture::new(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter(|| {
                fixture.setter.set(black_box(rows + 8));
                fixture.setter.set(black_box(rows));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_unchanged_rerender, bench_grow_and_shrink);
criterion_main!(benches);
