//! Benchmarks for description rendering.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dossier_core::{Constraints, RecordingCanvas, Rect, Widget};
use dossier_widgets::{remove_leading_spaces, Button, Description, Document};

fn docstring(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|i| {
            format!(
                "    ## Section {i}\n\n    Some **bold** text, some `code` and a [link](https://example.com).\n    - first item\n    - second item"
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn bench_remove_leading_spaces(c: &mut Criterion) {
    let text = docstring(50);
    c.bench_function("remove_leading_spaces_50_sections", |b| {
        b.iter(|| remove_leading_spaces(black_box(&text)))
    });

    let flush = remove_leading_spaces(&text).into_owned();
    c.bench_function("remove_leading_spaces_unchanged", |b| {
        b.iter(|| remove_leading_spaces(black_box(&flush)))
    });
}

fn bench_markdown_parse(c: &mut Criterion) {
    let text = remove_leading_spaces(&docstring(50)).into_owned();
    c.bench_function("markdown_parse_50_sections", |b| {
        b.iter(|| Document::parse(black_box(&text)))
    });
}

fn bench_markdown_layout(c: &mut Criterion) {
    let document = Document::parse(&remove_leading_spaces(&docstring(50)));
    c.bench_function("markdown_layout_600px", |b| {
        b.iter(|| document.layout(black_box(600.0), 12.8))
    });
}

fn bench_description_frame(c: &mut Criterion) {
    let text = docstring(20);
    c.bench_function("description_measure_layout_paint", |b| {
        b.iter(|| {
            let mut description = Description::new(black_box(text.as_str()));
            let size = description.measure(Constraints::width(600.0));
            description.layout(Rect::new(0.0, 0.0, 600.0, size.height));
            let mut canvas = RecordingCanvas::new();
            description.paint(&mut canvas);
            canvas.command_count()
        })
    });
}

fn bench_button_measure(c: &mut Criterion) {
    let button = Button::new("Show more");
    let constraints = Constraints::new(0.0, 200.0, 0.0, 50.0);

    c.bench_function("button_measure", |b| {
        b.iter(|| button.measure(black_box(constraints)))
    });
}

criterion_group!(
    benches,
    bench_remove_leading_spaces,
    bench_markdown_parse,
    bench_markdown_layout,
    bench_description_frame,
    bench_button_measure,
);
criterion_main!(benches);
