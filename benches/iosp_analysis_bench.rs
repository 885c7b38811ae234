use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use iosplint::core::CancellationToken;
use iosplint::testkit::sketch::*;
use iosplint::IospAnalyzer;
use std::hint::black_box;

/// File with `methods` methods, every third one mixing integration with
/// operation, each body nested a few levels deep
fn create_test_file(methods: usize) -> FileSketch {
    let mut file = FileSketch::new("Bench.cs");
    for i in 0..methods {
        let inner = [
            call(&format!("Step{i}(x + 1)"))
                .user()
                .arg(binary(ident("x"), "+", literal("1"))),
            call("Console.WriteLine(x)").external("System", "Console"),
            call("logger.LogDebug(x)").external("Microsoft.Extensions.Logging", "LoggerExtensions"),
        ];
        let body = match i % 3 {
            0 => vec![
                local("var x = Load();", call("Load()").user()),
                foreach(ident("items"), [if_(expr("x > 0"), inner)]),
            ],
            1 => vec![
                call("Load()").user(),
                call("Save()").user(),
                try_catch([call("Retry()").user()], [call("Report()").user()]),
            ],
            _ => vec![
                for_(
                    local("var i = 0", literal("0")),
                    expr("i < n"),
                    literal("i++"),
                    [local("var y = i * 2;", expr("i * 2"))],
                ),
                call("Math.Max(a, b)").external("System", "Math"),
            ],
        };
        file = file.method(method(&format!("Method{i}"), body));
    }
    file
}

fn benchmark_analyze_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_file");

    for size in [10, 100, 1000].iter() {
        let unit = create_test_file(*size).unit();
        let cancel = CancellationToken::new();

        group.bench_with_input(BenchmarkId::new("sequential", size), &unit, |b, unit| {
            let analyzer = IospAnalyzer::new().with_parallel(false);
            b.iter(|| black_box(analyzer.analyze_file(&unit.file, &unit.resolver, &cancel)));
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &unit, |b, unit| {
            let analyzer = IospAnalyzer::new().with_parallel(true);
            b.iter(|| black_box(analyzer.analyze_file(&unit.file, &unit.resolver, &cancel)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_analyze_file);
criterion_main!(benches);
