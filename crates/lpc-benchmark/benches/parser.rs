use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};

static FILES: [(&str, &str); 2] = [
    (
        "simple",
        r#"
        string query_short() { return short_desc; }
        "#,
    ),
    (
        "room",
        r#"
        #include <std.h>
        inherit ROOM;

        void create() {
            ::create();
            set_light(1);
            set_short("A small clearing");
            dest_dir = ({
                "/d/forest/path", "north",
                "/d/forest/lake", "south",
            });
            items = ([ "trees": "Tall and old.", "grass": "Green." ]);
        }

        int do_search(string str) {
            if (!str || str != "grass") return notify_fail("Search what?\n");
            foreach (object ob in all_inventory(this_object())) {
                if (ob->id("gem")) continue;
            }
            switch (random(3)) {
                case 0: write("Nothing.\n"); break;
                default: write("A glint catches your eye.\n");
            }
            return 1;
        }
        "#,
    ),
];

fn benchmark_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, text) in FILES {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_code", name), &text, |b, &text| {
            b.iter(|| {
                let document = lpc_parse::parse(text);
                black_box(document)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
