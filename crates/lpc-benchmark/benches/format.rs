use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use lpc_fmt::FormatOptions;

static ROOM: &str = r#"
inherit "/std/room";

void create() {
  ::create();
  set_short("A small clearing"); set_long("Sunlight falls through the leaves onto a carpet of moss and fern.");
  dest_dir = ({ "/d/forest/path", "north", "/d/forest/lake", "south", "/d/forest/hut", "east" });
  items = ({ "trees", "Tall and old.", "moss", "Soft." });
  property = ([ "light": 1, "indoors": 0, "no_teleport": 1, "smell": "pine" ]);
}

int filter_players(object *obs) {
  return sizeof(filter(obs, (: interactive($1) && $1->query_level() > 10 && !$1->query_invis() :)));
}
"#;

fn benchmark_format(c: &mut Criterion) {
    let options = FormatOptions::default();
    let narrow = FormatOptions { print_width: 40, ..FormatOptions::default() };

    let mut group = c.benchmark_group("Format Benchmark");
    group.throughput(Throughput::Bytes(ROOM.len() as u64));

    for (name, options) in [("default", &options), ("narrow", &narrow)] {
        group.bench_with_input(BenchmarkId::new("format_room", name), options, |b, options| {
            b.iter(|| black_box(lpc_fmt::format(ROOM, options)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_format);
criterion_main!(benches);
