//! Frame throughput benchmark.

use criterion::{criterion_group, criterion_main, Criterion};
use famicore_core::{Cartridge, CpuBus, Mirroring, Nes, Rom};

fn bench_console() -> Nes {
    let mut prg = vec![0xEA; 32 * 1024];
    prg[0x7FFC] = 0x00;
    prg[0x7FFD] = 0x80;
    Nes::with_cartridge(Cartridge::new(Rom {
        prg_rom: prg,
        chr_rom: vec![0; 8 * 1024],
        mapper_id: 0,
        mirroring: Mirroring::Vertical,
        battery: false,
    }))
}

fn frame_benchmarks(c: &mut Criterion) {
    c.bench_function("run_frame/rendering_off", |b| {
        let mut nes = bench_console();
        b.iter(|| nes.run_frame());
    });

    c.bench_function("run_frame/rendering_on", |b| {
        let mut nes = bench_console();
        nes.bus.write(0x2001, 0x18);
        b.iter(|| nes.run_frame());
    });
}

criterion_group!(benches, frame_benchmarks);
criterion_main!(benches);
