//! Throughput of the stream copier across chunk sizes and buffer strategies

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ferrocat_io::{Destination, DestinationInfo, StreamCopier};
use ferrocat_types::{BufferStrategy, ChunkSize, Result};
use std::hint::black_box;
use std::io::{self, Cursor, Write};

/// Destination that discards everything, optionally truncating each write
struct NullSink {
    max_write: usize,
}

impl Write for NullSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len().min(self.max_write))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Destination for NullSink {
    fn label(&self) -> &str {
        "null"
    }

    fn probe(&self) -> Result<DestinationInfo> {
        Ok(DestinationInfo::default())
    }
}

fn bench_chunk_sizes(c: &mut Criterion) {
    let input = vec![0xA5u8; 8 * 1024 * 1024];
    let mut group = c.benchmark_group("chunk_sizes");
    group.throughput(Throughput::Bytes(input.len() as u64));

    for chunk in [4 * 1024, 64 * 1024, 1024 * 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            let mut copier = StreamCopier::new(ChunkSize::new(chunk).unwrap(), BufferStrategy::Reuse);
            let mut sink = NullSink {
                max_write: usize::MAX,
            };
            b.iter(|| {
                let mut source = Cursor::new(input.as_slice());
                black_box(copier.copy(&mut source, "bench", &mut sink).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_buffer_strategies(c: &mut Criterion) {
    let input = vec![0x5Au8; 256 * 1024];
    let mut group = c.benchmark_group("buffer_strategies");

    for strategy in [BufferStrategy::Reuse, BufferStrategy::PerCall] {
        group.bench_function(format!("{:?}", strategy), |b| {
            let mut copier = StreamCopier::new(ChunkSize::new(64 * 1024).unwrap(), strategy);
            let mut sink = NullSink {
                max_write: usize::MAX,
            };
            b.iter(|| {
                let mut source = Cursor::new(input.as_slice());
                black_box(copier.copy(&mut source, "bench", &mut sink).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_short_writes(c: &mut Criterion) {
    let input = vec![0x11u8; 1024 * 1024];
    c.bench_function("short_writes_4k_of_64k", |b| {
        let mut copier = StreamCopier::new(ChunkSize::new(64 * 1024).unwrap(), BufferStrategy::Reuse);
        let mut sink = NullSink { max_write: 4096 };
        b.iter(|| {
            let mut source = Cursor::new(input.as_slice());
            black_box(copier.copy(&mut source, "bench", &mut sink).unwrap());
        });
    });
}

criterion_group!(benches, bench_chunk_sizes, bench_buffer_strategies, bench_short_writes);
criterion_main!(benches);
