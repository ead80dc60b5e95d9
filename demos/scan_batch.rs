//! Scan multiple WAV captures in parallel
//!
//! Usage:
//!   cargo run --release --example scan_batch -- [--jobs N] [--json] <file1> <file2> ...
//!
//! Notes:
//! - Parallelism is across files. Each capture gets its own detector and
//!   is scanned single-threaded for one full pass.
//! - Default workers: (available CPU threads - 1), keeping one core free.

use std::collections::BTreeSet;
use std::env;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use chansift::{ChannelDetector, ParamId, DETECTION_SENTINEL};

#[derive(Clone, Serialize)]
struct FileReport {
    path: String,
    ok: bool,
    cycles: usize,
    detected_bins: Vec<usize>,
    detected_hz: Vec<f64>,
    error: Option<String>,
}

/// Load a WAV file and return (samples, sample_rate)
fn load_wav(path: &str) -> Result<(Vec<i16>, u32), Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<i16> = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;

    let mono_samples = if spec.channels == 2 {
        samples
            .chunks_exact(2)
            .map(|pair| ((i32::from(pair[0]) + i32::from(pair[1])) / 2) as i16)
            .collect()
    } else {
        samples
    };

    Ok((mono_samples, spec.sample_rate))
}

/// One full pass over a capture; returns the union of detected bins
fn scan_capture(path: &str) -> Result<(usize, Vec<usize>, Vec<f64>), String> {
    let (samples, sample_rate) = load_wav(path).map_err(|e| format!("load failed: {e}"))?;

    let mut detector =
        ChannelDetector::new(samples, sample_rate).map_err(|e| e.to_string())?;
    let tuned = [
        (ParamId::MedFiltWidth, 15),
        (ParamId::PeakCount, 5),
        (ParamId::PeakWidthBins, 20),
        (ParamId::ChanWidthBins, 80),
        (ParamId::PassbandStopBin, 950),
    ];
    for (id, value) in tuned {
        detector.set_param(id, value).map_err(|e| e.to_string())?;
    }

    let cycles = detector.cursor().period();
    let mut bins: BTreeSet<usize> = BTreeSet::new();
    for _ in 0..cycles {
        let result = detector.process_cycle();
        bins.extend(
            result
                .detections
                .iter()
                .enumerate()
                .filter(|(_, &v)| v == DETECTION_SENTINEL)
                .map(|(bin, _)| bin),
        );
    }

    let bins: Vec<usize> = bins.into_iter().collect();
    let hz: Vec<f64> = bins.iter().map(|&bin| detector.bin_frequency(bin)).collect();
    Ok((cycles, bins, hz))
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut paths: Vec<String> = Vec::new();

    while let Some(arg) = args.first().cloned() {
        args.remove(0);
        match arg.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: scan_batch [--jobs N] [--json] <file1> <file2> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => paths.push(arg),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one WAV file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .expect("Failed to build rayon thread pool");

    let reports: Vec<FileReport> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| match scan_capture(path) {
                Ok((cycles, bins, hz)) => FileReport {
                    path: path.clone(),
                    ok: true,
                    cycles,
                    detected_bins: bins,
                    detected_hz: hz,
                    error: None,
                },
                Err(e) => FileReport {
                    path: path.clone(),
                    ok: false,
                    cycles: 0,
                    detected_bins: vec![],
                    detected_hz: vec![],
                    error: Some(e),
                },
            })
            .collect()
    });

    if json {
        for report in &reports {
            println!("{}", serde_json::to_string(report)?);
        }
    } else {
        for (idx, report) in reports.iter().enumerate() {
            if report.ok {
                println!(
                    "[{}/{}] {}: {} bin(s) over {} cycle(s): {:?}",
                    idx + 1,
                    reports.len(),
                    report.path,
                    report.detected_bins.len(),
                    report.cycles,
                    report.detected_bins
                );
            } else {
                println!(
                    "[{}/{}] {}: ERROR: {}",
                    idx + 1,
                    reports.len(),
                    report.path,
                    report.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    let ok = reports.iter().filter(|r| r.ok).count();
    let wall_ms = t0.elapsed().as_secs_f64() * 1000.0;
    eprintln!("Done: ok={}/{} wall={:.0}ms", ok, reports.len(), wall_ms);

    Ok(())
}
