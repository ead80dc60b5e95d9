//! Scan a WAV capture for narrowband channels
//!
//! Usage:
//!   cargo run --release --example scan_wav -- <file.wav> [cycles]
//!
//! Runs the given number of cycles (default: one full pass over the
//! capture) and prints detected bins with their center frequencies.

use chansift::{ChannelDetector, ParamId, DETECTION_SENTINEL};

/// Load a WAV file and return (samples, sample_rate)
fn load_wav(path: &str) -> Result<(Vec<i16>, u32), Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<i16> = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;

    // Convert to mono if stereo
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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("Usage: scan_wav <file.wav> [cycles]");
            std::process::exit(2);
        }
    };
    let cycles: Option<usize> = args.next().map(|v| v.parse()).transpose()?;

    // Load and configure
    let (samples, sample_rate) = load_wav(&path)?;
    let mut detector = ChannelDetector::new(samples, sample_rate)?;
    detector.set_param(ParamId::MedFiltWidth, 15)?;
    detector.set_param(ParamId::PeakCount, 5)?;
    detector.set_param(ParamId::PeakWidthBins, 20)?;
    detector.set_param(ParamId::ChanWidthBins, 80)?;
    detector.set_param(ParamId::PassbandStopBin, 950)?;

    let cycles = cycles.unwrap_or_else(|| detector.cursor().period());
    println!(
        "{}: {} samples at {} Hz, {:.2} Hz per bin, {} cycle(s)",
        path,
        detector.sample_count(),
        detector.sample_rate(),
        detector.frequency_resolution(),
        cycles
    );
    for (id, param) in detector.params().iter() {
        println!("  {} = {}", id.name(), param.current_value);
    }

    // Scan
    for cycle in 0..cycles {
        let result = detector.process_cycle();
        let hits: Vec<usize> = result
            .detections
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == DETECTION_SENTINEL)
            .map(|(bin, _)| bin)
            .collect();

        println!("cycle {:>3}: {} detection(s)", cycle, hits.len());
        for bin in hits {
            let stats = result
                .channels
                .values()
                .find(|s| s.chan_min == bin)
                .copied();
            match stats {
                Some(stats) => println!(
                    "    bin {:>4}  {:>9.1} Hz  mean={:.1} var={:.1}",
                    bin,
                    detector.bin_frequency(bin),
                    stats.mean,
                    stats.variance
                ),
                None => println!("    bin {:>4}  {:>9.1} Hz", bin, detector.bin_frequency(bin)),
            }
        }
    }

    Ok(())
}
