//! Integration tests for the channel detection pipeline

use chansift::{
    ChannelDetector, ChansiftError, ParamId, CHANNEL_ZERO_SENTINEL, DETECTION_SENTINEL, FFT_LEN,
};

/// Generate `len` samples of a pure tone centered on `bin` of the
/// half-spectrum
fn bin_tone(len: usize, bin: usize, amplitude: f64) -> Vec<i16> {
    (0..len)
        .map(|n| {
            let phase = 2.0 * std::f64::consts::PI * bin as f64 * n as f64 / FFT_LEN as f64;
            (amplitude * phase.sin()).round() as i16
        })
        .collect()
}

/// Sum two tones sample by sample
fn two_tones(len: usize, bin_a: usize, amp_a: f64, bin_b: usize, amp_b: f64) -> Vec<i16> {
    bin_tone(len, bin_a, amp_a)
        .into_iter()
        .zip(bin_tone(len, bin_b, amp_b))
        .map(|(a, b)| a + b)
        .collect()
}

fn detected_bins(detections: &[f64]) -> Vec<usize> {
    detections
        .iter()
        .enumerate()
        .filter(|(_, &v)| v == DETECTION_SENTINEL)
        .map(|(bin, _)| bin)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_tone_detected_inside_its_channel() {
        let mut detector = ChannelDetector::new(bin_tone(4096, 300, 10_000.0), 8192)
            .expect("detector should build");
        detector.set_param(ParamId::MedFiltWidth, 9).unwrap();
        detector.set_param(ParamId::PeakCount, 1).unwrap();
        detector.set_param(ParamId::PeakWidthBins, 10).unwrap();
        detector.set_param(ParamId::ChanWidthBins, 40).unwrap();
        detector.set_param(ParamId::PassbandStopBin, 950).unwrap();

        let result = detector.process_cycle();

        assert_eq!(result.spectrum.len(), FFT_LEN / 2);
        assert_eq!(result.residual.len(), FFT_LEN / 2);
        assert_eq!(result.detections.len(), FFT_LEN / 2);

        // The raw spectrum peaks on the tone's bin
        let raw_peak = result
            .spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(bin, _)| bin)
            .unwrap();
        assert_eq!(raw_peak, 300, "tone should dominate bin 300");

        // Peak extraction anchored a channel at the tone
        let stats = result
            .channels
            .get(&300)
            .expect("channel stats should be keyed by the peak bin");
        assert!(stats.mean > 0.0);
        assert!(stats.variance > 0.0);

        // Exactly one detection, at the refined channel minimum; offsets
        // are measured from the peak, so the bin lies in (300, 330)
        let bins = detected_bins(&result.detections);
        assert_eq!(bins.len(), 1, "expected one detection, got {:?}", bins);
        assert_eq!(bins[0], stats.chan_min);
        assert!(
            bins[0] > 300 && bins[0] < 330,
            "detection at {} should sit inside the tone's channel",
            bins[0]
        );

        // The exclusion zone stays zeroed outside the channel, and the
        // channel's first bin carries the in-place sentinel
        for bin in 295..305 {
            assert_eq!(result.residual[bin], 0.0, "bin {} should be excluded", bin);
        }
        assert_eq!(result.residual[305], CHANNEL_ZERO_SENTINEL);
    }

    #[test]
    fn test_identical_detectors_agree_bit_for_bit() {
        let samples = bin_tone(4096, 300, 10_000.0);
        let mut first = ChannelDetector::new(samples.clone(), 8192).unwrap();
        let mut second = ChannelDetector::new(samples, 8192).unwrap();
        for detector in [&mut first, &mut second] {
            detector.set_param(ParamId::MedFiltWidth, 9).unwrap();
            detector.set_param(ParamId::PeakCount, 3).unwrap();
            detector.set_param(ParamId::PeakWidthBins, 10).unwrap();
            detector.set_param(ParamId::ChanWidthBins, 40).unwrap();
        }

        let a = first.process_cycle();
        let b = second.process_cycle();

        assert_eq!(a.spectrum, b.spectrum);
        assert_eq!(a.residual, b.residual);
        assert_eq!(a.detections, b.detections);
        assert_eq!(a.channels, b.channels);
    }

    #[test]
    fn test_scan_wraps_to_the_first_window() {
        let mut detector = ChannelDetector::new(bin_tone(4096, 300, 10_000.0), 8192).unwrap();
        detector.set_param(ParamId::MedFiltWidth, 9).unwrap();

        assert_eq!(detector.cursor().period(), 9);
        let first = detector.process_cycle();
        for _ in 0..8 {
            detector.process_cycle();
        }

        // Tenth cycle replays the first window exactly
        let replay = detector.process_cycle();
        assert_eq!(first.spectrum, replay.spectrum);
        assert_eq!(first.detections, replay.detections);
    }

    #[test]
    fn test_two_tones_two_detections() {
        let samples = two_tones(4096, 300, 10_000.0, 600, 8_000.0);
        let mut detector = ChannelDetector::new(samples, 8192).unwrap();
        detector.set_param(ParamId::MedFiltWidth, 9).unwrap();
        detector.set_param(ParamId::PeakCount, 2).unwrap();
        detector.set_param(ParamId::PeakWidthBins, 10).unwrap();
        detector.set_param(ParamId::ChanWidthBins, 40).unwrap();
        detector.set_param(ParamId::PassbandStopBin, 950).unwrap();

        let result = detector.process_cycle();

        assert!(result.channels.contains_key(&300));
        assert!(result.channels.contains_key(&600));

        let bins = detected_bins(&result.detections);
        assert_eq!(bins.len(), 2, "expected two detections, got {:?}", bins);
        assert!(bins[0] > 300 && bins[0] < 330);
        assert!(bins[1] > 600 && bins[1] < 630);
    }

    #[test]
    fn test_silence_produces_no_detections() {
        let mut detector = ChannelDetector::new(vec![0; 4096], 8192).unwrap();
        detector.set_param(ParamId::MedFiltWidth, 9).unwrap();
        detector.set_param(ParamId::PeakCount, 5).unwrap();
        detector.set_param(ParamId::PeakWidthBins, 10).unwrap();
        detector.set_param(ParamId::ChanWidthBins, 40).unwrap();

        let result = detector.process_cycle();

        // An exhausted residual pins every peak at bin 0; the five
        // duplicates collapse to one channel whose minimum misses the
        // passband
        assert_eq!(result.channels.len(), 1);
        let stats = result.channels.get(&0).expect("channel at bin 0");
        assert_eq!(stats.chan_min, 0);
        assert!(
            (stats.mean - CHANNEL_ZERO_SENTINEL).abs() < 1e-9,
            "repeat analysis should see the sentinels, got mean {}",
            stats.mean
        );
        assert!(result.detections.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_collapsed_channel_is_skipped() {
        // Channel bounds collapse when the width equals the exclusion
        // width; the peak is found but never becomes a detection
        let mut detector = ChannelDetector::new(bin_tone(4096, 1000, 10_000.0), 8192).unwrap();
        detector.set_param(ParamId::MedFiltWidth, 9).unwrap();
        detector.set_param(ParamId::PeakCount, 1).unwrap();
        detector.set_param(ParamId::PeakWidthBins, 10).unwrap();
        detector.set_param(ParamId::ChanWidthBins, 10).unwrap();

        let result = detector.process_cycle();

        assert!(result.channels.is_empty());
        assert!(result.detections.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_rejected_parameter_keeps_previous_value() {
        let mut detector = ChannelDetector::new(vec![0; 4096], 8192).unwrap();

        let result = detector.set_param(ParamId::PassbandStopBin, 100);
        assert!(matches!(
            result,
            Err(ChansiftError::ParameterOutOfRange(_))
        ));
        assert_eq!(detector.param(ParamId::PassbandStopBin).current_value, 250);

        let result = detector.set_param(ParamId::PeakCount, 16);
        assert!(result.is_err());
        assert_eq!(detector.param(ParamId::PeakCount).current_value, 1);

        // The detector still scans with the surviving values
        let result = detector.process_cycle();
        assert_eq!(result.spectrum.len(), FFT_LEN / 2);
    }

    #[test]
    fn test_scan_result_serializes() {
        let mut detector = ChannelDetector::new(bin_tone(4096, 300, 10_000.0), 8192).unwrap();
        detector.set_param(ParamId::MedFiltWidth, 9).unwrap();
        detector.set_param(ParamId::PeakWidthBins, 10).unwrap();
        detector.set_param(ParamId::ChanWidthBins, 40).unwrap();

        let result = detector.process_cycle();
        let json = serde_json::to_string(&result).expect("scan result should serialize");

        assert!(json.contains("\"chan_min\""));
        assert!(json.contains("\"detections\""));
    }
}
