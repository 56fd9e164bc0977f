use curve_lfo::{
    clock::TransportInfo,
    plugin::{Param, Processor, ProcessorConfig},
    Graph, Vertex,
};

fn render(processor: &mut Processor, input: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let mut out_l = vec![0.0; input.len()];
    let mut out_r = vec![0.0; input.len()];
    processor.process([input, input], [out_l.as_mut_slice(), out_r.as_mut_slice()]);
    (out_l, out_r)
}

#[test]
fn output_stays_bounded_under_every_setting() {
    let mut processor = Processor::new(ProcessorConfig {
        sample_rate: 44_100.0,
        max_block_size: 128,
    });
    processor.set_param(Param::PreGain, 2.0);
    processor.set_param(Param::HorizontalWarpType, 6.0);
    processor.set_param(Param::HorizontalWarpAmount, 1.0);
    processor.set_param(Param::VerticalWarpType, 3.0);
    processor.set_param(Param::VerticalWarpAmount, 1.0);
    processor.set_param(Param::LfoRate, 11.0);
    processor.set_param(Param::BipolarMode, 1.0);

    let input: Vec<f32> = (0..4096).map(|i| (i as f32 * 0.031).sin()).collect();
    let (out_l, out_r) = render(&mut processor, &input);

    // |pre_gain * input * lfo| <= 2 with every gain at its maximum
    assert!(out_l.iter().chain(&out_r).all(|s| s.is_finite() && s.abs() <= 2.0 + 1e-4));
    assert!(out_l.iter().any(|s| s.abs() > 0.0));
}

#[test]
fn block_size_does_not_change_the_result() {
    let input: Vec<f32> = (0..1000).map(|i| ((i * 13 % 17) as f32 - 8.0) / 8.0).collect();

    let mut small = Processor::new(ProcessorConfig {
        sample_rate: 48_000.0,
        max_block_size: 64,
    });
    let mut large = Processor::new(ProcessorConfig {
        sample_rate: 48_000.0,
        max_block_size: 1024,
    });

    let (small_out, _) = render(&mut small, &input);
    let (large_out, _) = render(&mut large, &input);
    assert_eq!(small_out, large_out);
}

#[test]
fn playhead_wraps_and_keeps_reporting() {
    let mut processor = Processor::new(ProcessorConfig {
        sample_rate: 1000.0,
        max_block_size: 256,
    });

    // Rate 4 at 1 kHz: 2000 samples per cycle
    render(&mut processor, &vec![0.0; 2500]);
    let position = processor.param(Param::PlayheadPos);
    assert!((position - 0.25).abs() < 1e-3, "got {}", position);
}

#[test]
fn phase_offset_shifts_the_reading_point() {
    let flat_then_high = Graph::from_vertices(&[
        Vertex::linear(0.0, 0.0),
        Vertex::linear(0.5, 0.0),
        Vertex::linear(0.500_1, 1.0),
        Vertex::linear(1.0, 1.0),
    ])
    .expect("valid graph");

    let mut processor = Processor::new(ProcessorConfig {
        sample_rate: 1000.0,
        max_block_size: 64,
    });
    processor.replace_graph(flat_then_high.clone());
    let (out, _) = render(&mut processor, &[1.0; 4]);
    assert!(out.iter().all(|&s| s.abs() < 1e-6), "{:?}", out);

    let mut shifted = Processor::new(ProcessorConfig {
        sample_rate: 1000.0,
        max_block_size: 64,
    });
    shifted.replace_graph(flat_then_high);
    shifted.set_param(Param::Phase, 0.75);
    let (out, _) = render(&mut shifted, &[1.0; 4]);
    assert!(out.iter().all(|&s| (s - 1.0).abs() < 1e-6), "{:?}", out);
}

#[test]
fn synced_lfo_lands_on_the_bar() {
    let mut processor = Processor::new(ProcessorConfig {
        sample_rate: 48_000.0,
        max_block_size: 512,
    });
    processor.set_param(Param::BpmSync, 1.0);
    processor.set_param(Param::LfoRate, 4.0);
    processor.set_transport(TransportInfo {
        bar: 7,
        ..TransportInfo::playing(120.0, 4.0)
    });

    // Start of any bar is the start of the cycle at one cycle per bar
    render(&mut processor, &[0.0; 1]);
    let position = processor.playhead_position();
    assert!(position < 1e-3, "got {}", position);

    // Two seconds at 120 BPM in 4/4 is exactly one bar
    render(&mut processor, &vec![0.0; 96_000 - 1]);
    let position = processor.playhead_position();
    assert!(position < 1e-3 || position > 1.0 - 1e-3, "got {}", position);
    let beats = processor.transport().total_beats();
    assert!((beats - 28.0).abs() < 1e-6, "transport at {} beats", beats);
}

#[test]
fn invalid_transport_falls_back_to_free_running() {
    let mut synced = Processor::new(ProcessorConfig {
        sample_rate: 1000.0,
        max_block_size: 64,
    });
    synced.set_param(Param::BpmSync, 1.0);
    synced.set_transport(TransportInfo::STOPPED);

    let mut free = Processor::new(ProcessorConfig {
        sample_rate: 1000.0,
        max_block_size: 64,
    });

    let input = vec![1.0; 300];
    assert_eq!(render(&mut synced, &input), render(&mut free, &input));
}

#[test]
fn smoothing_removes_steps_in_gain() {
    let mut processor = Processor::new(ProcessorConfig {
        sample_rate: 48_000.0,
        max_block_size: 256,
    });
    processor.set_param(Param::Wet, 0.0);
    processor.reset();
    render(&mut processor, &[1.0; 256]);

    processor.set_param(Param::PostGain, 0.0);
    let (out, _) = render(&mut processor, &[1.0; 256]);

    // 20 ms glide: the first sample barely moves, no jumps anywhere
    assert!(out[0] > 0.99, "got {}", out[0]);
    for pair in out.windows(2) {
        assert!(pair[0] - pair[1] < 0.01, "step from {} to {}", pair[0], pair[1]);
        assert!(pair[1] <= pair[0]);
    }
}
