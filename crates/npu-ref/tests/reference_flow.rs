//! End-to-end flows through the public reference API
//!
//! Each test builds its inputs the way a conformance run does: seeded
//! random data, a parameter search, then the reference operator.

use npu_ref::conv::depthwise_accumulate;
use npu_ref::policy::{accumulator_range, search_quant_params};
use npu_ref::testdata::{fill_random_bias, fill_random_i8, random_depthwise_case, random_pool_case, vlc_test_data};
use npu_ref::vlc::{self, vlc_decompress_exact};
use npu_ref::{avg_pool, depthwise_conv, prelude::*, vlc_compress, vlc_decompress, QuantSearch};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn random_depthwise_cases_requantize_into_range() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut found = 0;
    for _ in 0..10 {
        let case = random_depthwise_case(&mut rng, 8).expect("legal case");
        let taps = case.shape.c * case.params.h.kernel * case.params.w.kernel;
        let search = search_quant_params(&mut rng, 5, |rng| {
            let input = Tensor::new(case.shape, fill_random_i8(rng, case.shape.size())).unwrap();
            let filter = fill_random_i8(rng, taps);
            let bias = case.has_bias.then(|| fill_random_bias(rng, case.shape.c));
            let acc = depthwise_accumulate(&input, &filter, bias.as_deref(), &case.params).unwrap();
            let range = accumulator_range(acc.data());
            ((input, filter, bias), range)
        });
        let QuantSearch::Found { params, data: (input, filter, bias), attempts } = search else {
            continue;
        };
        assert!((1..=5).contains(&attempts));
        found += 1;

        let quant = vec![params; case.shape.c];
        let out = depthwise_conv(&input, &filter, bias.as_deref(), &quant, &case.params).unwrap();
        assert_eq!(out.shape(), case.params.output_shape(case.shape).unwrap());
        // the extreme accumulator lands on the edge of the i8 range
        assert!(out.data().iter().any(|v| *v == 127 || *v == -128), "{case:?}");
    }
    assert!(found > 0, "no case produced a usable scale");
}

#[test]
fn random_pool_cases_have_consistent_shapes() {
    let mut rng = StdRng::seed_from_u64(7);
    for stride in [None, Some(15), Some(16), Some(31)] {
        let case = random_pool_case(&mut rng, 2, stride).expect("legal case");
        let bytes: Vec<u8> = (0..case.shape.size()).map(|i| (i * 37 % 251) as u8).collect();
        let input = Tensor::new(case.shape, bytes).unwrap();
        let out = avg_pool(&input, case.signed, &case.params).unwrap();
        assert_eq!(out.shape(), case.params.output_shape(case.shape).unwrap());
    }
}

#[test]
fn vlc_streams_round_trip_in_both_bias_modes() {
    let mut rng = StdRng::seed_from_u64(42);
    for (signed, is_bf16) in [(true, false), (false, false), (false, true)] {
        let data = vlc_test_data(&mut rng, 4096, signed, is_bf16);
        for mode in BiasMode::ALL {
            let cmd = mode.resolve(&data, CommandInfo::new(signed, is_bf16));
            let stream = vlc_compress(&data, &cmd).unwrap();
            assert_eq!(stream.len() % 16, 0);
            assert!(stream.len() <= vlc::compressed_upper_bound(data.len(), is_bf16));
            if signed {
                assert!(stream.len() < data.len(), "{mode}: {} bytes", stream.len());
            }
            assert_eq!(vlc_decompress(&stream).unwrap(), data);
            assert_eq!(vlc_decompress_exact(&stream, data.len()).unwrap(), data);
            assert!(vlc_decompress_exact(&stream, data.len() + 1).is_err());
        }
    }
}

#[test]
fn atan_modes_pass_on_every_lane_count() {
    for lanes in [2, 8, 32] {
        let tables = LutTableSet::new(lanes).unwrap();
        for mode in AtanTestMode::ALL {
            let shape = mode.shape(lanes);
            let input = Tensor::new(shape, mode.inputs(shape, (-8, 8)).unwrap()).unwrap();
            let got = tables.atan_tensor(&input).unwrap();
            let want = mode.expected(input.data());
            let bad = got.data().iter().zip(&want).position(|(&g, &w)| !mode.accepts(g, w, 0.01));
            assert_eq!(bad, None, "{mode} on {lanes} lanes");
        }
    }
}
