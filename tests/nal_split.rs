use mp4peek::error::Error;
use mp4peek::nal::{NalLengthSize, NalUnitType, split_sample};
use mp4peek::util::read_be_uint;

fn width(n: u8) -> NalLengthSize {
    NalLengthSize::new(n).unwrap()
}

#[test]
fn read_be_uint_all_widths() {
    let buf = [0x00, 0x00, 0x01, 0x2C];
    for (w, expect) in [(1, 0x00), (2, 0x00), (3, 0x01), (4, 300)] {
        let mut pos = 0;
        assert_eq!(read_be_uint(&buf, &mut pos, w), Some(expect));
        assert_eq!(pos, w);
    }

    let mut pos = 1;
    assert_eq!(read_be_uint(&[0xAB, 0xCD, 0xEF], &mut pos, 2), Some(0xCDEF));
    assert_eq!(pos, 3);
}

#[test]
fn read_be_uint_underflow_leaves_position() {
    let buf = [0x01, 0x02];
    let mut pos = 1;
    assert_eq!(read_be_uint(&buf, &mut pos, 2), None);
    assert_eq!(pos, 1);

    // width out of range
    let mut pos = 0;
    assert_eq!(read_be_uint(&buf, &mut pos, 0), None);
    assert_eq!(read_be_uint(&buf, &mut pos, 5), None);
    assert_eq!(pos, 0);
}

#[test]
fn splits_two_units_with_four_byte_prefix() {
    let sample = [
        0x00, 0x00, 0x00, 0x02, 0xAB, 0xCD, // unit 1
        0x00, 0x00, 0x00, 0x01, 0xEF, // unit 2
    ];
    let units: Vec<_> = split_sample(&sample, width(4))
        .collect::<Result<_, _>>()
        .expect("split failed");

    assert_eq!(units.len(), 2);
    assert_eq!(units[0].data, &[0xAB, 0xCD]);
    assert_eq!(units[0].offset, 4);
    assert_eq!(units[1].data, &[0xEF]);
    assert_eq!(units[1].offset, 10);
}

#[test]
fn splits_with_narrow_prefixes() {
    // width 1
    let sample = [3, 0x65, 0x01, 0x02, 1, 0x41];
    let units: Vec<_> = split_sample(&sample, width(1))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].data, &[0x65, 0x01, 0x02]);
    assert_eq!(units[1].data, &[0x41]);

    // width 2
    let sample = [0x00, 0x03, 0x67, 0x42, 0x00];
    let units: Vec<_> = split_sample(&sample, width(2))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].data, &[0x67, 0x42, 0x00]);
}

#[test]
fn empty_sample_yields_nothing() {
    assert_eq!(split_sample(&[], width(4)).count(), 0);
}

#[test]
fn partial_prefix_is_truncated() {
    // three bytes cannot hold a 4-byte prefix
    let sample = [0x00, 0x00, 0x00];
    let mut it = split_sample(&sample, width(4));

    match it.next() {
        Some(Err(Error::TruncatedNalUnit { offset, needed, remaining })) => {
            assert_eq!(offset, 0);
            assert_eq!(needed, 4);
            assert_eq!(remaining, 3);
        }
        other => panic!("expected TruncatedNalUnit, got {:?}", other),
    }
    // fused after the error
    assert!(it.next().is_none());
    assert!(it.next().is_none());
}

#[test]
fn short_payload_is_truncated() {
    // declares 5 bytes, only 2 remain
    let sample = [0x00, 0x00, 0x00, 0x05, 0x01, 0x02];
    let results: Vec<_> = split_sample(&sample, width(4)).collect();

    assert_eq!(results.len(), 1);
    assert!(matches!(
        results[0],
        Err(Error::TruncatedNalUnit { needed: 5, remaining: 2, .. })
    ));
}

#[test]
fn good_units_before_the_cut_are_yielded() {
    let sample = [
        0x00, 0x02, 0xAB, 0xCD, // fine
        0x00, 0x09, 0x01, // declares 9, has 1
    ];
    let mut it = split_sample(&sample, width(2));
    assert_eq!(it.next().unwrap().unwrap().data, &[0xAB, 0xCD]);
    assert!(it.next().unwrap().is_err());
    assert!(it.next().is_none());
}

#[test]
fn splitting_restarts_from_scratch() {
    let sample = [0x01, 0x67, 0x01, 0x68];
    let w = width(1);

    let first: Vec<_> = split_sample(&sample, w).take(1).collect();
    assert_eq!(first.len(), 1);

    // a fresh call sees the whole sample again
    assert_eq!(split_sample(&sample, w).count(), 2);
}

#[test]
fn nal_types_from_header_byte() {
    let sample = [0x01, 0x67, 0x01, 0x68, 0x01, 0x65];
    let types: Vec<_> = split_sample(&sample, width(1))
        .map(|u| u.unwrap().nal_type().unwrap())
        .collect();
    assert_eq!(
        types,
        vec![NalUnitType::Sps, NalUnitType::Pps, NalUnitType::IdrSlice]
    );
    assert_eq!(NalUnitType::Sps.to_string(), "SPS");
    assert_eq!(NalUnitType::from_header_byte(0x1F), NalUnitType::Unknown(31));
}

#[test]
fn length_size_validation() {
    assert!(NalLengthSize::new(0).is_none());
    assert!(NalLengthSize::new(5).is_none());
    assert_eq!(NalLengthSize::new(2).map(|n| n.get()), Some(2));

    // config byte keeps only the two low bits
    assert_eq!(NalLengthSize::from_config_byte(0xFF).get(), 4);
    assert_eq!(NalLengthSize::from_config_byte(0xFC).get(), 1);
}
