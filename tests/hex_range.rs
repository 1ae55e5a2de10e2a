use mp4peek::hex_range;
use mp4peek::util::hex_dump;
use std::io::Cursor;

#[test]
fn hex_range_reads_within_bounds() {
    let data = (0u8..64u8).collect::<Vec<_>>();
    let len = data.len() as u64;
    let mut cur = Cursor::new(data);

    let dump = hex_range(&mut cur, len, 16, 16).expect("hex_range failed");

    assert_eq!(dump.offset, 16);
    assert_eq!(dump.length, 16);
    // sanity: first byte of region is 16
    assert!(dump.hex.contains("10"));
}

#[test]
fn hex_range_clamps_to_eof() {
    let data = (0u8..32u8).collect::<Vec<_>>();
    let mut cur = Cursor::new(data);

    // ask past EOF
    let dump = hex_range(&mut cur, 32, 24, 32).expect("hex_range failed");

    // we only have 8 bytes from 24..32
    assert_eq!(dump.offset, 24);
    assert_eq!(dump.length, 8);
}

#[test]
fn hex_range_past_eof_is_empty() {
    let mut cur = Cursor::new(vec![0u8; 16]);
    let dump = hex_range(&mut cur, 16, 16, 8).expect("hex_range failed");
    assert_eq!(dump.length, 0);
    assert!(dump.hex.is_empty());
}

#[test]
fn hex_dump_rows_carry_absolute_offsets() {
    let bytes: Vec<u8> = (0..20).collect();
    let out = hex_dump(&bytes, 0x100);

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("00000100"));
    assert!(lines[1].starts_with("00000110"));
    // ascii gutter shows non-printables as dots
    assert!(lines[0].contains("|...."));
}
