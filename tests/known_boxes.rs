use mp4peek::boxes::FourCC;
use mp4peek::known_boxes::{ChildLayout, KnownBox};

#[test]
fn known_box_from_ftyp() {
    let cc = FourCC(*b"ftyp");
    let kb = KnownBox::from(cc);
    assert!(matches!(kb, KnownBox::Ftyp));
    assert_eq!(kb.full_name(), "File Type Box");
}

#[test]
fn container_layouts() {
    assert_eq!(
        KnownBox::from(FourCC(*b"moov")).child_layout(),
        Some(ChildLayout::Plain)
    );
    assert_eq!(
        KnownBox::from(FourCC(*b"stsd")).child_layout(),
        Some(ChildLayout::CountedEntries)
    );
    assert_eq!(
        KnownBox::from(FourCC(*b"encv")).child_layout(),
        Some(ChildLayout::VisualSampleEntry)
    );
    assert_eq!(
        KnownBox::from(FourCC(*b"mp4a")).child_layout(),
        Some(ChildLayout::AudioSampleEntry)
    );
    assert_eq!(KnownBox::from(FourCC(*b"ftyp")).child_layout(), None);
}

#[test]
fn unknown_tags_are_leaves() {
    let kb = KnownBox::from(FourCC(*b"zzzz"));
    assert!(matches!(kb, KnownBox::Unknown(_)));
    assert_eq!(kb.child_layout(), None);
    assert!(!kb.is_full_box());
    assert_eq!(kb.full_name(), "Unknown Box");
}

#[test]
fn known_box_classifies_full_box() {
    assert!(KnownBox::from(FourCC(*b"mvhd")).is_full_box());
    assert!(KnownBox::from(FourCC(*b"schm")).is_full_box());
    assert!(!KnownBox::from(FourCC(*b"mdat")).is_full_box());
    assert!(!KnownBox::from(FourCC(*b"frma")).is_full_box());
}
