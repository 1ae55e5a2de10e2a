use crate::boxes::FourCC;

/// Typed view over common MP4 / ISOBMFF boxes.
///
/// Anything not in this list becomes `KnownBox::Unknown(fourcc)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownBox {
    // File-level / top-level
    Ftyp,
    Moov,
    Mdat,
    Free,
    Skip,
    Wide,
    Meta,
    Pssh,
    Sidx,
    Ssix,
    Prft,
    Styp,
    Emsg,
    Mfra,
    Mfro,

    // moov children
    Mvhd,
    Trak,
    Mvex,
    Udta,

    // trak children
    Tkhd,
    Edts,
    Mdia,
    Tref,
    Iprp,
    Meco,

    // edts children
    Elst,

    // mdia children
    Mdhd,
    Hdlr,
    Minf,

    // minf children
    Vmhd,
    Smhd,
    Hmhd,
    Nmhd,
    Dinf,
    Stbl,

    // dinf children
    Dref,
    Url,
    Urn,

    // stbl children
    Stsd,
    Stts,
    Ctts,
    Stsc,
    Stsz,
    Stz2,
    Stco,
    Co64,
    Stss,
    Stsh,
    Padb,
    Stdp,
    Sdtp,
    Sgpd,
    Sbgp,
    Subs,
    Cslg,

    // fragmented / mvex / moof / traf
    Mehd,
    Trex,
    Moof,
    Mfhd,
    Traf,
    Tfhd,
    Tfdt,
    Trun,
    Tfra,

    // meta / HEIF-ish
    Iloc,
    Iinf,
    Infe,
    Iref,
    Ipco,
    Ipma,
    Ispe,
    Pixi,
    AuxC,
    Clap,
    Colr,
    Hvcc,
    Avcc,
    Pitm,

    // Encryption / CENC
    Sinf,
    Schm,
    Schi,
    Tenc,
    Saio,
    Saiz,
    Senc,
    Frma,

    // Sample entries (video)
    Avc1,
    Avc2,
    Avc3,
    Avc4,
    Hev1,
    Hvc1,
    Vvc1,
    Mp4v,
    Vp08,
    Vp09,
    Av01,
    Encv,

    // Sample entries (audio)
    Mp4a,
    Enca,
    Ac3,
    Ec3,
    Opus,
    Samr,
    Sawb,
    Alac,
    Flac,

    // Misc / QT-ish / common extras
    Pasp,
    Cprt,
    Gama,
    Fiel,
    Tapt,

    // Raw UUID/vendor
    Uuid,

    // Anything else
    Unknown(FourCC),
}

impl From<FourCC> for KnownBox {
    fn from(cc: FourCC) -> Self {
        match &cc.0 {
            b"ftyp" => KnownBox::Ftyp,
            b"moov" => KnownBox::Moov,
            b"mdat" => KnownBox::Mdat,
            b"free" => KnownBox::Free,
            b"skip" => KnownBox::Skip,
            b"wide" => KnownBox::Wide,
            b"meta" => KnownBox::Meta,
            b"pssh" => KnownBox::Pssh,
            b"sidx" => KnownBox::Sidx,
            b"ssix" => KnownBox::Ssix,
            b"prft" => KnownBox::Prft,
            b"styp" => KnownBox::Styp,
            b"emsg" => KnownBox::Emsg,
            b"mfra" => KnownBox::Mfra,
            b"mfro" => KnownBox::Mfro,

            b"mvhd" => KnownBox::Mvhd,
            b"trak" => KnownBox::Trak,
            b"mvex" => KnownBox::Mvex,
            b"udta" => KnownBox::Udta,

            b"tkhd" => KnownBox::Tkhd,
            b"edts" => KnownBox::Edts,
            b"mdia" => KnownBox::Mdia,
            b"tref" => KnownBox::Tref,
            b"iprp" => KnownBox::Iprp,
            b"meco" => KnownBox::Meco,

            b"elst" => KnownBox::Elst,

            b"mdhd" => KnownBox::Mdhd,
            b"hdlr" => KnownBox::Hdlr,
            b"minf" => KnownBox::Minf,

            b"vmhd" => KnownBox::Vmhd,
            b"smhd" => KnownBox::Smhd,
            b"hmhd" => KnownBox::Hmhd,
            b"nmhd" => KnownBox::Nmhd,
            b"dinf" => KnownBox::Dinf,
            b"stbl" => KnownBox::Stbl,

            b"dref" => KnownBox::Dref,
            b"url " => KnownBox::Url,
            b"urn " => KnownBox::Urn,

            b"stsd" => KnownBox::Stsd,
            b"stts" => KnownBox::Stts,
            b"ctts" => KnownBox::Ctts,
            b"stsc" => KnownBox::Stsc,
            b"stsz" => KnownBox::Stsz,
            b"stz2" => KnownBox::Stz2,
            b"stco" => KnownBox::Stco,
            b"co64" => KnownBox::Co64,
            b"stss" => KnownBox::Stss,
            b"stsh" => KnownBox::Stsh,
            b"padb" => KnownBox::Padb,
            b"stdp" => KnownBox::Stdp,
            b"sdtp" => KnownBox::Sdtp,
            b"sgpd" => KnownBox::Sgpd,
            b"sbgp" => KnownBox::Sbgp,
            b"subs" => KnownBox::Subs,
            b"cslg" => KnownBox::Cslg,

            b"mehd" => KnownBox::Mehd,
            b"trex" => KnownBox::Trex,
            b"moof" => KnownBox::Moof,
            b"mfhd" => KnownBox::Mfhd,
            b"traf" => KnownBox::Traf,
            b"tfhd" => KnownBox::Tfhd,
            b"tfdt" => KnownBox::Tfdt,
            b"trun" => KnownBox::Trun,
            b"tfra" => KnownBox::Tfra,

            b"iloc" => KnownBox::Iloc,
            b"iinf" => KnownBox::Iinf,
            b"infe" => KnownBox::Infe,
            b"iref" => KnownBox::Iref,
            b"ipco" => KnownBox::Ipco,
            b"ipma" => KnownBox::Ipma,
            b"ispe" => KnownBox::Ispe,
            b"pixi" => KnownBox::Pixi,
            b"auxC" => KnownBox::AuxC,
            b"clap" => KnownBox::Clap,
            b"colr" => KnownBox::Colr,
            b"hvcC" => KnownBox::Hvcc,
            b"avcC" => KnownBox::Avcc,
            b"pitm" => KnownBox::Pitm,

            b"sinf" => KnownBox::Sinf,
            b"schm" => KnownBox::Schm,
            b"schi" => KnownBox::Schi,
            b"tenc" => KnownBox::Tenc,
            b"saio" => KnownBox::Saio,
            b"saiz" => KnownBox::Saiz,
            b"senc" => KnownBox::Senc,
            b"frma" => KnownBox::Frma,

            b"avc1" => KnownBox::Avc1,
            b"avc2" => KnownBox::Avc2,
            b"avc3" => KnownBox::Avc3,
            b"avc4" => KnownBox::Avc4,
            b"hev1" => KnownBox::Hev1,
            b"hvc1" => KnownBox::Hvc1,
            b"vvc1" => KnownBox::Vvc1,
            b"mp4v" => KnownBox::Mp4v,
            b"vp08" => KnownBox::Vp08,
            b"vp09" => KnownBox::Vp09,
            b"av01" => KnownBox::Av01,
            b"encv" => KnownBox::Encv,

            b"mp4a" => KnownBox::Mp4a,
            b"enca" => KnownBox::Enca,
            b"ac-3" => KnownBox::Ac3,
            b"ec-3" => KnownBox::Ec3,
            b"Opus" => KnownBox::Opus,
            b"samr" => KnownBox::Samr,
            b"sawb" => KnownBox::Sawb,
            b"alac" => KnownBox::Alac,
            b"fLaC" => KnownBox::Flac,

            b"pasp" => KnownBox::Pasp,
            b"cprt" => KnownBox::Cprt,
            b"gama" => KnownBox::Gama,
            b"fiel" => KnownBox::Fiel,
            b"tapt" => KnownBox::Tapt,

            b"uuid" => KnownBox::Uuid,

            _ => KnownBox::Unknown(cc),
        }
    }
}

/// Where a container box keeps its children, relative to the box header.
///
/// Most containers are just a header followed by child boxes, but the
/// sample-description subtree interleaves fixed fields before the children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildLayout {
    /// Children start immediately after the header.
    Plain,
    /// FullBox: version and flags, then children (`meta`, `iref`).
    AfterFullHeader,
    /// FullBox plus a 4-byte entry count, then child entries (`stsd`, `dref`).
    CountedEntries,
    /// 78 fixed bytes of visual sample entry fields, then appended boxes.
    VisualSampleEntry,
    /// Version-dependent audio sample entry fields, then appended boxes.
    AudioSampleEntry,
}

impl KnownBox {
    /// Container classification: `Some` when this box holds child boxes,
    /// with the layout of any fixed fields preceding them. Unknown types
    /// are leaves, so parsing never descends into unrecognized payloads.
    pub fn child_layout(&self) -> Option<ChildLayout> {
        match self {
            KnownBox::Moov
            | KnownBox::Trak
            | KnownBox::Mdia
            | KnownBox::Minf
            | KnownBox::Stbl
            | KnownBox::Edts
            | KnownBox::Udta
            | KnownBox::Moof
            | KnownBox::Traf
            | KnownBox::Mfra
            | KnownBox::Mvex
            | KnownBox::Meco
            | KnownBox::Tref
            | KnownBox::Dinf
            | KnownBox::Sinf
            | KnownBox::Schi
            | KnownBox::Iprp
            | KnownBox::Ipco => Some(ChildLayout::Plain),

            KnownBox::Meta | KnownBox::Iref => Some(ChildLayout::AfterFullHeader),

            KnownBox::Stsd | KnownBox::Dref => Some(ChildLayout::CountedEntries),

            KnownBox::Avc1
            | KnownBox::Avc2
            | KnownBox::Avc3
            | KnownBox::Avc4
            | KnownBox::Hev1
            | KnownBox::Hvc1
            | KnownBox::Vvc1
            | KnownBox::Mp4v
            | KnownBox::Vp08
            | KnownBox::Vp09
            | KnownBox::Av01
            | KnownBox::Encv => Some(ChildLayout::VisualSampleEntry),

            KnownBox::Mp4a
            | KnownBox::Enca
            | KnownBox::Ac3
            | KnownBox::Ec3
            | KnownBox::Opus
            | KnownBox::Samr
            | KnownBox::Sawb
            | KnownBox::Alac
            | KnownBox::Flac => Some(ChildLayout::AudioSampleEntry),

            _ => None,
        }
    }

    /// Is this a FullBox (version + flags)?
    pub fn is_full_box(&self) -> bool {
        matches!(
            self,
            KnownBox::Mvhd
                | KnownBox::Tkhd
                | KnownBox::Mdhd
                | KnownBox::Hdlr
                | KnownBox::Vmhd
                | KnownBox::Smhd
                | KnownBox::Hmhd
                | KnownBox::Nmhd
                | KnownBox::Dref
                | KnownBox::Url
                | KnownBox::Urn
                | KnownBox::Stsd
                | KnownBox::Stts
                | KnownBox::Ctts
                | KnownBox::Stsc
                | KnownBox::Stsz
                | KnownBox::Stz2
                | KnownBox::Stco
                | KnownBox::Co64
                | KnownBox::Stss
                | KnownBox::Stsh
                | KnownBox::Padb
                | KnownBox::Stdp
                | KnownBox::Sdtp
                | KnownBox::Sgpd
                | KnownBox::Sbgp
                | KnownBox::Subs
                | KnownBox::Cslg
                | KnownBox::Elst
                | KnownBox::Sidx
                | KnownBox::Ssix
                | KnownBox::Prft
                | KnownBox::Emsg
                | KnownBox::Mehd
                | KnownBox::Trex
                | KnownBox::Mfhd
                | KnownBox::Tfhd
                | KnownBox::Tfdt
                | KnownBox::Trun
                | KnownBox::Tfra
                | KnownBox::Mfro
                | KnownBox::Meta
                | KnownBox::Iloc
                | KnownBox::Iinf
                | KnownBox::Infe
                | KnownBox::Iref
                | KnownBox::Ipma
                | KnownBox::Pitm
                | KnownBox::Ispe
                | KnownBox::Pixi
                | KnownBox::AuxC
                | KnownBox::Cprt
                | KnownBox::Pssh
                | KnownBox::Schm
                | KnownBox::Tenc
                | KnownBox::Saio
                | KnownBox::Saiz
                | KnownBox::Senc
        )
    }

    /// Human-readable name for display alongside the 4CC.
    pub fn full_name(&self) -> &'static str {
        match self {
            KnownBox::Ftyp => "File Type Box",
            KnownBox::Moov => "Movie Box",
            KnownBox::Mdat => "Media Data Box",
            KnownBox::Free => "Free Space Box",
            KnownBox::Skip => "Free Space Box",
            KnownBox::Wide => "Wide Box",
            KnownBox::Meta => "Metadata Box",
            KnownBox::Pssh => "Protection System Specific Header Box",
            KnownBox::Sidx => "Segment Index Box",
            KnownBox::Ssix => "Subsegment Index Box",
            KnownBox::Prft => "Producer Reference Time Box",
            KnownBox::Styp => "Segment Type Box",
            KnownBox::Emsg => "Event Message Box",
            KnownBox::Mfra => "Movie Fragment Random Access Box",
            KnownBox::Mfro => "Movie Fragment Random Access Offset Box",

            KnownBox::Mvhd => "Movie Header Box",
            KnownBox::Trak => "Track Box",
            KnownBox::Mvex => "Movie Extends Box",
            KnownBox::Udta => "User Data Box",

            KnownBox::Tkhd => "Track Header Box",
            KnownBox::Edts => "Edit Box",
            KnownBox::Mdia => "Media Box",
            KnownBox::Tref => "Track Reference Box",
            KnownBox::Iprp => "Item Properties Box",
            KnownBox::Meco => "Additional Metadata Container Box",

            KnownBox::Elst => "Edit List Box",

            KnownBox::Mdhd => "Media Header Box",
            KnownBox::Hdlr => "Handler Reference Box",
            KnownBox::Minf => "Media Information Box",

            KnownBox::Vmhd => "Video Media Header Box",
            KnownBox::Smhd => "Sound Media Header Box",
            KnownBox::Hmhd => "Hint Media Header Box",
            KnownBox::Nmhd => "Null Media Header Box",
            KnownBox::Dinf => "Data Information Box",
            KnownBox::Stbl => "Sample Table Box",

            KnownBox::Dref => "Data Reference Box",
            KnownBox::Url => "Data Entry URL Box",
            KnownBox::Urn => "Data Entry URN Box",

            KnownBox::Stsd => "Sample Description Box",
            KnownBox::Stts => "Decoding Time to Sample Box",
            KnownBox::Ctts => "Composition Time to Sample Box",
            KnownBox::Stsc => "Sample To Chunk Box",
            KnownBox::Stsz => "Sample Size Box",
            KnownBox::Stz2 => "Compact Sample Size Box",
            KnownBox::Stco => "Chunk Offset Box",
            KnownBox::Co64 => "64-bit Chunk Offset Box",
            KnownBox::Stss => "Sync Sample Box",
            KnownBox::Stsh => "Shadow Sync Sample Box",
            KnownBox::Padb => "Padding Bits Box",
            KnownBox::Stdp => "Degradation Priority Box",
            KnownBox::Sdtp => "Independent and Disposable Samples Box",
            KnownBox::Sgpd => "Sample Group Description Box",
            KnownBox::Sbgp => "Sample To Group Box",
            KnownBox::Subs => "Sub-Sample Information Box",
            KnownBox::Cslg => "Composition to Decode Box",

            KnownBox::Mehd => "Movie Extends Header Box",
            KnownBox::Trex => "Track Extends Box",
            KnownBox::Moof => "Movie Fragment Box",
            KnownBox::Mfhd => "Movie Fragment Header Box",
            KnownBox::Traf => "Track Fragment Box",
            KnownBox::Tfhd => "Track Fragment Header Box",
            KnownBox::Tfdt => "Track Fragment Decode Time Box",
            KnownBox::Trun => "Track Fragment Run Box",
            KnownBox::Tfra => "Track Fragment Random Access Box",

            KnownBox::Iloc => "Item Location Box",
            KnownBox::Iinf => "Item Information Box",
            KnownBox::Infe => "Item Information Entry",
            KnownBox::Iref => "Item Reference Box",
            KnownBox::Ipco => "Item Property Container Box",
            KnownBox::Ipma => "Item Property Association Box",
            KnownBox::Ispe => "Image Spatial Extents Property",
            KnownBox::Pixi => "Pixel Information Property",
            KnownBox::AuxC => "Auxiliary Type Property",
            KnownBox::Clap => "Clean Aperture Box",
            KnownBox::Colr => "Colour Information Box",
            KnownBox::Hvcc => "HEVC Configuration Box",
            KnownBox::Avcc => "AVC Configuration Box",
            KnownBox::Pitm => "Primary Item Box",

            KnownBox::Sinf => "Protection Scheme Information Box",
            KnownBox::Schm => "Scheme Type Box",
            KnownBox::Schi => "Scheme Information Box",
            KnownBox::Tenc => "Track Encryption Box",
            KnownBox::Saio => "Sample Auxiliary Information Offsets Box",
            KnownBox::Saiz => "Sample Auxiliary Information Sizes Box",
            KnownBox::Senc => "Sample Encryption Box",
            KnownBox::Frma => "Original Format Box",

            KnownBox::Avc1 | KnownBox::Avc2 | KnownBox::Avc3 | KnownBox::Avc4 => {
                "AVC Sample Entry"
            }
            KnownBox::Hev1 | KnownBox::Hvc1 => "HEVC Sample Entry",
            KnownBox::Vvc1 => "VVC Sample Entry",
            KnownBox::Mp4v => "MPEG-4 Visual Sample Entry",
            KnownBox::Vp08 => "VP8 Sample Entry",
            KnownBox::Vp09 => "VP9 Sample Entry",
            KnownBox::Av01 => "AV1 Sample Entry",
            KnownBox::Encv => "Encrypted Video Sample Entry",

            KnownBox::Mp4a => "MPEG-4 Audio Sample Entry",
            KnownBox::Enca => "Encrypted Audio Sample Entry",
            KnownBox::Ac3 => "AC-3 Sample Entry",
            KnownBox::Ec3 => "E-AC-3 Sample Entry",
            KnownBox::Opus => "Opus Sample Entry",
            KnownBox::Samr => "AMR Sample Entry",
            KnownBox::Sawb => "AMR-WB Sample Entry",
            KnownBox::Alac => "ALAC Sample Entry",
            KnownBox::Flac => "FLAC Sample Entry",

            KnownBox::Pasp => "Pixel Aspect Ratio Box",
            KnownBox::Cprt => "Copyright Box",
            KnownBox::Gama => "Gamma Box",
            KnownBox::Fiel => "Field Handling Box",
            KnownBox::Tapt => "Track Aperture Mode Dimensions Box",

            KnownBox::Uuid => "User Extension Box",

            KnownBox::Unknown(_) => "Unknown Box",
        }
    }
}
