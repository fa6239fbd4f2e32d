use kestrel_core::QName;

use super::{FORMAT_VERSION, HEADER_SIZE, Header, MAGIC};
use crate::{
    ContextId, ContextRecord, ExportRecord, ExprId, ExprRecord, FormatError, Interface, LitKind,
    NameId, NameRecord, RhoId, RhoRecord, SigmaId, SigmaRecord, TableSet, TauId, TauRecord,
};

fn sample() -> Interface {
    let tables = TableSet {
        taus: vec![TauRecord::kind_type(), TauRecord::var("a", TauId(0))],
        rhos: vec![
            RhoRecord::tau(vec![], TauId(1)),
            RhoRecord::fun(vec![ContextId(0)], SigmaId(0), RhoId(0)),
        ],
        sigmas: vec![
            SigmaRecord::new(vec![], vec![], RhoId(0)),
            SigmaRecord::new(vec!["a".into()], vec![TauId(0)], RhoId(1)),
        ],
        contexts: vec![ContextRecord::new(NameId(1), TauId(1))],
        exprs: vec![
            ExprRecord::DEFAULT,
            ExprRecord::local("x"),
            ExprRecord::lam(ExprId(1), ExprId(1)),
            ExprRecord::lit(LitKind::Int, "42"),
            ExprRecord::case(ExprId(1), vec![ExprId(5)]),
            ExprRecord::alt(ExprId(3), ExprId(1)),
        ],
        names: vec![
            NameRecord::from_qname(&QName::value("p", "id")),
            NameRecord::from_qname(&QName::class("p", "Eq")),
        ],
    };
    Interface::new(
        tables,
        vec![ExportRecord {
            name: NameId(0),
            sigma: SigmaId(1),
            inline: Some(ExprId(4)),
        }],
    )
}

fn header_of(bytes: &[u8]) -> Header {
    let mut raw = [0u8; HEADER_SIZE];
    raw.copy_from_slice(&bytes[..HEADER_SIZE]);
    Header::from_bytes(&raw)
}

/// Recompute the checksum after editing the body.
fn reseal(bytes: &mut [u8]) {
    let sum = crc32fast::hash(&bytes[HEADER_SIZE..]);
    bytes[8..12].copy_from_slice(&sum.to_le_bytes());
}

fn put_u32(bytes: &mut [u8], at: u64, value: u32) {
    let at = at as usize;
    bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

#[test]
fn header_roundtrip() {
    let header = Header {
        checksum: 0xDEAD_BEEF,
        total_size: 4096,
        str_blob_size: 17,
        str_count: 5,
        list_pool_count: 3,
        taus_count: 10,
        rhos_count: 4,
        sigmas_count: 2,
        contexts_count: 1,
        exprs_count: 9,
        names_count: 6,
        exports_count: 2,
        ..Header::default()
    };
    assert_eq!(Header::from_bytes(&header.to_bytes()), header);
    assert!(header.validate_magic());
    assert!(header.validate_version());
}

#[test]
fn offsets_are_aligned_and_ordered() {
    let header = Header {
        str_blob_size: 9,
        str_count: 7,
        list_pool_count: 4,
        taus_count: 2,
        rhos_count: 2,
        sigmas_count: 2,
        contexts_count: 1,
        exprs_count: 6,
        names_count: 2,
        exports_count: 1,
        ..Header::default()
    };
    let off = header.compute_offsets();
    assert_eq!(off.str_blob, 64);
    assert_eq!(off.str_table, 80);
    assert_eq!(off.list_pool, 112);
    assert_eq!(off.taus, 128);
    assert_eq!(off.rhos, 168);
    assert_eq!(off.sigmas, 208);
    assert_eq!(off.contexts, 248);
    assert_eq!(off.exprs, 256);
    assert_eq!(off.names, 448);
    assert_eq!(off.exports, 480);
    assert_eq!(off.end, 492);
}

#[test]
fn empty_interface_is_header_plus_string_table() {
    let bytes = Interface::default().to_bytes().unwrap();
    assert_eq!(bytes.len(), 72);
    let header = header_of(&bytes);
    assert_eq!(header.magic, MAGIC);
    assert_eq!(header.version, FORMAT_VERSION);
    assert_eq!(header.str_count, 1);
    assert_eq!(header.total_size, 72);
    assert_eq!(Interface::from_bytes(&bytes), Ok(Interface::default()));
}

#[test]
fn roundtrip_preserves_every_record() {
    let interface = sample();
    let bytes = interface.to_bytes().unwrap();
    assert_eq!(Interface::from_bytes(&bytes), Ok(interface));
}

#[test]
fn output_is_deterministic() {
    assert_eq!(sample().to_bytes(), sample().to_bytes());
}

#[test]
fn strings_are_deduplicated() {
    let bytes = sample().to_bytes().unwrap();
    let header = header_of(&bytes);
    // "", "a", "x", "42", "p", "id", "Eq"
    assert_eq!(header.str_count, 7);
    assert_eq!(header.str_blob_size, 9);
    assert_eq!(header.list_pool_count, 4);
    assert_eq!(header.total_size as usize, bytes.len());
}

#[test]
fn malformed_records_survive_serialization() {
    let mut interface = sample();
    interface.tables.taus[0].tag = 200;
    interface.tables.sigmas[1].bound.push("b".into());
    let bytes = interface.to_bytes().unwrap();
    assert_eq!(Interface::from_bytes(&bytes), Ok(interface));
}

#[test]
fn rejects_short_input() {
    assert_eq!(Interface::from_bytes(&[]), Err(FormatError::TooSmall(0)));
    assert_eq!(
        Interface::from_bytes(&[0u8; 63]),
        Err(FormatError::TooSmall(63))
    );
}

#[test]
fn rejects_bad_magic_and_version() {
    let mut bytes = sample().to_bytes().unwrap();
    bytes[0] = b'X';
    assert_eq!(Interface::from_bytes(&bytes), Err(FormatError::InvalidMagic));

    let mut bytes = sample().to_bytes().unwrap();
    bytes[4..8].copy_from_slice(&2u32.to_le_bytes());
    assert_eq!(
        Interface::from_bytes(&bytes),
        Err(FormatError::UnsupportedVersion(2))
    );
}

#[test]
fn rejects_truncation() {
    let bytes = sample().to_bytes().unwrap();
    let cut = &bytes[..bytes.len() - 1];
    assert_eq!(
        Interface::from_bytes(cut),
        Err(FormatError::SizeMismatch {
            header: bytes.len() as u32,
            actual: bytes.len() - 1,
        })
    );
}

#[test]
fn rejects_checksum_mismatch() {
    let mut bytes = sample().to_bytes().unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    assert!(matches!(
        Interface::from_bytes(&bytes),
        Err(FormatError::ChecksumMismatch { .. })
    ));
}

#[test]
fn rejects_sections_past_the_end() {
    let mut bytes = sample().to_bytes().unwrap();
    bytes[28..32].copy_from_slice(&1000u32.to_le_bytes());
    assert!(matches!(
        Interface::from_bytes(&bytes),
        Err(FormatError::SectionOutOfBounds { section: "tau", .. })
    ));
}

#[test]
fn rejects_invalid_rho_flag() {
    let mut bytes = sample().to_bytes().unwrap();
    let off = header_of(&bytes).compute_offsets();
    bytes[off.rhos as usize] = 2;
    reseal(&mut bytes);
    assert_eq!(
        Interface::from_bytes(&bytes),
        Err(FormatError::InvalidFlag {
            section: "rho",
            index: 0,
            value: 2
        })
    );
}

#[test]
fn rejects_list_out_of_bounds() {
    let mut bytes = sample().to_bytes().unwrap();
    let off = header_of(&bytes).compute_offsets();
    // second rho record, cont_count field
    put_u32(&mut bytes, off.rhos + 20 + 8, 100);
    reseal(&mut bytes);
    assert_eq!(
        Interface::from_bytes(&bytes),
        Err(FormatError::ListOutOfBounds {
            start: 0,
            count: 100,
            len: 4
        })
    );
}

#[test]
fn rejects_overlapping_lists() {
    let mut bytes = sample().to_bytes().unwrap();
    let off = header_of(&bytes).compute_offsets();
    // first rho record claims the whole pool, leaving nothing for the rest
    put_u32(&mut bytes, off.rhos + 8, 4);
    reseal(&mut bytes);
    assert!(matches!(
        Interface::from_bytes(&bytes),
        Err(FormatError::ListOutOfBounds { .. })
    ));
}

#[test]
fn rejects_bad_string_table() {
    let mut bytes = sample().to_bytes().unwrap();
    let off = header_of(&bytes).compute_offsets();
    put_u32(&mut bytes, off.str_table + 7 * 4, 1000);
    reseal(&mut bytes);
    assert_eq!(
        Interface::from_bytes(&bytes),
        Err(FormatError::InvalidStringTable)
    );
}

#[test]
fn rejects_invalid_utf8() {
    let mut bytes = sample().to_bytes().unwrap();
    // blob is "a" "x" "42" ...; string 2 ("x") starts at byte 65
    bytes[65] = 0xFF;
    reseal(&mut bytes);
    assert_eq!(Interface::from_bytes(&bytes), Err(FormatError::InvalidUtf8(2)));
}

#[test]
fn rejects_string_index_out_of_bounds() {
    let mut bytes = sample().to_bytes().unwrap();
    let off = header_of(&bytes).compute_offsets();
    // var field of the first tau record
    put_u32(&mut bytes, off.taus + 16, 99);
    reseal(&mut bytes);
    assert_eq!(
        Interface::from_bytes(&bytes),
        Err(FormatError::StringOutOfBounds {
            index: 99,
            count: 7
        })
    );
}

#[test]
fn shared_strings_count_against_the_string_budget() {
    let label = "a".repeat(4096);
    let mut taus = vec![TauRecord::kind_type()];
    taus.extend((0..2000).map(|_| TauRecord::var(label.as_str(), TauId(0))));
    let interface = Interface::new(
        TableSet {
            taus,
            ..TableSet::new()
        },
        vec![],
    );
    let bytes = interface.to_bytes().unwrap();
    // one copy of the label in the blob, 2000 references to it
    assert!(bytes.len() < 64 * 1024);

    assert_eq!(
        Interface::from_bytes_with_limit(&bytes, 1 << 20),
        Err(FormatError::StringBudgetExceeded { limit: 1 << 20 })
    );
    assert_eq!(
        Interface::from_bytes_with_limit(&bytes, 2000 * 4096),
        Ok(interface.clone())
    );
    assert_eq!(Interface::from_bytes(&bytes), Ok(interface));
}

#[test]
fn header_reports_record_count() {
    let bytes = sample().to_bytes().unwrap();
    assert_eq!(header_of(&bytes).record_count(), 16);

    let header = Header {
        taus_count: u32::MAX,
        exprs_count: u32::MAX,
        ..Header::default()
    };
    assert_eq!(header.record_count(), 2 * u64::from(u32::MAX));
}

#[test]
fn corrupt_input_never_panics() {
    let bytes = sample().to_bytes().unwrap();
    for len in 0..bytes.len() {
        let _ = Interface::from_bytes(&bytes[..len]);
    }
    for at in 0..bytes.len() {
        for mask in [0x01u8, 0x80, 0xFF] {
            let mut corrupt = bytes.clone();
            corrupt[at] ^= mask;
            if at >= HEADER_SIZE {
                reseal(&mut corrupt);
            }
            let _ = Interface::from_bytes(&corrupt);
        }
    }
}

#[test]
fn error_messages() {
    insta::assert_snapshot!(FormatError::InvalidMagic, @"invalid magic: expected KIFC");
    insta::assert_snapshot!(
        FormatError::UnsupportedVersion(7),
        @"unsupported interface version: 7 (expected 1)"
    );
    insta::assert_snapshot!(
        FormatError::StringBudgetExceeded { limit: 1024 },
        @"strings referenced by the interface exceed 1024 bytes"
    );
}
