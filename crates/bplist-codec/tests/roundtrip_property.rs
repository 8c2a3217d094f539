use bplist_codec::{PlistDate, PlistDecoder, PlistEncoder, PlistValue};
use proptest::prelude::*;

fn arb_plist() -> impl Strategy<Value = PlistValue> {
    let leaf = prop_oneof![
        Just(PlistValue::Null),
        any::<bool>().prop_map(PlistValue::Bool),
        any::<i64>().prop_map(PlistValue::Integer),
        (-1.0e12f64..1.0e12f64).prop_map(PlistValue::Real),
        // keep dates inside the range where millis survive the f64 wire form
        (-(1i64 << 50)..(1i64 << 50))
            .prop_map(|millis| PlistValue::Date(PlistDate::from_unix_millis(millis))),
        ".{0,24}".prop_map(PlistValue::Str),
        proptest::collection::vec(any::<u8>(), 0..32).prop_map(PlistValue::Bytes),
        any::<u32>().prop_map(|uid| PlistValue::Uid(uid as u64)),
    ];
    leaf.prop_recursive(4, 48, 8, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..8).prop_map(PlistValue::array),
            proptest::collection::vec(("[a-z]{0,8}", inner), 0..8).prop_map(PlistValue::dict),
        ]
    })
}

proptest! {
    #[test]
    fn roundtrip_is_identity(value in arb_plist()) {
        let mut encoder = PlistEncoder::new();
        let encoded = encoder.encode(&value);
        let decoded = PlistDecoder::new().decode(&encoded).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn encoding_is_deterministic(value in arb_plist()) {
        let first = PlistEncoder::new().encode(&value);
        let second = PlistEncoder::new().encode(&value);
        prop_assert_eq!(first, second);
    }
}
