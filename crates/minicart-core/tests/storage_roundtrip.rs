use minicart_core::storage::{decode, encode};
use minicart_core::{Cart, LineItem};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn line() -> impl Strategy<Value = LineItem> {
    (
        prop::sample::select(vec!["A", "B", "C", "sku-42"]),
        "[ -~]{0,12}",
        0_u32..1_000_000_u32,
    )
        .prop_map(|(id, name, cents)| LineItem::new(id, name, f64::from(cents) / 100.0))
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn cart_survives_encode_decode(lines in prop::collection::vec(line(), 0..8)) {
        let cart: Cart = lines.into_iter().collect();
        let text = encode(&cart).expect("encode");
        let back = decode("cart", &text).expect("decode");
        prop_assert_eq!(back, cart);
    }
}
