use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_of_all_and_iter() {
    let mask = RegisterMask::of_all(&[0, 3, 7]);
    assert_eq!(mask.bits(), 0b1000_1001);
    assert_eq!(mask.iter().collect::<Vec<_>>(), vec![0, 3, 7]);
    assert_eq!(mask.count(), 3);
    assert_eq!(mask.first(), Some(0));
    assert_eq!(RegisterMask::EMPTY.first(), None);
}

#[test]
fn test_low() {
    assert_eq!(RegisterMask::low(0), RegisterMask::EMPTY);
    assert_eq!(RegisterMask::low(16).bits(), 0xFFFF);
    assert_eq!(RegisterMask::low(32).bits(), u32::MAX);
}

#[test]
fn test_out_of_capacity_code() {
    assert_eq!(RegisterMask::of(40), RegisterMask::EMPTY);
    assert!(!RegisterMask::low(32).contains(40));
}

#[test]
fn test_set_algebra() {
    let a = RegisterMask::of_all(&[1, 2, 3]);
    let b = RegisterMask::of_all(&[3, 4]);
    assert_eq!(a | b, RegisterMask::of_all(&[1, 2, 3, 4]));
    assert_eq!(a & b, RegisterMask::of(3));
    assert_eq!(a.without(b), RegisterMask::of_all(&[1, 2]));
    assert!(RegisterMask::of(2).is_subset_of(a));
    assert!(!a.is_disjoint(b));
}

#[test]
fn test_formatting() {
    let mask = RegisterMask::of_all(&[0, 4]);
    assert_eq!(format!("{mask}"), "0x00000011");
    assert_eq!(format!("{mask:?}"), "{0, 4}");
}

proptest! {
    #[test]
    fn prop_iter_matches_bits(bits in any::<u32>()) {
        let mask = RegisterMask::from_bits(bits);
        let codes: Vec<_> = mask.iter().collect();
        prop_assert_eq!(codes.len() as u32, mask.count());
        prop_assert_eq!(RegisterMask::of_all(&codes), mask);
        prop_assert!(codes.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(codes.first().copied(), mask.first());
    }

    #[test]
    fn prop_without_is_disjoint(a in any::<u32>(), b in any::<u32>()) {
        let (a, b) = (RegisterMask::from_bits(a), RegisterMask::from_bits(b));
        let rest = a.without(b);
        prop_assert!(rest.is_disjoint(b));
        prop_assert!(rest.is_subset_of(a));
        prop_assert_eq!(rest | (a & b), a);
    }
}
