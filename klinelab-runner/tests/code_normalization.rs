//! Property tests for security code normalization.

use klinelab_runner::{normalize_code, Market};
use proptest::prelude::*;

proptest! {
    /// Normalizing an already-normalized code changes nothing.
    #[test]
    fn normalization_is_idempotent(code in "[0-9]{5,6}") {
        let once = normalize_code(&code);
        let twice = normalize_code(&once.code);
        prop_assert_eq!(once, twice);
    }

    /// A-share codes keep their digits behind a two-letter exchange prefix.
    #[test]
    fn a_share_codes_keep_their_digits(code in "[0368][0-9]{5}") {
        let n = normalize_code(&code);
        prop_assert_eq!(n.market, Market::A);
        prop_assert_eq!(n.code.len(), 8);
        prop_assert!(n.code.ends_with(&code));
    }

    /// Hong Kong inputs in any case and suffix form end up as `<digits>hk`.
    #[test]
    fn hk_suffix_forms_converge(digits in "[0-9]{4,5}", upper in any::<bool>(), dotted in any::<bool>()) {
        let suffix = match (dotted, upper) {
            (true, true) => ".HK",
            (true, false) => ".hk",
            (false, true) => "HK",
            (false, false) => "hk",
        };
        let n = normalize_code(&format!("  {digits}{suffix} "));
        prop_assert_eq!(n.market, Market::Hk);
        prop_assert_eq!(n.code, format!("{digits}hk"));
    }
}
