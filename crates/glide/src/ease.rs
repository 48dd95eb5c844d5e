use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::PI;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Easing curves, named the way GSAP names them so config files can say
/// `ease = "power3.out"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Ease {
    #[strum(serialize = "none", serialize = "linear")]
    Linear,
    #[strum(serialize = "power1.out", serialize = "power1", serialize = "quad.out")]
    Power1Out,
    #[default]
    #[strum(serialize = "power3.out", serialize = "power3", serialize = "quart.out")]
    Power3Out,
    #[strum(serialize = "power3.inOut", serialize = "quart.inOut")]
    Power3InOut,
    #[strum(serialize = "sine.inOut")]
    SineInOut,
}

impl Ease {
    /// Maps linear progress to eased progress. Input is clamped to `[0, 1]`.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
            Self::Power3InOut => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Self::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_endpoints_are_fixed() {
        for ease in Ease::iter() {
            assert!(ease.apply(0.0).abs() < 1e-12, "{ease} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease} at 1");
        }
    }

    #[test]
    fn test_monotone() {
        for ease in Ease::iter() {
            let mut last = ease.apply(0.0);
            for step in 1..=200 {
                let v = ease.apply(step as f64 / 200.0);
                assert!(v + 1e-12 >= last, "{ease} decreased at step {step}");
                last = v;
            }
        }
    }

    #[test]
    fn test_out_curves_decelerate() {
        assert!(Ease::Power3Out.apply(0.25) > 0.25);
        assert!(Ease::Power1Out.apply(0.5) > 0.5);
        assert!((Ease::Power3InOut.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(Ease::Power3Out.apply(-2.0), 0.0);
        assert_eq!(Ease::Power3Out.apply(4.0), 1.0);
    }

    #[test]
    fn test_ease_deserialization() {
        let cases = vec![
            ("\"power3.out\"", Ease::Power3Out),
            ("\"Power3.Out\"", Ease::Power3Out),
            ("\"power3\"", Ease::Power3Out),
            ("\"power3.inOut\"", Ease::Power3InOut),
            ("\"power1.out\"", Ease::Power1Out),
            ("\"sine.inOut\"", Ease::SineInOut),
            ("\"none\"", Ease::Linear),
        ];

        for (json, expected) in cases {
            let deserialized: Ease = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<Ease>("\"elastic.out\"").is_err());
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
        assert_eq!(lerp(-72.0, 0.0, 1.0), 0.0);
    }
}
