/// Easing curves used by parametric camera transitions.
///
/// Inputs are clamped to `[0, 1]` so a transition's final frame lands exactly
/// on its target even when the host clock overshoots the duration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// `t * (2 - t)`: fast start, gentle arrival.
    #[default]
    EaseOutQuad,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    #[test]
    fn endpoints_are_exact() {
        for easing in [Easing::Linear, Easing::EaseOutQuad, Easing::EaseInOutCubic] {
            assert_eq!(easing.sample(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.sample(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        assert_eq!(Easing::EaseOutQuad.sample(-0.5), 0.0);
        assert_eq!(Easing::EaseOutQuad.sample(1.5), 1.0);
    }

    #[test]
    fn ease_out_quad_matches_formula() {
        let t = 0.25;
        assert_eq!(Easing::EaseOutQuad.sample(t), t * (2.0 - t));
    }

    #[test]
    fn ease_in_out_cubic_is_symmetric_about_midpoint() {
        let e = Easing::EaseInOutCubic;
        assert_eq!(e.sample(0.5), 0.5);
        let lo = e.sample(0.2);
        let hi = e.sample(0.8);
        assert!((lo + hi - 1.0).abs() < 1e-12);
    }
}
