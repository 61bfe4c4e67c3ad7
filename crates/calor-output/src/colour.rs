//! Temperature to colour.

use image::Rgb;

/// Four-segment ramp over 0..=100: blue → cyan → green → yellow → red.
///
/// Values outside the range are clamped; NaN maps to blue.
pub fn heat_colour(t: f32) -> Rgb<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 100.0) };
    let ramp = |v: f32| (v / 25.0 * 255.0).round().clamp(0.0, 255.0) as u8;
    if t <= 25.0 {
        Rgb([0, ramp(t), 255])
    } else if t <= 50.0 {
        Rgb([0, 255, 255 - ramp(t - 25.0)])
    } else if t <= 75.0 {
        Rgb([ramp(t - 50.0), 255, 0])
    } else {
        Rgb([255, 255 - ramp(t - 75.0), 0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn segment_endpoints() {
        assert_eq!(heat_colour(0.0), Rgb([0, 0, 255]));
        assert_eq!(heat_colour(25.0), Rgb([0, 255, 255]));
        assert_eq!(heat_colour(50.0), Rgb([0, 255, 0]));
        assert_eq!(heat_colour(75.0), Rgb([255, 255, 0]));
        assert_eq!(heat_colour(100.0), Rgb([255, 0, 0]));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(heat_colour(-40.0), heat_colour(0.0));
        assert_eq!(heat_colour(1e9), heat_colour(100.0));
        assert_eq!(heat_colour(f32::NAN), heat_colour(0.0));
    }

    proptest! {
        #[test]
        fn ramp_is_continuous(t in 0.0f32..99.9) {
            let a = heat_colour(t);
            let b = heat_colour(t + 0.1);
            for (x, y) in a.0.into_iter().zip(b.0) {
                prop_assert!((i16::from(x) - i16::from(y)).abs() <= 2);
            }
        }
    }
}
