//! Cosmetic block colors.

use rand::Rng;

/// An RGB color assigned to a block when it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Draws a uniformly random color.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let [r, g, b, _] = rng.next_u32().to_le_bytes();
        Self { r, g, b }
    }

    /// Returns `true` if black text stays readable on this color.
    #[must_use]
    pub fn is_light(self) -> bool {
        // ITU-R BT.601 luma
        let luma = 299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b);
        luma >= 128_000
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn test_display_is_hex() {
        assert_eq!(Color::new(255, 0, 16).to_string(), "#ff0010");
    }

    #[test]
    fn test_random_is_reproducible() {
        let mut a = Pcg64::seed_from_u64(7);
        let mut b = Pcg64::seed_from_u64(7);
        assert_eq!(Color::random(&mut a), Color::random(&mut b));
    }

    #[test]
    fn test_is_light() {
        assert!(Color::new(255, 255, 255).is_light());
        assert!(!Color::new(0, 0, 0).is_light());
    }
}
