// Simple color struct, created from an unsigned 32 representing RRGGBBAA.
// The canvas wants css strings, so alpha is usually supplied per draw call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // css rgba() with an explicit opacity, ignoring the stored alpha byte
    pub fn to_css_with_alpha(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let c = Color::from_u32(0x00d4_ffff);
        assert_eq!(c, Color { r: 0, g: 212, b: 255, a: 255 });
    }

    #[test]
    fn css_uses_the_given_alpha() {
        let c = Color::from_u32(0x00d4_ff00);
        assert_eq!(c.to_css_with_alpha(0.25), "rgba(0, 212, 255, 0.25)");
    }
}
