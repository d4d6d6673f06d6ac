/// Plain-text (P3) PPM image, built up one pixel at a time in row-major order
pub struct PpmImage {
    width: usize,
    height: usize,
    body: String,
}

impl PpmImage {
    pub fn create(width: usize, height: usize) -> PpmImage {
        PpmImage { width, height, body: String::new() }
    }

    pub fn append_pixel(&mut self, rgb: [u8; 3]) {
        self.body.push_str(&format!("{} {} {}\n", rgb[0], rgb[1], rgb[2]));
    }

    pub fn get_text(&self) -> String {
        let mut text = String::new();
        // COLS x ROWS; 255 is max colour
        text.push_str(&format!("P3\n{} {}\n255\n", self.width, self.height));
        text.push_str(&self.body);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::PpmImage;

    #[test]
    fn header_then_pixels() {
        let mut image = PpmImage::create(2, 1);
        image.append_pixel([255, 0, 7]);
        image.append_pixel([51, 179, 204]);
        assert_eq!(image.get_text(), "P3\n2 1\n255\n255 0 7\n51 179 204\n");
    }
}
