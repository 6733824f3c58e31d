use crate::error::{InspectError, Result};

/// Borrowed 8-bit grayscale view with an explicit row stride.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Tightly packed view over `data` (`stride == w`).
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    /// Bytes needed to hold every row: `stride · (h − 1) + w`, 0 when empty.
    pub fn required_len(&self) -> usize {
        if self.w == 0 || self.h == 0 {
            return 0;
        }
        self.stride * (self.h - 1) + self.w
    }

    /// Check that the stride covers a row and `data` covers every row.
    pub fn check_layout(&self) -> Result<()> {
        if self.h > 1 && self.stride < self.w {
            return Err(InspectError::InvalidOptions(format!(
                "stride {} is shorter than width {}",
                self.stride, self.w
            )));
        }
        let needed = self.required_len();
        if self.data.len() < needed {
            return Err(InspectError::InvalidOptions(format!(
                "{}×{} view with stride {} needs {needed} bytes, got {}",
                self.w,
                self.h,
                self.stride,
                self.data.len()
            )));
        }
        Ok(())
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_check_rejects_short_buffers() {
        let bytes = [0u8; 10];
        assert!(ImageU8::packed(5, 2, &bytes).check_layout().is_ok());
        assert!(ImageU8::packed(5, 3, &bytes).check_layout().is_err());
        // Last row needs only `w` bytes past its start.
        let padded = ImageU8 {
            w: 3,
            h: 2,
            stride: 7,
            data: &bytes,
        };
        assert_eq!(padded.required_len(), 10);
        assert!(padded.check_layout().is_ok());
        let overlapping = ImageU8 {
            w: 4,
            h: 2,
            stride: 2,
            data: &bytes,
        };
        assert!(overlapping.check_layout().is_err());
        assert!(ImageU8::packed(0, 0, &[]).check_layout().is_ok());
    }
}
