// sink.rs - The display a run pushes frames to

use crate::error::DisplayError;
use crate::render::Bitmap;

/// A pixel panel of fixed size.
///
/// Both calls block until the panel has taken the data. `clear` is called
/// once, when the run stops.
pub trait DisplaySink {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn push_frame(&mut self, frame: &Bitmap) -> Result<(), DisplayError>;
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Rejects frames that do not match the panel.
    fn check_frame(&self, frame: &Bitmap) -> Result<(), DisplayError> {
        if frame.width() != self.width() || frame.height() != self.height() {
            return Err(DisplayError::FrameSize {
                expected_width: self.width(),
                expected_height: self.height(),
                actual_width: frame.width(),
                actual_height: frame.height(),
            });
        }
        Ok(())
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn push_frame(&mut self, frame: &Bitmap) -> Result<(), DisplayError> {
        (**self).push_frame(frame)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn push_frame(&mut self, frame: &Bitmap) -> Result<(), DisplayError> {
        (**self).push_frame(frame)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }
}
