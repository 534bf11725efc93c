use ndarray::{s, Array1, ArrayView1};

/// Iterator over fixed-size frames of a signal with a fractional hop size.
///
/// Frame `i` starts at sample `floor(i * hop_size)`; frames reaching past the
/// end of the signal are zero-padded.
pub struct FramedSignal<'a> {
    signal: ArrayView1<'a, f32>,
    frame_size: usize,
    hop_size: f64,
    num_frames: usize,
    index: usize,
}

impl<'a> FramedSignal<'a> {
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }
}

impl<'a> Iterator for FramedSignal<'a> {
    type Item = Array1<f32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.num_frames {
            return None;
        }

        let start = (self.index as f64 * self.hop_size) as usize;
        let mut frame = Array1::zeros(self.frame_size);
        if start < self.signal.len() {
            let end = (start + self.frame_size).min(self.signal.len());
            frame
                .slice_mut(s![..end - start])
                .assign(&self.signal.slice(s![start..end]));
        }

        self.index += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_frames - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for FramedSignal<'a> {}

/// Number of frames needed to cover `num_samples` with the given hop.
pub fn num_frames(num_samples: usize, hop_size: f64) -> usize {
    (num_samples as f64 / hop_size).ceil() as usize
}

pub fn frame_signal(signal: &Array1<f32>, frame_size: usize, hop_size: f64) -> FramedSignal {
    FramedSignal {
        signal: signal.view(),
        frame_size,
        hop_size,
        num_frames: num_frames(signal.len(), hop_size),
        index: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count_rounds_up() {
        assert_eq!(num_frames(22050, 1102.5), 20);
        assert_eq!(num_frames(22051, 1102.5), 21);
        assert_eq!(num_frames(0, 1102.5), 0);
    }

    #[test]
    fn test_frames_start_at_floor_of_fractional_hop() {
        let signal = Array1::from((0..10).map(|i| i as f32).collect::<Vec<_>>());
        let frames: Vec<Array1<f32>> = frame_signal(&signal, 4, 2.5).collect();

        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].to_vec(), vec![0.0, 1.0, 2.0, 3.0]);
        // floor(2.5) = 2
        assert_eq!(frames[1].to_vec(), vec![2.0, 3.0, 4.0, 5.0]);
        assert_eq!(frames[2].to_vec(), vec![5.0, 6.0, 7.0, 8.0]);
        // zero-padded past the end
        assert_eq!(frames[3].to_vec(), vec![7.0, 8.0, 9.0, 0.0]);
    }
}
