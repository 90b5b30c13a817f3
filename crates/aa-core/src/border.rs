/// How a sample index outside `[0, len)` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// Clamp to the nearest edge index (edge replication).
    Replicate,
    /// Drop the sample; the caller excludes it from any weighted sum.
    Skip,
}

pub fn map_index(i: isize, len: usize, border: Border) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match border {
        Border::Replicate => {
            if i < 0 {
                Some(0)
            } else {
                Some((i as usize).min(len - 1))
            }
        }
        Border::Skip => {
            if i < 0 || i as usize >= len {
                None
            } else {
                Some(i as usize)
            }
        }
    }
}
