use glam::{DVec2, UVec2};

/// Lazy sequence of stamp origins covering the segment between two pixel samples.
///
/// Stateless with respect to its inputs: cloning it, or calling `rasterize` again
/// with the same arguments, yields the identical sequence.
#[derive(Debug, Clone)]
pub struct Stroke {
    start: DVec2,
    delta: DVec2,
    steps: u32,
    next: u32,
    max_origin: UVec2,
}

/// Stamp origins from `start` to `end` for a `pen_size` square pen on a surface
/// of `bounds` pixels.
///
/// Emits `ceil(distance) + 1` origins, one per interpolation step, each
/// truncated to whole pixels and clamped so the stamp fits. A zero-length
/// segment emits a single origin (the first-touch dab).
pub fn rasterize(start: UVec2, end: UVec2, pen_size: u32, bounds: UVec2) -> Stroke {
    let start = start.as_dvec2();
    let delta = end.as_dvec2() - start;
    let steps = delta.length().ceil() as u32;

    Stroke {
        start,
        delta,
        steps,
        next: 0,
        max_origin: bounds.saturating_sub(UVec2::splat(pen_size)),
    }
}

impl Stroke {
    /// Number of interpolation steps; the sequence has `steps + 1` items
    pub fn steps(&self) -> u32 {
        self.steps
    }

    fn origin_at(&self, i: u32) -> UVec2 {
        let point = if self.steps == 0 {
            self.start
        } else {
            // Multiply before dividing so integer endpoints come out exact
            self.start + self.delta * f64::from(i) / f64::from(self.steps)
        };

        // Coordinates are non-negative, so `as` truncation matches floor
        UVec2::new(point.x as u32, point.y as u32).min(self.max_origin)
    }
}

impl Iterator for Stroke {
    type Item = UVec2;

    fn next(&mut self) -> Option<UVec2> {
        if self.next > self.steps {
            return None;
        }
        let origin = self.origin_at(self.next);
        self.next += 1;
        Some(origin)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Stroke {}

impl std::iter::FusedIterator for Stroke {}
