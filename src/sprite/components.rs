use bevy::{math::Affine2, prelude::*};

/// Grid layout of a sprite-sheet texture, frames numbered row-major from the
/// top-left cell.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    pub columns: u32,
    pub rows: u32,
}

impl SpriteSheet {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Size of one cell in normalised texture space.
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(1.0 / self.columns as f32, 1.0 / self.rows as f32)
    }

    /// Normalised offset of `frame` with a bottom-left texture origin.
    ///
    /// Not bounds checked: indices past `columns * rows` land on rows outside
    /// the sheet and yield negative offsets.
    pub fn frame_offset(&self, frame: usize) -> Vec2 {
        let columns = self.columns as usize;
        let column = frame % columns;
        let row = frame / columns;

        Vec2::new(
            column as f32 / self.columns as f32,
            1.0 - (row + 1) as f32 / self.rows as f32,
        )
    }

    /// Material UV transform that shows `frame`.
    ///
    /// Bevy samples with a top-left origin, so the bottom-left offset is
    /// flipped back before it is used as the translation.
    pub fn uv_transform(&self, frame: usize) -> Affine2 {
        let cell = self.cell_size();
        let offset = self.frame_offset(frame);
        let translation = Vec2::new(offset.x, 1.0 - offset.y - cell.y);
        Affine2::from_scale_angle_translation(cell, 0.0, translation)
    }
}

/// Frame currently shown by a sprite actor. Uploaded to the actor's own
/// material whenever it changes.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpriteFrame(pub usize);

/// Contiguous inclusive range of frames in a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: usize,
    pub end: usize,
}

impl FrameRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Frame timer for one animation state at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClock {
    range: FrameRange,
    seconds_per_frame: f32,
    frame: usize,
    timer: f32,
}

impl AnimationClock {
    pub fn new(range: FrameRange, seconds_per_frame: f32) -> Self {
        Self {
            range,
            seconds_per_frame,
            frame: range.start,
            timer: 0.0,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn range(&self) -> FrameRange {
        self.range
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Restarts the current range from its first frame.
    pub fn restart(&mut self) {
        self.frame = self.range.start;
        self.timer = 0.0;
    }

    /// Switches to another state's range. A real change restarts at the new
    /// range's first frame with a zeroed timer and returns `true`.
    pub fn switch_to(&mut self, range: FrameRange, seconds_per_frame: f32) -> bool {
        if self.range == range {
            return false;
        }
        self.range = range;
        self.seconds_per_frame = seconds_per_frame;
        self.frame = range.start;
        self.timer = 0.0;
        true
    }

    /// Advances the timer and returns the frame to display when it changed.
    ///
    /// Single-frame ranges always report their one frame and never run the
    /// timer.
    pub fn tick(&mut self, delta: f32) -> Option<usize> {
        if self.range.len() == 1 {
            self.frame = self.range.start;
            self.timer = 0.0;
            return Some(self.frame);
        }

        self.timer += delta;
        if self.timer < self.seconds_per_frame {
            return None;
        }

        self.timer = 0.0;
        self.frame = if self.frame >= self.range.end {
            self.range.start
        } else {
            self.frame + 1
        };
        Some(self.frame)
    }
}

/// Material for a camera-facing sprite quad. Every actor gets its own, since
/// the frame lives in the material's UV transform.
pub fn sprite_material(texture: Handle<Image>, sheet: &SpriteSheet, frame: usize) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: Some(texture),
        alpha_mode: AlphaMode::Mask(0.5),
        double_sided: true,
        cull_mode: None,
        perceptual_roughness: 1.0,
        uv_transform: sheet.uv_transform(frame),
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-6
    }

    #[test]
    fn offset_of_first_frame_is_top_left_cell() {
        let sheet = SpriteSheet::new(4, 10);
        assert!(close(sheet.frame_offset(0), Vec2::new(0.0, 0.9)));
    }

    #[test]
    fn offset_follows_column_and_row() {
        let sheet = SpriteSheet::new(4, 10);
        for i in [5usize, 13, 22, 39] {
            let expected = Vec2::new(
                (i % 4) as f32 / 4.0,
                1.0 - ((i / 4) as f32 + 1.0) / 10.0,
            );
            assert!(close(sheet.frame_offset(i), expected), "frame {i}");
        }
    }

    #[test]
    fn out_of_range_frame_goes_negative() {
        let sheet = SpriteSheet::new(6, 5);
        assert!(sheet.frame_offset(30).y < 0.0);
    }

    #[test]
    fn uv_transform_uses_top_left_origin() {
        let sheet = SpriteSheet::new(6, 5);
        // frame 7: column 1, row 1
        let uv = sheet.uv_transform(7);
        let corner = uv.transform_point2(Vec2::ZERO);
        assert!(close(corner, Vec2::new(1.0 / 6.0, 1.0 / 5.0)));
        let far = uv.transform_point2(Vec2::ONE);
        assert!(close(far, Vec2::new(2.0 / 6.0, 2.0 / 5.0)));
    }

    #[test]
    fn clock_advances_and_wraps() {
        let mut clock = AnimationClock::new(FrameRange::new(12, 15), 0.15);
        assert_eq!(clock.tick(0.1), None);
        assert_eq!(clock.tick(0.1), Some(13));
        assert_eq!(clock.timer(), 0.0);
        assert_eq!(clock.tick(0.2), Some(14));
        assert_eq!(clock.tick(0.2), Some(15));
        assert_eq!(clock.tick(0.2), Some(12));
    }

    #[test]
    fn switching_resets_frame_and_timer() {
        let mut clock = AnimationClock::new(FrameRange::new(17, 23), 0.15);
        clock.tick(0.2);
        clock.tick(0.1);
        assert!(clock.switch_to(FrameRange::new(0, 11), 0.15));
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.timer(), 0.0);
    }

    #[test]
    fn switching_to_same_range_keeps_progress() {
        let mut clock = AnimationClock::new(FrameRange::new(17, 23), 0.15);
        clock.tick(0.2);
        clock.tick(0.1);
        assert!(!clock.switch_to(FrameRange::new(17, 23), 0.15));
        assert_eq!(clock.frame(), 18);
        assert!((clock.timer() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn single_frame_range_never_runs_timer() {
        let mut clock = AnimationClock::new(FrameRange::new(3, 3), 0.15);
        assert_eq!(clock.tick(5.0), Some(3));
        assert_eq!(clock.timer(), 0.0);
    }

    #[test]
    fn zero_delta_does_not_advance() {
        let mut clock = AnimationClock::new(FrameRange::new(0, 11), 0.15);
        assert_eq!(clock.tick(0.0), None);
        assert_eq!(clock.frame(), 0);
    }
}
